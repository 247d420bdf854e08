/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use thiserror::Error;

/// Errors produced by the TE transport layer.
///
/// Classified as a sum type, not a string, so callers can decide retry
/// behavior from the variant rather than sniffing a message.
#[derive(Error, Debug)]
pub enum TeError {
  #[error("network transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("TE API returned HTTP {0}")]
  PermanentHttp(u16),

  #[error("TE API returned a retryable HTTP status {0}")]
  RetryableHttp(u16),

  #[error("failed to decode TE response body: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("request exhausted all retry attempts")]
  RetryExhausted,

  #[error("invalid request URL: {0}")]
  InvalidUrl(String),
}

impl TeError {
  /// Whether a fresh attempt of the same request might succeed.
  ///
  /// Network-level failures, timeouts, and the classic transient HTTP
  /// statuses (408/429/500/502/503/504) are retryable; anything else
  /// (4xx other than 408/429, decode failures) is permanent.
  pub fn is_retryable(&self) -> bool {
    match self {
      TeError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
      TeError::RetryableHttp(_) => true,
      TeError::PermanentHttp(_) | TeError::Decode(_) | TeError::RetryExhausted | TeError::InvalidUrl(_) => false,
    }
  }
}

pub type Result<T> = std::result::Result<T, TeError>;

/// Statuses worth retrying: request timeouts, rate limiting, and the 5xx
/// family that typically indicates a transient upstream failure.
pub fn is_retryable_status(status: u16) -> bool {
  matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}
