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

#[derive(Error, Debug, Clone)]
pub enum EngineError {
  #[error("TE API error: {0}")]
  Api(String),

  #[error("database error: {0}")]
  Database(String),

  #[error("invalid data: {0}")]
  InvalidData(String),

  #[error("batch processing error: {0}")]
  BatchProcessing(String),

  #[error("URL build error: {0}")]
  UrlBuild(String),

  #[error("configuration error: {0}")]
  Configuration(String),
}

impl From<te_client::TeError> for EngineError {
  fn from(err: te_client::TeError) -> Self {
    EngineError::Api(err.to_string())
  }
}

impl From<te_database_postgres::RepositoryError> for EngineError {
  fn from(err: te_database_postgres::RepositoryError) -> Self {
    EngineError::Database(err.to_string())
  }
}

impl From<te_core::Error> for EngineError {
  fn from(err: te_core::Error) -> Self {
    EngineError::Configuration(err.to_string())
  }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_api_error() {
    let err = EngineError::Api("connection failed".to_string());
    assert_eq!(err.to_string(), "TE API error: connection failed");
  }

  #[test]
  fn display_database_error() {
    let err = EngineError::Database("connection refused".to_string());
    assert_eq!(err.to_string(), "database error: connection refused");
  }

  #[test]
  fn from_te_error_wraps_message() {
    let te_err = te_client::TeError::RetryExhausted;
    let err: EngineError = te_err.into();
    assert!(matches!(err, EngineError::Api(_)));
  }

  #[test]
  fn clone_preserves_display() {
    let err = EngineError::InvalidData("bad payload".to_string());
    let cloned = err.clone();
    assert_eq!(err.to_string(), cloned.to_string());
  }
}
