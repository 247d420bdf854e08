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

use crate::error::{is_retryable_status, Result, TeError};
use crate::signer::Signer;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use te_core::Config;
use tracing::{debug, instrument, warn};
use url::Url;

/// Signed HTTP transport for the TE listings/events API.
///
/// Handles request construction, signing, and retry with exponential
/// backoff. Every request is retried up to `max_retries` times on a
/// transient failure, waiting `1s, 2s, 4s, ...` between attempts.
pub struct Transport {
  client: Client,
  base_url: Url,
  token: String,
  signer: Signer,
  max_retries: u32,
}

impl Transport {
  pub fn new(config: &Config) -> Result<Self> {
    let base_url =
      Url::parse(&config.te_api_base_url).map_err(|e| TeError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent("ticket-pulse/0.1")
      .build()?;

    Ok(Self {
      client,
      base_url,
      token: config.te_api_token.clone(),
      signer: Signer::new(config.te_api_secret.clone()),
      max_retries: config.max_retries,
    })
  }

  /// Issue a signed GET request against `path` (e.g. `/v9/listings`) with
  /// the given query parameters, retrying transient failures.
  #[instrument(skip(self, query), fields(path = %path))]
  pub async fn get<T>(&self, path: &str, query: &[(String, String)]) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut last_error = None;

    for attempt in 1..=self.max_retries.max(1) {
      match self.execute_once(path, query).await {
        Ok(response) => return Ok(response),
        Err(e) if e.is_retryable() && attempt < self.max_retries.max(1) => {
          let delay = Duration::from_millis(1000 * 2_u64.pow(attempt - 1));
          warn!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying TE request");
          last_error = Some(e);
          tokio::time::sleep(delay).await;
        }
        Err(e) => return Err(e),
      }
    }

    Err(last_error.unwrap_or(TeError::RetryExhausted))
  }

  async fn execute_once<T>(&self, path: &str, query: &[(String, String)]) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut url = self.base_url.join(path).map_err(|e| TeError::InvalidUrl(e.to_string()))?;
    {
      let mut pairs = url.query_pairs_mut();
      for (k, v) in query {
        pairs.append_pair(k, v);
      }
    }

    let host = url.host_str().unwrap_or_default().to_string();
    let signature = self.signer.sign("GET", &host, path, query);

    debug!(url = %url, "issuing TE request");

    let response = self
      .client
      .get(url)
      .header("X-Token", &self.token)
      .header("X-Signature", signature)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let code = status.as_u16();
      return if is_retryable_status(code) {
        Err(TeError::RetryableHttp(code))
      } else {
        Err(TeError::PermanentHttp(code))
      };
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(TeError::from)
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url.as_str())
      .field("token", &"[REDACTED]")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn test_config() -> Config {
    Config::default_with_credentials(
      "super-secret-token-value".to_string(),
      "secret".to_string(),
      "postgres://localhost/ticket_pulse".to_string(),
    )
  }

  #[test]
  fn transport_debug_redacts_token() {
    let config = test_config();
    let transport = Transport::new(&config).unwrap();
    let debug_output = format!("{:?}", transport);
    assert!(!debug_output.contains("super-secret-token-value"));
    assert!(debug_output.contains("[REDACTED]"));
  }

  #[test]
  fn transport_rejects_invalid_base_url() {
    let mut config = test_config();
    config.te_api_base_url = "not a url".to_string();
    assert!(Transport::new(&config).is_err());
  }
}
