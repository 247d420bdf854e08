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

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration for the ingestion core, sourced from environment
/// variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Ticket Evolution API token (`X-Token` header).
  pub te_api_token: String,

  /// Ticket Evolution API secret, used to sign requests. Never logged.
  pub te_api_secret: String,

  /// Base URL for the TE listings/events API.
  pub te_api_base_url: String,

  /// Hourly retention horizon, in days, after an event ends. Must be >= 0;
  /// invalid/negative env values fall back to `DEFAULT_RETENTION_DAYS`.
  pub hourly_retention_days_after_end: i64,

  /// Number of events processed concurrently per poll batch.
  pub batch_size: usize,

  /// Maximum retry attempts for a transient TE request failure.
  pub max_retries: u32,

  /// How long a `PollerRun` row may sit unfinished before it is considered
  /// stale and eligible for reclaim, in minutes.
  pub stale_lock_minutes: i64,

  /// Postgres connection string for the persistence layer.
  pub database_url: String,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let te_api_token = env::var("TE_API_TOKEN")
      .map_err(|_| Error::Credential("TE_API_TOKEN not set".to_string()))?;
    let te_api_secret = env::var("TE_API_SECRET")
      .map_err(|_| Error::Credential("TE_API_SECRET not set".to_string()))?;

    let te_api_base_url = env::var("TE_API_BASE_URL")
      .unwrap_or_else(|_| crate::DEFAULT_TE_API_BASE_URL.to_string());

    let hourly_retention_days_after_end = env::var("HOURLY_RETENTION_DAYS_AFTER_END")
      .ok()
      .and_then(|v| v.parse::<i64>().ok())
      .filter(|v| *v >= 0)
      .unwrap_or(crate::DEFAULT_RETENTION_DAYS);

    let batch_size = env::var("BATCH_SIZE")
      .ok()
      .and_then(|v| v.parse::<usize>().ok())
      .filter(|v| *v > 0)
      .unwrap_or(crate::DEFAULT_BATCH_SIZE);

    let max_retries = env::var("MAX_RETRIES")
      .ok()
      .and_then(|v| v.parse::<u32>().ok())
      .unwrap_or(crate::DEFAULT_MAX_RETRIES);

    let stale_lock_minutes = env::var("STALE_LOCK_MINUTES")
      .ok()
      .and_then(|v| v.parse::<i64>().ok())
      .filter(|v| *v > 0)
      .unwrap_or(crate::DEFAULT_STALE_LOCK_MINUTES);

    let database_url =
      env::var("DATABASE_URL").map_err(|_| Error::Credential("DATABASE_URL not set".to_string()))?;

    Ok(Config {
      te_api_token,
      te_api_secret,
      te_api_base_url,
      hourly_retention_days_after_end,
      batch_size,
      max_retries,
      stale_lock_minutes,
      database_url,
    })
  }

  /// Build a config with fixed defaults, for tests.
  pub fn default_with_credentials(token: String, secret: String, database_url: String) -> Self {
    Config {
      te_api_token: token,
      te_api_secret: secret,
      te_api_base_url: crate::DEFAULT_TE_API_BASE_URL.to_string(),
      hourly_retention_days_after_end: crate::DEFAULT_RETENTION_DAYS,
      batch_size: crate::DEFAULT_BATCH_SIZE,
      max_retries: crate::DEFAULT_MAX_RETRIES,
      stale_lock_minutes: crate::DEFAULT_STALE_LOCK_MINUTES,
      database_url,
    }
  }
}
