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

//! # te-core
//!
//! Core configuration, error handling, and time types shared across the
//! Ticket Pulse ingestion crates:
//!
//! - [`Config`] — TE credentials, retention horizon, batch/retry tuning
//! - [`Error`] and [`Result`] — unified error handling
//! - [`time`] — UTC hour-bucket arithmetic used by the run coordinator and
//!   poller engine
//!
//! ## Example
//!
//! ```
//! use te_core::Config;
//!
//! let config = Config::default_with_credentials(
//!   "token".to_string(),
//!   "secret".to_string(),
//!   "postgres://localhost/ticket_pulse".to_string(),
//! );
//! assert_eq!(config.batch_size, 10);
//! ```

pub mod config;
pub mod error;
pub mod time;

pub use config::Config;
pub use error::{Error, Result};
pub use time::truncate_to_hour_utc;

/// Default base URL for the TE listings/events API (sandbox).
pub const DEFAULT_TE_API_BASE_URL: &str = "https://api.sandbox.ticketevolution.com/v9";

/// Default hourly-retention horizon after an event ends, in days.
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

/// Default number of events processed concurrently per poll batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default maximum retry attempts for a transient TE request failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default staleness window for an unfinished `PollerRun`, in minutes.
pub const DEFAULT_STALE_LOCK_MINUTES: i64 = 15;

/// Fixed duration of a ticketed event, used to derive `ends_at` from
/// `starts_at` when none is supplied by TE.
pub const EVENT_DURATION_HOURS: i64 = 4;

/// Base domain the SEO URL builder anchors `olt_url` values to.
pub const DEFAULT_OLT_BASE_URL: &str = "https://www.ticketevolution.com";

/// `quantity` query parameter on a generated SEO URL — the minimum split
/// size an eligible listing must offer, per the aggregator's eligibility
/// predicate.
pub const OLT_URL_DEFAULT_QUANTITY: u32 = 2;
