/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! # te-engine
//!
//! The ingestion engine for the Ticket Pulse price history system:
//!
//! - [`aggregator`] — eligibility filtering and min/avg/max aggregation
//! - [`url_builder`] — SEO URL construction for an event
//! - [`coordinator`] — single-writer run lock and lifecycle
//! - [`poller`] — hourly poll orchestration
//! - [`refresher`] — event metadata diff/refresh
//! - [`retention`] — hourly price retention enforcement
//! - [`batch`] — bounded-concurrency fan-out used by the poller
//! - [`error`] — the [`EngineError`] classification

pub mod aggregator;
pub mod batch;
pub mod coordinator;
pub mod error;
pub mod poller;
pub mod refresher;
pub mod retention;
pub mod url_builder;

pub use aggregator::{aggregate, is_eligible, PriceAggregate};
pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use coordinator::{hour_bucket_key, RunCoordinator, RunDecision, RunHandle, RunOutcome, SkipReason};
pub use error::{EngineError, EngineResult};
pub use poller::{PollOutcome, Poller};
pub use refresher::{refresh_event, refresh_events, FieldChange, RefreshReport, RefreshStatus};
pub use retention::{enforce_retention, retention_cutoff, RetentionReport};
pub use url_builder::{build_event_url, UrlBuildError};
