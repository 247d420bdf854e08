//! Hourly poll orchestration: selects active events, fans out listing
//! fetches under a bounded-concurrency batch, aggregates eligible listings
//! into an hourly price row per event, and records each event's outcome
//! against the run held by the coordinator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use te_client::{endpoints, Transport};
use te_database_postgres::models::{NewHourlyPrice, NewPollerRunEvent};
use te_database_postgres::DatabaseContext;
use tracing::{info, instrument, warn};

use crate::aggregator::aggregate;
use crate::batch::{BatchConfig, BatchProcessor};
use crate::coordinator::{RunCoordinator, RunDecision, RunOutcome, SkipReason};
use crate::{EngineError, EngineResult};

/// The result of one hourly poll invocation.
#[derive(Debug, Clone)]
pub enum PollOutcome {
  Skipped(SkipReason),
  Ran { run_id: i64, events_processed: i32, events_succeeded: i32, events_failed: i32, events_skipped: i32 },
}

/// What happened when polling one event's listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventOutcome {
  /// An `HourlyPrice` row was written with a real aggregate.
  Succeeded,
  /// The event had zero eligible listings this hour; a zero/null row was
  /// still written so the hour's coverage is complete.
  Skipped,
}

pub struct Poller {
  coordinator: RunCoordinator,
  transport: Arc<Transport>,
  batch: BatchProcessor,
}

impl Poller {
  pub fn new(db: DatabaseContext, transport: Arc<Transport>, stale_lock_minutes: i64, batch_size: usize) -> Self {
    Self {
      coordinator: RunCoordinator::new(db, stale_lock_minutes),
      transport,
      batch: BatchProcessor::new(BatchConfig { batch_size, continue_on_error: true }),
    }
  }

  /// Run (or skip) the hourly poll for the hour containing `at`.
  #[instrument(skip(self))]
  pub async fn run_hourly_poll(&self, at: DateTime<Utc>) -> EngineResult<PollOutcome> {
    let handle = match self.coordinator.begin(at).await? {
      RunDecision::Skip(reason) => return Ok(PollOutcome::Skipped(reason)),
      RunDecision::Proceed(handle) => handle,
    };

    let bucket_instant = te_core::truncate_to_hour_utc(at);
    let active_events = self.coordinator.db().list_active_events().await?;
    info!(count = active_events.len(), hour_bucket = %handle.hour_bucket, "polling active events");

    let db = self.coordinator.db().clone();
    let transport = self.transport.clone();
    let run_id = handle.run_id;

    let batch_result = self
      .batch
      .process(active_events, move |event| {
        let db = db.clone();
        let transport = transport.clone();
        Box::pin(async move {
          let outcome = poll_one_event(&transport, &db, event.id, bucket_instant).await;
          record_event_outcome(&db, run_id, event.id, &outcome).await;
          outcome
        })
      })
      .await?;

    let events_processed = batch_result.total_processed as i32;
    let events_succeeded = batch_result.success.iter().filter(|o| **o == EventOutcome::Succeeded).count() as i32;
    let events_skipped = batch_result.success.iter().filter(|o| **o == EventOutcome::Skipped).count() as i32;
    let events_failed = batch_result.failure_count() as i32;

    let run_outcome = RunOutcome {
      events_processed,
      events_succeeded,
      events_failed,
      events_skipped,
      debug: failures_to_json(&batch_result.failures),
    };
    self.coordinator.finish(&handle, run_outcome).await?;

    Ok(PollOutcome::Ran { run_id, events_processed, events_succeeded, events_failed, events_skipped })
  }
}

async fn poll_one_event(
  transport: &Transport,
  db: &DatabaseContext,
  event_id: i64,
  hour_bucket: DateTime<Utc>,
) -> EngineResult<EventOutcome> {
  let listings = endpoints::list_listings(transport, event_id).await?;
  let (new_price, outcome) = price_row(event_id, hour_bucket, aggregate(listings.listings()));

  db.upsert_hourly_price(new_price).await?;
  Ok(outcome)
}

/// Build the `HourlyPrice` row for one event's hour from its aggregate.
/// Zero eligible listings still produces a row — with a null price triple
/// and zero count — so the hour's per-event coverage is complete.
fn price_row(
  event_id: i64,
  hour_bucket: DateTime<Utc>,
  agg: Option<crate::aggregator::PriceAggregate>,
) -> (NewHourlyPrice, EventOutcome) {
  match agg {
    Some(price_agg) => (
      NewHourlyPrice {
        event_id,
        hour_bucket,
        min_price: Some(price_agg.min_price),
        avg_price: Some(price_agg.avg_price),
        max_price: Some(price_agg.max_price),
        listing_count: price_agg.listing_count,
      },
      EventOutcome::Succeeded,
    ),
    None => (
      NewHourlyPrice { event_id, hour_bucket, min_price: None, avg_price: None, max_price: None, listing_count: 0 },
      EventOutcome::Skipped,
    ),
  }
}

async fn record_event_outcome(db: &DatabaseContext, run_id: i64, event_id: i64, outcome: &EngineResult<EventOutcome>) {
  let (outcome_label, error_detail) = match outcome {
    Ok(EventOutcome::Succeeded) => ("succeeded".to_string(), None),
    Ok(EventOutcome::Skipped) => ("skipped".to_string(), Some("no_eligible_listings".to_string())),
    Err(e) => ("failed".to_string(), Some(e.to_string())),
  };

  let new_event =
    NewPollerRunEvent { poller_run_id: run_id, event_id, outcome: outcome_label, error_detail };

  if let Err(e) = db.record_poller_run_event(new_event).await {
    warn!(event_id, error = %e, "failed to record poller run event outcome");
  }
}

fn failures_to_json(failures: &[(usize, EngineError)]) -> Option<serde_json::Value> {
  if failures.is_empty() {
    return None;
  }
  let messages: Vec<String> = failures.iter().map(|(_, e)| e.to_string()).collect();
  serde_json::to_value(messages).ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coordinator::hour_bucket_key;

  #[test]
  fn hour_bucket_key_matches_aggregation_bucket() {
    let t = "2026-07-28T14:37:00Z".parse::<DateTime<Utc>>().unwrap();
    let truncated = te_core::truncate_to_hour_utc(t);
    assert_eq!(hour_bucket_key(t), truncated.format("%Y%m%d%H").to_string());
  }

  #[test]
  fn zero_eligible_listings_writes_a_zero_row_and_is_skipped() {
    let hour = "2026-07-28T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let (row, outcome) = price_row(1, hour, None);
    assert_eq!(outcome, EventOutcome::Skipped);
    assert_eq!(row.listing_count, 0);
    assert!(row.min_price.is_none());
    assert!(row.avg_price.is_none());
    assert!(row.max_price.is_none());
  }

  #[test]
  fn eligible_listings_write_a_real_row_and_succeed() {
    use crate::aggregator::PriceAggregate;

    let hour = "2026-07-28T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let agg = PriceAggregate { min_price: 10.0, avg_price: 20.0, max_price: 30.0, listing_count: 3 };
    let (row, outcome) = price_row(1, hour, Some(agg));
    assert_eq!(outcome, EventOutcome::Succeeded);
    assert_eq!(row.listing_count, 3);
    assert_eq!(row.min_price, Some(10.0));
  }
}
