//! Single-writer run coordination for one hourly poll. Wraps the
//! database's lock acquisition/finalization around the decision of whether
//! this hour has already run, is running elsewhere, or is ours to take.

use chrono::{DateTime, Utc};
use te_database_postgres::{DatabaseContext, LockOutcome};
use tracing::{info, warn};

use crate::EngineResult;

/// Format used for `poller_runs.hour_bucket`: sortable, fits the column's
/// 20-character limit with room to spare.
const HOUR_BUCKET_FORMAT: &str = "%Y%m%d%H";

pub fn hour_bucket_key(hour: DateTime<Utc>) -> String {
  te_core::truncate_to_hour_utc(hour).format(HOUR_BUCKET_FORMAT).to_string()
}

/// Why a poll for this hour was skipped rather than run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// This hour already has a `succeeded` run on record.
  AlreadyRan,
  /// Another worker holds a non-stale lock for this hour.
  AlreadyRunning,
}

/// A held lock for one hour, identifying the `poller_runs` row to finalize
/// once the poll completes.
#[derive(Debug, Clone)]
pub struct RunHandle {
  pub run_id: i64,
  pub hour_bucket: String,
  /// Whether this run reclaimed a stale or previously-failed lock rather
  /// than starting fresh.
  pub reclaimed: bool,
}

#[derive(Debug, Clone)]
pub enum RunDecision {
  Proceed(RunHandle),
  Skip(SkipReason),
}

/// Tallies accumulated while processing the events under one run, reported
/// to `finish` to compute the run's terminal status. `events_processed`
/// counts every event examined, including skipped ones — invariant:
/// `events_processed == events_succeeded + events_failed + events_skipped`.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
  pub events_processed: i32,
  pub events_succeeded: i32,
  pub events_failed: i32,
  pub events_skipped: i32,
  pub debug: Option<serde_json::Value>,
}

impl RunOutcome {
  /// `succeeded` when every event either succeeded or was skipped, `failed`
  /// when none succeeded, `partial` otherwise. A run with zero events
  /// processed is `succeeded`.
  pub fn status_label(&self) -> &'static str {
    if self.events_processed == 0 || self.events_failed == 0 {
      "succeeded"
    } else if self.events_succeeded > 0 {
      "partial"
    } else {
      "failed"
    }
  }
}

pub struct RunCoordinator {
  db: DatabaseContext,
  stale_lock_minutes: i64,
}

impl RunCoordinator {
  pub fn new(db: DatabaseContext, stale_lock_minutes: i64) -> Self {
    Self { db, stale_lock_minutes }
  }

  /// Attempt to acquire the lock for the hour containing `at`. Returns the
  /// handle to run with, or the reason this hour should be skipped.
  pub async fn begin(&self, at: DateTime<Utc>) -> EngineResult<RunDecision> {
    let bucket = hour_bucket_key(at);
    let outcome = self.db.try_acquire_poller_lock(bucket.clone(), Utc::now(), self.stale_lock_minutes).await?;

    match outcome {
      LockOutcome::Acquired(run) => {
        info!(hour_bucket = %bucket, run_id = run.id, "acquired poller lock");
        Ok(RunDecision::Proceed(RunHandle { run_id: run.id, hour_bucket: bucket, reclaimed: false }))
      }
      LockOutcome::Reclaimed(run) => {
        warn!(hour_bucket = %bucket, run_id = run.id, "reclaimed stale or failed poller lock");
        Ok(RunDecision::Proceed(RunHandle { run_id: run.id, hour_bucket: bucket, reclaimed: true }))
      }
      LockOutcome::AlreadyRan(run) => {
        info!(hour_bucket = %bucket, run_id = run.id, "hour already succeeded, skipping");
        Ok(RunDecision::Skip(SkipReason::AlreadyRan))
      }
      LockOutcome::AlreadyRunning(run) => {
        info!(hour_bucket = %bucket, run_id = run.id, "hour is already being processed, skipping");
        Ok(RunDecision::Skip(SkipReason::AlreadyRunning))
      }
    }
  }

  /// Record the terminal status and counters for `handle`'s run.
  pub async fn finish(&self, handle: &RunHandle, outcome: RunOutcome) -> EngineResult<()> {
    let status = outcome.status_label().to_string();
    self
      .db
      .finalize_poller_run(
        handle.run_id,
        status,
        Utc::now(),
        outcome.events_processed,
        outcome.events_succeeded,
        outcome.events_failed,
        outcome.events_skipped,
        outcome.debug,
      )
      .await?;
    Ok(())
  }

  pub fn db(&self) -> &DatabaseContext {
    &self.db
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hour_bucket_key_truncates_and_formats() {
    let t = "2026-07-28T14:37:52Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(hour_bucket_key(t), "2026072814");
  }

  #[test]
  fn hour_bucket_key_is_stable_within_the_hour() {
    let a = "2026-07-28T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let b = "2026-07-28T14:59:59Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(hour_bucket_key(a), hour_bucket_key(b));
  }

  #[test]
  fn status_label_succeeded_when_no_failures() {
    let outcome = RunOutcome { events_processed: 3, events_succeeded: 3, events_failed: 0, events_skipped: 0, debug: None };
    assert_eq!(outcome.status_label(), "succeeded");
  }

  #[test]
  fn status_label_succeeded_when_no_events() {
    let outcome = RunOutcome::default();
    assert_eq!(outcome.status_label(), "succeeded");
  }

  #[test]
  fn status_label_partial_when_some_succeed_and_some_fail() {
    let outcome = RunOutcome { events_processed: 3, events_succeeded: 2, events_failed: 1, events_skipped: 0, debug: None };
    assert_eq!(outcome.status_label(), "partial");
  }

  #[test]
  fn status_label_failed_when_none_succeed() {
    let outcome = RunOutcome { events_processed: 2, events_succeeded: 0, events_failed: 2, events_skipped: 0, debug: None };
    assert_eq!(outcome.status_label(), "failed");
  }
}
