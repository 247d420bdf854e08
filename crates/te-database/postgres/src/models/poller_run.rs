use crate::schema::{poller_run_events, poller_runs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// The single-writer lock row for one hourly poll. `hour_bucket` carries a
/// unique constraint in the schema; acquiring the lock is an INSERT against
/// that constraint, with a conditional UPDATE path for reclaiming a stale run
/// (see the run coordinator).
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = poller_runs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PollerRun {
  pub id: i64,
  pub hour_bucket: String,
  pub status: String,
  pub started_at: DateTime<Utc>,
  pub finished_at: Option<DateTime<Utc>>,
  pub events_processed: i32,
  pub events_succeeded: i32,
  pub events_failed: i32,
  pub events_skipped: i32,
  pub debug: Option<serde_json::Value>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = poller_runs)]
pub struct NewPollerRun {
  pub hour_bucket: String,
  pub status: String,
  pub started_at: DateTime<Utc>,
}

/// One event's outcome within a `PollerRun`, recorded for observability and
/// post-mortem debugging of partial/failed runs.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = poller_run_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PollerRunEvent {
  pub id: i64,
  pub poller_run_id: i64,
  pub event_id: i64,
  pub outcome: String,
  pub error_detail: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = poller_run_events)]
pub struct NewPollerRunEvent {
  pub poller_run_id: i64,
  pub event_id: i64,
  pub outcome: String,
  pub error_detail: Option<String>,
}
