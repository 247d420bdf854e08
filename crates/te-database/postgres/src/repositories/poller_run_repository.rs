use crate::models::{NewPollerRun, NewPollerRunEvent, PollerRun, PollerRunEvent};
use crate::repository::{DatabaseContext, DbConnection, RepositoryResult};
use crate::schema::{poller_run_events, poller_runs};
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// The outcome of attempting to acquire the single-writer lock for an hourly
/// poll, keyed by `poller_runs.hour_bucket`.
#[derive(Debug, Clone)]
pub enum LockOutcome {
  /// No prior run existed for this hour; the new row is now held.
  Acquired(PollerRun),
  /// A run for this hour already completed successfully; do not rerun.
  AlreadyRan(PollerRun),
  /// A run for this hour is in progress and not yet stale.
  AlreadyRunning(PollerRun),
  /// A prior run for this hour was stale (still `running` past the
  /// staleness window) or ended non-successfully; its row was reset and is
  /// now held.
  Reclaimed(PollerRun),
}

/// Attempt to acquire the lock for `hour_bucket`. See the run coordinator's
/// module docs for the full state machine.
pub fn try_acquire_lock(
  conn: &mut DbConnection,
  bucket: &str,
  now: DateTime<Utc>,
  stale_cutoff_minutes: i64,
) -> RepositoryResult<LockOutcome> {
  let insert_result = diesel::insert_into(poller_runs::table)
    .values(NewPollerRun { hour_bucket: bucket.to_string(), status: "running".to_string(), started_at: now })
    .get_result::<PollerRun>(conn);

  match insert_result {
    Ok(row) => Ok(LockOutcome::Acquired(row)),
    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
      let existing: PollerRun =
        poller_runs::table.filter(poller_runs::hour_bucket.eq(bucket)).first(conn)?;

      if existing.status == "succeeded" {
        return Ok(LockOutcome::AlreadyRan(existing));
      }

      if existing.status == "running" {
        let age = now - existing.started_at;
        if age < Duration::minutes(stale_cutoff_minutes) {
          return Ok(LockOutcome::AlreadyRunning(existing));
        }
      }

      // Either a stale `running` row or a terminal `partial`/`failed` row:
      // reset it and take over the hour.
      let reclaimed = diesel::update(poller_runs::table.filter(poller_runs::id.eq(existing.id)))
        .set((
          poller_runs::status.eq("running"),
          poller_runs::started_at.eq(now),
          poller_runs::finished_at.eq(None::<DateTime<Utc>>),
          poller_runs::events_processed.eq(0),
          poller_runs::events_succeeded.eq(0),
          poller_runs::events_failed.eq(0),
          poller_runs::events_skipped.eq(0),
        ))
        .get_result(conn)?;

      Ok(LockOutcome::Reclaimed(reclaimed))
    }
    Err(e) => Err(e.into()),
  }
}

/// Record the final status and counters for a completed run.
#[allow(clippy::too_many_arguments)]
pub fn finalize(
  conn: &mut DbConnection,
  run_id: i64,
  status: &str,
  finished_at: DateTime<Utc>,
  events_processed: i32,
  events_succeeded: i32,
  events_failed: i32,
  events_skipped: i32,
  debug: Option<serde_json::Value>,
) -> RepositoryResult<PollerRun> {
  diesel::update(poller_runs::table.filter(poller_runs::id.eq(run_id)))
    .set((
      poller_runs::status.eq(status),
      poller_runs::finished_at.eq(Some(finished_at)),
      poller_runs::events_processed.eq(events_processed),
      poller_runs::events_succeeded.eq(events_succeeded),
      poller_runs::events_failed.eq(events_failed),
      poller_runs::events_skipped.eq(events_skipped),
      poller_runs::debug.eq(debug),
    ))
    .get_result(conn)
    .map_err(Into::into)
}

pub fn record_event_outcome(
  conn: &mut DbConnection,
  new_event: &NewPollerRunEvent,
) -> RepositoryResult<PollerRunEvent> {
  diesel::insert_into(poller_run_events::table).values(new_event).get_result(conn).map_err(Into::into)
}

impl DatabaseContext {
  pub async fn try_acquire_poller_lock(
    &self,
    hour_bucket: String,
    now: DateTime<Utc>,
    stale_cutoff_minutes: i64,
  ) -> RepositoryResult<LockOutcome> {
    self.run(move |conn| try_acquire_lock(conn, &hour_bucket, now, stale_cutoff_minutes)).await
  }

  #[allow(clippy::too_many_arguments)]
  pub async fn finalize_poller_run(
    &self,
    run_id: i64,
    status: String,
    finished_at: DateTime<Utc>,
    events_processed: i32,
    events_succeeded: i32,
    events_failed: i32,
    events_skipped: i32,
    debug: Option<serde_json::Value>,
  ) -> RepositoryResult<PollerRun> {
    self
      .run(move |conn| {
        finalize(
          conn,
          run_id,
          &status,
          finished_at,
          events_processed,
          events_succeeded,
          events_failed,
          events_skipped,
          debug,
        )
      })
      .await
  }

  pub async fn record_poller_run_event(
    &self,
    new_event: NewPollerRunEvent,
  ) -> RepositoryResult<PollerRunEvent> {
    self.run(move |conn| record_event_outcome(conn, &new_event)).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stale_cutoff_boundary_is_exclusive_of_reclaim() {
    let started = Utc::now();
    let now = started + Duration::minutes(15);
    assert!(!(now - started < Duration::minutes(15)));
  }
}
