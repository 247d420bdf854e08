//! Hourly-price retention enforcement: deletes hourly aggregates for
//! events that ended more than the configured retention horizon ago. Pure
//! cutoff computation plus a thin call into the repository's idempotent
//! delete.

use chrono::{DateTime, Duration, Utc};
use te_database_postgres::DatabaseContext;
use tracing::{info, instrument};

use crate::EngineResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionReport {
  pub cutoff: DateTime<Utc>,
  pub rows_deleted: usize,
}

/// The cutoff before which an ended event's hourly rows are no longer kept.
pub fn retention_cutoff(now: DateTime<Utc>, retention_days: i64) -> DateTime<Utc> {
  now - Duration::days(retention_days)
}

/// Delete hourly price rows for events that ended before the retention
/// cutoff computed from `now`. Safe to call repeatedly; a second call with
/// an unchanged cutoff deletes nothing further.
#[instrument(skip(db))]
pub async fn enforce_retention(db: &DatabaseContext, now: DateTime<Utc>, retention_days: i64) -> EngineResult<RetentionReport> {
  let cutoff = retention_cutoff(now, retention_days);
  let rows_deleted = db.delete_hourly_prices_before(now, cutoff).await?;
  info!(rows_deleted, cutoff = %cutoff, "enforced hourly price retention");
  Ok(RetentionReport { cutoff, rows_deleted })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cutoff_is_now_minus_retention_days() {
    let now = "2026-07-28T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let cutoff = retention_cutoff(now, 7);
    assert_eq!(cutoff, "2026-07-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap());
  }

  #[test]
  fn zero_retention_days_yields_cutoff_equal_to_now() {
    let now = "2026-07-28T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(retention_cutoff(now, 0), now);
  }
}
