//! Event metadata refresher. Diffs a TE event's current metadata
//! against the stored row and derives the field changes to apply, gated
//! behind `dry_run` so a misbehaving diff can be inspected before it writes
//! anything.

use chrono::{DateTime, Duration, Utc};
use te_client::{endpoints, Transport};
use te_database_postgres::models::{Event as StoredEvent, EventMetadataUpdate};
use te_database_postgres::DatabaseContext;
use te_models::Event as TeEvent;
use tracing::{info, instrument, warn};

use crate::batch::{BatchConfig, BatchProcessor};
use crate::url_builder::{build_event_url, UrlBuildError};
use crate::EngineResult;
use std::sync::Arc;

/// One field whose stored value differs from what TE currently reports.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
  pub field: &'static str,
  pub previous: String,
  pub next: String,
}

/// Terminal state of one event's refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
  /// The diff was empty; nothing needed to change.
  NoChanges,
  /// Changes were computed but not written (`dry_run`).
  DryRun,
  /// Changes were computed and written.
  Applied,
  /// URL regeneration was required and failed; no field was updated.
  Error,
}

/// The derived set of changes for one event, and whether they were applied.
#[derive(Debug, Clone)]
pub struct RefreshReport {
  pub event_id: i64,
  pub changes: Vec<FieldChange>,
  pub applied: bool,
  pub status: RefreshStatus,
  pub error: Option<String>,
}

impl RefreshReport {
  pub fn is_noop(&self) -> bool {
    self.changes.is_empty()
  }
}

/// Diff `stored` against `fetched` and build the update to apply.
///
/// URL regeneration only runs when it's actually required — the stored
/// event has no URL yet, or `title`/`starts_at`/`ends_at` changed this pass
/// — and fails closed: if regeneration was required and `build_event_url`
/// errors, the whole update is aborted (`Err`) rather than applying every
/// other field while silently leaving `olt_url` stale.
fn derive_update(
  stored: &StoredEvent,
  fetched: &TeEvent,
  now: DateTime<Utc>,
) -> Result<(EventMetadataUpdate, Vec<FieldChange>), UrlBuildError> {
  let mut update = EventMetadataUpdate::default();
  let mut changes = Vec::new();
  let mut regeneration_required = stored.olt_url.is_none();

  if fetched.name != stored.title {
    changes.push(FieldChange { field: "title", previous: stored.title.clone(), next: fetched.name.clone() });
    update.title = Some(fetched.name.clone());
    regeneration_required = true;
  }

  if let Some(starts_at) = fetched.occurs_at {
    if stored.starts_at != Some(starts_at) {
      changes.push(FieldChange {
        field: "starts_at",
        previous: format_opt_time(stored.starts_at),
        next: starts_at.to_rfc3339(),
      });
      update.starts_at = Some(starts_at);
      regeneration_required = true;

      let ends_at = starts_at + Duration::hours(te_core::EVENT_DURATION_HOURS);
      if stored.ends_at != Some(ends_at) {
        changes.push(FieldChange {
          field: "ends_at",
          previous: format_opt_time(stored.ends_at),
          next: ends_at.to_rfc3339(),
        });
        update.ends_at = Some(ends_at);
        regeneration_required = true;
      }
    }
  }

  if regeneration_required {
    let new_url = build_event_url(fetched)?;
    if stored.olt_url.as_deref() != Some(new_url.as_str()) {
      changes.push(FieldChange {
        field: "olt_url",
        previous: stored.olt_url.clone().unwrap_or_default(),
        next: new_url.clone(),
      });
      update.olt_url = Some(new_url);
    }
  }

  let effective_ends_at = update.ends_at.or(stored.ends_at);
  if let Some(ends_at) = effective_ends_at {
    let should_have_ended = ends_at < now;
    if should_have_ended && !stored.has_ended {
      changes.push(FieldChange { field: "has_ended", previous: "false".to_string(), next: "true".to_string() });
      update.has_ended = Some(true);

      let ended_at = stored.ended_at.unwrap_or(now);
      changes.push(FieldChange {
        field: "ended_at",
        previous: format_opt_time(stored.ended_at),
        next: ended_at.to_rfc3339(),
      });
      update.ended_at = Some(ended_at);

      if stored.polling_enabled {
        changes.push(FieldChange {
          field: "polling_enabled",
          previous: "true".to_string(),
          next: "false".to_string(),
        });
        update.polling_enabled = Some(false);
      }
    }
  }

  Ok((update, changes))
}

fn format_opt_time(t: Option<DateTime<Utc>>) -> String {
  t.map(|t| t.to_rfc3339()).unwrap_or_default()
}

/// Fetch current metadata for `event_id` from TE, diff it against the
/// stored row, and apply the resulting update unless `dry_run` is set.
#[instrument(skip(transport, db))]
pub async fn refresh_event(
  transport: &Transport,
  db: &DatabaseContext,
  event_id: i64,
  dry_run: bool,
) -> EngineResult<RefreshReport> {
  let fetched = endpoints::get_event(transport, event_id).await?;

  let stored = db
    .find_event(event_id)
    .await?
    .ok_or_else(|| crate::EngineError::InvalidData(format!("event {event_id} is not tracked")))?;

  let (update, changes) = match derive_update(&stored, &fetched, Utc::now()) {
    Ok(v) => v,
    Err(e) => {
      warn!(event_id, error = %e, "url regeneration required and failed; aborting metadata update");
      return Ok(RefreshReport {
        event_id,
        changes: Vec::new(),
        applied: false,
        status: RefreshStatus::Error,
        error: Some(e.to_string()),
      });
    }
  };

  if changes.is_empty() {
    return Ok(RefreshReport { event_id, changes, applied: false, status: RefreshStatus::NoChanges, error: None });
  }

  if dry_run {
    info!(event_id, changes = changes.len(), "dry run: not applying metadata update");
    return Ok(RefreshReport { event_id, changes, applied: false, status: RefreshStatus::DryRun, error: None });
  }

  db.apply_event_metadata_update(event_id, update).await?;
  info!(event_id, changes = changes.len(), "applied metadata update");

  Ok(RefreshReport { event_id, changes, applied: true, status: RefreshStatus::Applied, error: None })
}

/// Refresh a bounded-concurrency batch of events. Each event's report is
/// independent — one event's `UrlBuildError` abort never touches another
/// event's update.
pub async fn refresh_events(
  transport: Arc<Transport>,
  db: DatabaseContext,
  event_ids: Vec<i64>,
  dry_run: bool,
  batch_size: usize,
) -> EngineResult<Vec<RefreshReport>> {
  let batch = BatchProcessor::new(BatchConfig { batch_size, continue_on_error: true });

  let result = batch
    .process(event_ids, move |event_id| {
      let transport = transport.clone();
      let db = db.clone();
      Box::pin(async move { refresh_event(&transport, &db, event_id, dry_run).await })
    })
    .await?;

  Ok(result.success)
}
