//! HTTP trigger endpoints. Each handler wraps one `te-engine` operation and
//! reports the outcome as JSON; errors map to a 4xx/5xx status with a
//! message body rather than panicking the worker.

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use te_engine::{enforce_retention, refresh_events, Poller, RefreshReport, RefreshStatus};

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
  error: String,
}

fn engine_error_response(err: te_engine::EngineError) -> HttpResponse {
  HttpResponse::InternalServerError().json(ErrorBody { error: err.to_string() })
}

/// `POST /hourly` — run one hourly poll cycle.
pub async fn hourly(state: web::Data<AppState>) -> impl Responder {
  let poller = Poller::new(
    state.db.clone(),
    state.transport.clone(),
    state.config.stale_lock_minutes,
    state.config.batch_size,
  );

  match poller.run_hourly_poll(Utc::now()).await {
    Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({ "outcome": format!("{outcome:?}") })),
    Err(e) => engine_error_response(e),
  }
}

fn default_dry_run() -> bool {
  true
}

#[derive(Debug, Deserialize)]
pub struct RefreshMetadataQuery {
  pub event_id: Option<i64>,
}

/// Selection defaults to "all tracked events" when neither `event_id` nor
/// `te_event_ids` is given. `dry_run` defaults to `true` — a misbehaving
/// diff should be inspected before it writes anything.
#[derive(Debug, Deserialize)]
pub struct RefreshMetadataRequest {
  #[serde(default)]
  pub event_id: Option<i64>,
  #[serde(default)]
  pub te_event_ids: Option<Vec<i64>>,
  #[serde(default = "default_dry_run")]
  pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RefreshMetadataResult {
  event_id: i64,
  status: &'static str,
  changed_fields: Vec<String>,
  applied: bool,
  error: Option<String>,
}

impl From<RefreshReport> for RefreshMetadataResult {
  fn from(report: RefreshReport) -> Self {
    let status = match report.status {
      RefreshStatus::NoChanges => "no_changes",
      RefreshStatus::DryRun => "dry_run",
      RefreshStatus::Applied => "applied",
      RefreshStatus::Error => "error",
    };
    RefreshMetadataResult {
      event_id: report.event_id,
      status,
      changed_fields: report.changes.iter().map(|c| c.field.to_string()).collect(),
      applied: report.applied,
      error: report.error,
    }
  }
}

#[derive(Debug, Serialize)]
struct RefreshMetadataResponse {
  dry_run: bool,
  results: Vec<RefreshMetadataResult>,
}

/// `POST /refresh-metadata[?event_id=<id>]` — diff and (unless `dry_run`)
/// apply metadata updates from Ticket Evolution for the selected events.
/// Selection priority: `event_id` query param, then `event_id` in the body,
/// then `te_event_ids` in the body, then every tracked event.
pub async fn refresh_metadata(
  state: web::Data<AppState>,
  query: web::Query<RefreshMetadataQuery>,
  body: web::Json<RefreshMetadataRequest>,
) -> impl Responder {
  let event_ids = if let Some(id) = query.event_id {
    vec![id]
  } else if let Some(id) = body.event_id {
    vec![id]
  } else if let Some(ids) = body.te_event_ids.clone() {
    ids
  } else {
    match state.db.list_all_events().await {
      Ok(events) => events.into_iter().map(|e| e.id).collect(),
      Err(e) => return engine_error_response(e.into()),
    }
  };

  let reports =
    refresh_events(state.transport.clone(), state.db.clone(), event_ids, body.dry_run, state.config.batch_size).await;

  match reports {
    Ok(reports) => HttpResponse::Ok().json(RefreshMetadataResponse {
      dry_run: body.dry_run,
      results: reports.into_iter().map(RefreshMetadataResult::from).collect(),
    }),
    Err(e) => engine_error_response(e),
  }
}

#[derive(Debug, Serialize)]
struct RetentionResponse {
  cutoff: String,
  rows_deleted: usize,
}

/// `POST /retention` — delete hourly price rows past the retention horizon.
pub async fn retention(state: web::Data<AppState>) -> impl Responder {
  let result = enforce_retention(&state.db, Utc::now(), state.config.hourly_retention_days_after_end).await;

  match result {
    Ok(report) => {
      HttpResponse::Ok().json(RetentionResponse { cutoff: report.cutoff.to_rfc3339(), rows_deleted: report.rows_deleted })
    }
    Err(e) => engine_error_response(e),
  }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/hourly", web::post().to(hourly))
    .route("/refresh-metadata", web::post().to(refresh_metadata))
    .route("/retention", web::post().to(retention));
}
