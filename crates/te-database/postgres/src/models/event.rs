use crate::schema::events;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// A ticketed event tracked for price polling, with the metadata fields the
/// refresher keeps in sync with Ticket Evolution.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
  pub id: i64,
  pub title: String,
  pub starts_at: Option<DateTime<Utc>>,
  pub ends_at: Option<DateTime<Utc>>,
  pub has_ended: bool,
  pub polling_enabled: bool,
  pub ended_at: Option<DateTime<Utc>>,
  pub olt_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
  pub id: i64,
  pub title: String,
  pub starts_at: Option<DateTime<Utc>>,
  pub ends_at: Option<DateTime<Utc>>,
  pub has_ended: bool,
  pub polling_enabled: bool,
  pub ended_at: Option<DateTime<Utc>>,
  pub olt_url: Option<String>,
}

/// The metadata fields the refresher may derive and write back to an event.
/// Applied field-by-field via explicit `.set((...))` tuples rather than an
/// `AsChangeset` struct, so a `None` genuinely means "leave untouched" even
/// for nullable columns like `ended_at`.
#[derive(Debug, Clone, Default)]
pub struct EventMetadataUpdate {
  pub title: Option<String>,
  pub starts_at: Option<DateTime<Utc>>,
  pub ends_at: Option<DateTime<Utc>>,
  pub has_ended: Option<bool>,
  pub polling_enabled: Option<bool>,
  pub ended_at: Option<DateTime<Utc>>,
  pub olt_url: Option<String>,
}
