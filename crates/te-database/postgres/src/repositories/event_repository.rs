use crate::models::{Event, EventMetadataUpdate, NewEvent};
use crate::repository::{DatabaseContext, DbConnection, RepositoryResult};
use crate::schema::events;
use diesel::prelude::*;

/// Upsert an event's base record, keyed by its TE event id.
pub fn upsert(conn: &mut DbConnection, new_event: &NewEvent) -> RepositoryResult<Event> {
  diesel::insert_into(events::table)
    .values(new_event)
    .on_conflict(events::id)
    .do_update()
    .set((
      events::title.eq(&new_event.title),
      events::starts_at.eq(new_event.starts_at),
      events::ends_at.eq(new_event.ends_at),
      events::has_ended.eq(new_event.has_ended),
      events::polling_enabled.eq(new_event.polling_enabled),
      events::ended_at.eq(new_event.ended_at),
      events::olt_url.eq(&new_event.olt_url),
      events::updated_at.eq(diesel::dsl::now),
    ))
    .get_result(conn)
    .map_err(Into::into)
}

pub fn find(conn: &mut DbConnection, event_id: i64) -> RepositoryResult<Option<Event>> {
  events::table.filter(events::id.eq(event_id)).first(conn).optional().map_err(Into::into)
}

/// Events currently eligible for the hourly poller: polling enabled and not
/// yet marked ended.
pub fn list_active(conn: &mut DbConnection) -> RepositoryResult<Vec<Event>> {
  events::table
    .filter(events::polling_enabled.eq(true))
    .filter(events::has_ended.eq(false))
    .order(events::id.asc())
    .load(conn)
    .map_err(Into::into)
}

/// Every tracked event, regardless of polling/ended status. Used by the
/// metadata refresher's "no subset given" fallback.
pub fn list_all(conn: &mut DbConnection) -> RepositoryResult<Vec<Event>> {
  events::table.order(events::id.asc()).load(conn).map_err(Into::into)
}

/// Apply the refresher's derived field changes. Fields left `None` in
/// `update` are left untouched on the row.
pub fn apply_metadata_update(
  conn: &mut DbConnection,
  event_id: i64,
  update: &EventMetadataUpdate,
) -> RepositoryResult<Event> {
  let current = find(conn, event_id)?
    .ok_or_else(|| crate::repository::RepositoryError::NotFound(format!("event {event_id}")))?;

  diesel::update(events::table.filter(events::id.eq(event_id)))
    .set((
      events::title.eq(update.title.clone().unwrap_or(current.title)),
      events::starts_at.eq(update.starts_at.or(current.starts_at)),
      events::ends_at.eq(update.ends_at.or(current.ends_at)),
      events::has_ended.eq(update.has_ended.unwrap_or(current.has_ended)),
      events::polling_enabled.eq(update.polling_enabled.unwrap_or(current.polling_enabled)),
      events::ended_at.eq(update.ended_at.or(current.ended_at)),
      events::olt_url.eq(update.olt_url.clone().or(current.olt_url)),
      events::updated_at.eq(diesel::dsl::now),
    ))
    .get_result(conn)
    .map_err(Into::into)
}

impl DatabaseContext {
  pub async fn upsert_event(&self, new_event: NewEvent) -> RepositoryResult<Event> {
    self.run(move |conn| upsert(conn, &new_event)).await
  }

  pub async fn find_event(&self, event_id: i64) -> RepositoryResult<Option<Event>> {
    self.run(move |conn| find(conn, event_id)).await
  }

  pub async fn list_active_events(&self) -> RepositoryResult<Vec<Event>> {
    self.run(list_active).await
  }

  pub async fn list_all_events(&self) -> RepositoryResult<Vec<Event>> {
    self.run(list_all).await
  }

  pub async fn apply_event_metadata_update(
    &self,
    event_id: i64,
    update: EventMetadataUpdate,
  ) -> RepositoryResult<Event> {
    self.run(move |conn| apply_metadata_update(conn, event_id, &update)).await
  }
}
