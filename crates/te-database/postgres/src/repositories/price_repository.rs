use crate::models::{DailyPrice, HourlyPrice, NewDailyPrice, NewHourlyPrice};
use crate::repository::{DatabaseContext, DbConnection, RepositoryResult};
use crate::schema::{daily_prices, hourly_prices};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Upsert one event's hourly aggregate, keyed by `(event_id, hour_bucket)`.
pub fn upsert_hourly(conn: &mut DbConnection, new_price: &NewHourlyPrice) -> RepositoryResult<HourlyPrice> {
  diesel::insert_into(hourly_prices::table)
    .values(new_price)
    .on_conflict((hourly_prices::event_id, hourly_prices::hour_bucket))
    .do_update()
    .set((
      hourly_prices::min_price.eq(new_price.min_price),
      hourly_prices::avg_price.eq(new_price.avg_price),
      hourly_prices::max_price.eq(new_price.max_price),
      hourly_prices::listing_count.eq(new_price.listing_count),
    ))
    .get_result(conn)
    .map_err(Into::into)
}

/// Upsert one event's daily rollup, keyed by `(event_id, day_bucket)`.
pub fn upsert_daily(conn: &mut DbConnection, new_price: &NewDailyPrice) -> RepositoryResult<DailyPrice> {
  diesel::insert_into(daily_prices::table)
    .values(new_price)
    .on_conflict((daily_prices::event_id, daily_prices::day_bucket))
    .do_update()
    .set((
      daily_prices::min_price.eq(new_price.min_price),
      daily_prices::avg_price.eq(new_price.avg_price),
      daily_prices::max_price.eq(new_price.max_price),
      daily_prices::listing_count.eq(new_price.listing_count),
    ))
    .get_result(conn)
    .map_err(Into::into)
}

pub fn hourly_for_event(conn: &mut DbConnection, event_id: i64) -> RepositoryResult<Vec<HourlyPrice>> {
  hourly_prices::table
    .filter(hourly_prices::event_id.eq(event_id))
    .order(hourly_prices::hour_bucket.asc())
    .load(conn)
    .map_err(Into::into)
}

/// Delete hourly rows older than `cutoff` for events that are over, where
/// "over" means either a recorded `ended_at` before `cutoff`, or an
/// unrecorded `ended_at` whose `ends_at` has already passed `now`. Only rows
/// with `hour_bucket < cutoff` are removed — an event past its end date
/// still keeps its in-window history. Idempotent: running it twice with the
/// same `now`/`cutoff` deletes nothing the second time.
pub fn delete_hourly_before(conn: &mut DbConnection, now: DateTime<Utc>, cutoff: DateTime<Utc>) -> RepositoryResult<usize> {
  use crate::schema::events;

  let expired_event_ids = events::table
    .filter(
      events::ended_at
        .is_not_null()
        .and(events::ended_at.lt(cutoff))
        .or(events::ended_at.is_null().and(events::ends_at.lt(now))),
    )
    .select(events::id);

  diesel::delete(
    hourly_prices::table
      .filter(hourly_prices::event_id.eq_any(expired_event_ids))
      .filter(hourly_prices::hour_bucket.lt(cutoff)),
  )
  .execute(conn)
  .map_err(Into::into)
}

impl DatabaseContext {
  pub async fn upsert_hourly_price(&self, new_price: NewHourlyPrice) -> RepositoryResult<HourlyPrice> {
    self.run(move |conn| upsert_hourly(conn, &new_price)).await
  }

  pub async fn upsert_daily_price(&self, new_price: NewDailyPrice) -> RepositoryResult<DailyPrice> {
    self.run(move |conn| upsert_daily(conn, &new_price)).await
  }

  pub async fn hourly_prices_for_event(&self, event_id: i64) -> RepositoryResult<Vec<HourlyPrice>> {
    self.run(move |conn| hourly_for_event(conn, event_id)).await
  }

  /// Delete hourly price rows older than `cutoff` for events that are over
  /// as of `now`.
  pub async fn delete_hourly_prices_before(&self, now: DateTime<Utc>, cutoff: DateTime<Utc>) -> RepositoryResult<usize> {
    self.run(move |conn| delete_hourly_before(conn, now, cutoff)).await
  }
}
