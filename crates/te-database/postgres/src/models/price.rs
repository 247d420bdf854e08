use crate::schema::{daily_prices, hourly_prices};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// An hourly price aggregate for one event, produced by the aggregator
/// and written by the poller engine. `min_price`/`avg_price`/`max_price` are
/// `None` when the hour had zero eligible listings; `listing_count` is `0`
/// in that case.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = hourly_prices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HourlyPrice {
  pub id: i64,
  pub event_id: i64,
  pub hour_bucket: DateTime<Utc>,
  pub min_price: Option<f64>,
  pub avg_price: Option<f64>,
  pub max_price: Option<f64>,
  pub listing_count: i32,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = hourly_prices)]
pub struct NewHourlyPrice {
  pub event_id: i64,
  pub hour_bucket: DateTime<Utc>,
  pub min_price: Option<f64>,
  pub avg_price: Option<f64>,
  pub max_price: Option<f64>,
  pub listing_count: i32,
}

/// A daily rollup of an event's hourly aggregates, produced by the
/// retention/rollup coordinator.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = daily_prices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DailyPrice {
  pub id: i64,
  pub event_id: i64,
  pub day_bucket: NaiveDate,
  pub min_price: f64,
  pub avg_price: f64,
  pub max_price: f64,
  pub listing_count: i32,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = daily_prices)]
pub struct NewDailyPrice {
  pub event_id: i64,
  pub day_bucket: NaiveDate,
  pub min_price: f64,
  pub avg_price: f64,
  pub max_price: f64,
  pub listing_count: i32,
}
