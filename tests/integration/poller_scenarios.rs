#[cfg(test)]
mod tests {
  use chrono::{DateTime, Duration, Utc};
  use te_database_postgres::models::{NewEvent, NewHourlyPrice};
  use te_database_postgres::{establish_connection, DatabaseContext};
  use te_engine::coordinator::{hour_bucket_key, RunCoordinator, RunDecision, RunOutcome, SkipReason};
  use te_engine::{aggregate, build_event_url, enforce_retention, is_eligible};
  use te_models::{Category, Event as TeEvent, Listing, Venue};

  fn test_db() -> DatabaseContext {
    let database_url =
      std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgresql://localhost/ticket_pulse_test".to_string());
    DatabaseContext::new(&database_url).expect("test database must be reachable")
  }

  fn seed_event(db: &DatabaseContext, id: i64, ended_at: Option<DateTime<Utc>>) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
      db.upsert_event(NewEvent {
        id,
        title: "Test Event".to_string(),
        starts_at: None,
        ends_at: None,
        has_ended: ended_at.is_some(),
        polling_enabled: ended_at.is_none(),
        ended_at,
        olt_url: None,
      })
      .await
      .unwrap();
    });
  }

  /// S1: the first poll of an hour acquires the lock and runs to completion.
  #[test]
  #[ignore = "requires a live Postgres test database"]
  fn s1_first_poll_of_hour_acquires_lock() {
    let db = test_db();
    let coordinator = RunCoordinator::new(db, 15);
    let rt = tokio::runtime::Runtime::new().unwrap();
    let at = Utc::now();

    let decision = rt.block_on(coordinator.begin(at)).unwrap();
    assert!(matches!(decision, RunDecision::Proceed(_)));
  }

  /// S2: a second poll for an hour that already succeeded is skipped —
  /// the hourly poll is idempotent at the run-coordination layer.
  #[test]
  #[ignore = "requires a live Postgres test database"]
  fn s2_succeeded_hour_is_not_rerun() {
    let db = test_db();
    let coordinator = RunCoordinator::new(db, 15);
    let rt = tokio::runtime::Runtime::new().unwrap();
    let at = Utc::now();

    let RunDecision::Proceed(handle) = rt.block_on(coordinator.begin(at)).unwrap() else {
      panic!("expected to acquire the lock on first attempt");
    };
    rt.block_on(coordinator.finish(
      &handle,
      RunOutcome { events_processed: 1, events_succeeded: 1, events_failed: 0, events_skipped: 0, debug: None },
    ))
    .unwrap();

    let second = rt.block_on(coordinator.begin(at)).unwrap();
    assert!(matches!(second, RunDecision::Skip(SkipReason::AlreadyRan)));
  }

  /// S3: a concurrent poll for an hour that is still within the staleness
  /// window is skipped rather than double-processing the same events.
  #[test]
  #[ignore = "requires a live Postgres test database"]
  fn s3_running_hour_within_staleness_window_is_skipped() {
    let db = test_db();
    let coordinator = RunCoordinator::new(db, 15);
    let rt = tokio::runtime::Runtime::new().unwrap();
    let at = Utc::now();

    let first = rt.block_on(coordinator.begin(at)).unwrap();
    assert!(matches!(first, RunDecision::Proceed(_)));

    let second = rt.block_on(coordinator.begin(at)).unwrap();
    assert!(matches!(second, RunDecision::Skip(SkipReason::AlreadyRunning)));
  }

  /// S5: retention enforcement deletes hourly rows for events ended before
  /// the cutoff, and a repeat run with the same cutoff is a no-op.
  #[test]
  #[ignore = "requires a live Postgres test database"]
  fn s5_retention_delete_is_idempotent() {
    let db = test_db();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let now = Utc::now();
    let long_ended = now - Duration::days(30);

    seed_event(&db, 99001, Some(long_ended));
    rt.block_on(db.upsert_hourly_price(NewHourlyPrice {
      event_id: 99001,
      hour_bucket: long_ended,
      min_price: Some(10.0),
      avg_price: Some(20.0),
      max_price: Some(30.0),
      listing_count: 2,
    }))
    .unwrap();

    let first = rt.block_on(enforce_retention(&db, now, 7)).unwrap();
    assert!(first.rows_deleted >= 1);

    let second = rt.block_on(enforce_retention(&db, now, 7)).unwrap();
    assert_eq!(second.rows_deleted, 0);
  }

  /// S4 (pure): the aggregator's eligibility predicate and min/avg/max
  /// computation apply consistently regardless of transport or storage.
  #[test]
  fn s4_aggregator_eligibility_and_aggregation() {
    let eligible = Listing {
      id: 1,
      kind: "event".to_string(),
      retail_price: Some(120.0),
      available_quantity: Some(4),
      splits: vec![2, 4],
      public_notes: None,
      notes: None,
    };
    let ineligible = Listing {
      id: 2,
      kind: "event".to_string(),
      retail_price: Some(10.0),
      available_quantity: Some(1),
      splits: vec![1],
      public_notes: Some("do not sell".to_string()),
      notes: None,
    };
    assert!(is_eligible(&eligible));
    assert!(!is_eligible(&ineligible));

    let agg = aggregate(&[eligible, ineligible]).unwrap();
    assert_eq!(agg.listing_count, 1);
    assert_eq!(agg.min_price, 120.0);
  }

  /// S6 (pure): the SEO URL builder emits the `<id>` path segment and the
  /// fixed query string, and fails closed on missing venue/occurs_at.
  #[test]
  fn s6_url_builder_sections_and_fail_closed() {
    let event = TeEvent {
      id: 7,
      name: "Hamilton".to_string(),
      occurs_at: Some("2026-09-01T01:00:00Z".parse().unwrap()),
      venue: Some(Venue {
        name: Some("Paramount Theatre".to_string()),
        city: Some("Seattle".to_string()),
        state: Some("Washington".to_string()),
        state_code: Some("WA".to_string()),
      }),
      category: Some(Category { name: Some("Theater".to_string()), slug: None, short_name: None }),
      taxonomy: None,
      timezone: None,
    };

    let url = build_event_url(&event).unwrap();
    assert!(url.starts_with("https://www.ticketevolution.com/events/hamilton-tickets_seattle-wa_paramount-theatre_"));
    assert!(url.ends_with("/7?listingsType=event&orderListBy=retail_price%20asc&quantity=2"));

    let mut missing_venue = event.clone();
    missing_venue.venue = None;
    assert!(build_event_url(&missing_venue).is_err());
  }

  #[test]
  fn hour_bucket_key_is_a_pure_function_of_the_hour() {
    let a = "2026-07-28T14:00:01Z".parse::<DateTime<Utc>>().unwrap();
    let b = "2026-07-28T14:59:59Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(hour_bucket_key(a), hour_bucket_key(b));
  }

  #[test]
  fn establish_connection_signature_is_stable() {
    // Smoke check that the connection helper's signature hasn't drifted;
    // does not require a live database.
    let _ = establish_connection as fn(&str) -> Result<diesel::PgConnection, diesel::ConnectionError>;
  }
}
