//! Eligibility filtering and price aggregation over one event's listings.
//! Pure functions, independent of transport and storage, so they are
//! directly unit-testable against the invariants and scenarios this system
//! guarantees.

use te_models::Listing;

/// Listing notes phrases that mark a ticket group as not actually buyable
/// even though TE still returns it in the listings payload.
const NON_BUYABLE_PHRASES: &[&str] =
  &["will be rejected", "accepted but not fulfilled", "will be accepted but not fulfilled", "will remain pending", "not fulfilled"];

const MIN_RETAIL_PRICE: f64 = 0.0;
const MAX_RETAIL_PRICE: f64 = 100_000.0;
const MIN_AVAILABLE_QUANTITY: i64 = 2;
const MAX_AVAILABLE_QUANTITY: i64 = 10_000;
const REQUIRED_SPLIT: i64 = 2;

/// Whether a single listing counts toward the hourly aggregate.
pub fn is_eligible(listing: &Listing) -> bool {
  if listing.kind != "event" {
    return false;
  }

  let notes = listing.notes_text_lowercase();
  if NON_BUYABLE_PHRASES.iter().any(|phrase| notes.contains(phrase)) {
    return false;
  }

  let Some(price) = listing.retail_price else { return false };
  if !(price > MIN_RETAIL_PRICE && price < MAX_RETAIL_PRICE) {
    return false;
  }

  let Some(quantity) = listing.available_quantity else { return false };
  if !(MIN_AVAILABLE_QUANTITY <= quantity && quantity < MAX_AVAILABLE_QUANTITY) {
    return false;
  }

  if !listing.splits.contains(&REQUIRED_SPLIT) {
    return false;
  }

  true
}

/// The min/avg/max/count aggregate over one event's eligible listings for an
/// hour. No outlier trimming is applied — every eligible listing
/// participates equally in the average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAggregate {
  pub min_price: f64,
  pub avg_price: f64,
  pub max_price: f64,
  pub listing_count: i32,
}

/// Compute the aggregate over `listings`, filtering to eligible listings
/// first. Returns `None` when no listing is eligible — an hour with zero
/// eligible listings produces no `HourlyPrice` row.
pub fn aggregate(listings: &[Listing]) -> Option<PriceAggregate> {
  let prices: Vec<f64> = listings.iter().filter(|l| is_eligible(l)).filter_map(|l| l.retail_price).collect();

  if prices.is_empty() {
    return None;
  }

  let min_price = prices.iter().cloned().fold(f64::INFINITY, f64::min);
  let max_price = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let sum: f64 = prices.iter().sum();
  let avg_price = round_to_2_decimals(sum / prices.len() as f64);

  Some(PriceAggregate { min_price, avg_price, max_price, listing_count: prices.len() as i32 })
}

fn round_to_2_decimals(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;

  fn listing(kind: &str, price: Option<f64>, qty: Option<i64>, splits: Vec<i64>, notes: Option<&str>) -> Listing {
    Listing {
      id: 1,
      kind: kind.to_string(),
      retail_price: price,
      available_quantity: qty,
      splits,
      public_notes: notes.map(|s| s.to_string()),
      notes: None,
    }
  }

  #[test]
  fn rejects_non_event_type() {
    let l = listing("parking", Some(50.0), Some(4), vec![2], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_non_buyable_phrase_case_insensitively() {
    let l = listing("event", Some(50.0), Some(4), vec![2], Some("This order WILL BE REJECTED"));
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_listing_that_will_remain_pending() {
    let l = listing("event", Some(50.0), Some(4), vec![2], Some("order will remain pending"));
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_price_at_or_below_zero() {
    let l = listing("event", Some(0.0), Some(4), vec![2], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_price_at_or_above_100000() {
    let l = listing("event", Some(100_000.0), Some(4), vec![2], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn accepts_price_just_inside_open_interval() {
    let l = listing("event", Some(99_999.99), Some(4), vec![2], None);
    assert!(is_eligible(&l));
  }

  #[test]
  fn rejects_quantity_below_two() {
    let l = listing("event", Some(50.0), Some(1), vec![2], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_quantity_at_or_above_10000() {
    let l = listing("event", Some(50.0), Some(10_000), vec![2], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_splits_without_two() {
    let l = listing("event", Some(50.0), Some(4), vec![1, 3, 4], None);
    assert!(!is_eligible(&l));
  }

  #[test]
  fn rejects_missing_price_or_quantity() {
    let no_price = listing("event", None, Some(4), vec![2], None);
    let no_qty = listing("event", Some(50.0), None, vec![2], None);
    assert!(!is_eligible(&no_price));
    assert!(!is_eligible(&no_qty));
  }

  #[test]
  fn aggregate_computes_min_avg_max_count() {
    let listings = vec![
      listing("event", Some(100.0), Some(4), vec![2], None),
      listing("event", Some(200.0), Some(4), vec![2], None),
      listing("event", Some(300.0), Some(4), vec![2], None),
    ];
    let agg = aggregate(&listings).unwrap();
    assert_eq!(agg.min_price, 100.0);
    assert_eq!(agg.max_price, 300.0);
    assert_eq!(agg.avg_price, 200.0);
    assert_eq!(agg.listing_count, 3);
  }

  #[test]
  fn aggregate_rounds_average_to_2_decimals() {
    let listings = vec![
      listing("event", Some(10.0), Some(4), vec![2], None),
      listing("event", Some(10.0), Some(4), vec![2], None),
      listing("event", Some(11.0), Some(4), vec![2], None),
    ];
    let agg = aggregate(&listings).unwrap();
    assert_eq!(agg.avg_price, 10.33);
  }

  #[test]
  fn aggregate_excludes_ineligible_listings() {
    let listings = vec![
      listing("event", Some(100.0), Some(4), vec![2], None),
      listing("event", Some(1.0), Some(1), vec![3], None),
    ];
    let agg = aggregate(&listings).unwrap();
    assert_eq!(agg.listing_count, 1);
    assert_eq!(agg.min_price, 100.0);
  }

  #[test]
  fn aggregate_applies_no_outlier_trimming() {
    let listings = vec![
      listing("event", Some(1.0), Some(4), vec![2], None),
      listing("event", Some(50.0), Some(4), vec![2], None),
      listing("event", Some(99_999.0), Some(4), vec![2], None),
    ];
    let agg = aggregate(&listings).unwrap();
    assert_eq!(agg.listing_count, 3);
    assert_eq!(agg.min_price, 1.0);
    assert_eq!(agg.max_price, 99_999.0);
  }

  #[test]
  fn aggregate_returns_none_when_nothing_eligible() {
    let listings = vec![listing("parking", Some(10.0), Some(4), vec![2], None)];
    assert!(aggregate(&listings).is_none());
  }
}
