//! TE `/listings` response payload.
//!
//! The TE API has shipped this endpoint under two different top-level keys
//! over time (`ticket_groups` and `listings`); both wrap the same listing
//! shape. Callers should use [`ListingsResponse::listings`] rather than
//! matching on either field directly.

use crate::common::{lenient_f64, lenient_i64};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ListingsResponse {
  #[serde(default)]
  ticket_groups: Option<Vec<Listing>>,
  #[serde(default)]
  listings: Option<Vec<Listing>>,
}

impl ListingsResponse {
  /// The listing array, normalizing across the `ticket_groups`/`listings`
  /// field-name variance. Prefers `ticket_groups` when both are present.
  pub fn listings(&self) -> &[Listing] {
    match (&self.ticket_groups, &self.listings) {
      (Some(groups), _) => groups,
      (None, Some(listings)) => listings,
      (None, None) => &[],
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
  pub id: i64,

  #[serde(rename = "type")]
  pub kind: String,

  #[serde(default, deserialize_with = "lenient_f64")]
  pub retail_price: Option<f64>,

  #[serde(default, deserialize_with = "lenient_i64")]
  pub available_quantity: Option<i64>,

  #[serde(default)]
  pub splits: Vec<i64>,

  #[serde(default)]
  pub public_notes: Option<String>,

  #[serde(default)]
  pub notes: Option<String>,
}

impl Listing {
  /// The text consulted for the "non-buyable phrase" eligibility check: the
  /// concatenation of `public_notes` and `notes`, lowercased.
  pub fn notes_text_lowercase(&self) -> String {
    let mut combined = String::new();
    if let Some(n) = &self.public_notes {
      combined.push_str(n);
      combined.push(' ');
    }
    if let Some(n) = &self.notes {
      combined.push_str(n);
    }
    combined.to_lowercase()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prefers_ticket_groups_over_listings() {
    let json = r#"{"ticket_groups": [{"id": 1, "type": "event"}], "listings": [{"id": 2, "type": "event"}]}"#;
    let resp: ListingsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.listings().len(), 1);
    assert_eq!(resp.listings()[0].id, 1);
  }

  #[test]
  fn falls_back_to_listings_field() {
    let json = r#"{"listings": [{"id": 2, "type": "event"}]}"#;
    let resp: ListingsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.listings()[0].id, 2);
  }

  #[test]
  fn empty_payload_yields_empty_slice() {
    let resp: ListingsResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.listings().is_empty());
  }

  #[test]
  fn retail_price_accepts_string_form() {
    let json = r#"{"listings": [{"id": 1, "type": "event", "retail_price": "135.50"}]}"#;
    let resp: ListingsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.listings()[0].retail_price, Some(135.50));
  }

  #[test]
  fn notes_text_lowercase_combines_both_fields() {
    let listing = Listing {
      id: 1,
      kind: "event".to_string(),
      retail_price: Some(10.0),
      available_quantity: Some(4),
      splits: vec![2],
      public_notes: Some("Will Be Rejected".to_string()),
      notes: Some("Extra".to_string()),
    };
    assert_eq!(listing.notes_text_lowercase(), "will be rejected extra");
  }
}
