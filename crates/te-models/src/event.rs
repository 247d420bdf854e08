//! TE event and venue payloads, used by the metadata refresher and the
//! SEO URL builder.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
  pub name: Option<String>,
  pub city: Option<String>,
  pub state: Option<String>,
  #[serde(rename = "state_code")]
  pub state_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
  pub name: Option<String>,
  pub slug: Option<String>,
  #[serde(rename = "short_name")]
  pub short_name: Option<String>,
}

impl Category {
  /// The label used to build the event's SEO slug: `short_name`, falling
  /// back to `slug`, falling back to `name`.
  pub fn slug_source(&self) -> Option<&str> {
    self
      .short_name
      .as_deref()
      .filter(|s| !s.is_empty())
      .or(self.slug.as_deref().filter(|s| !s.is_empty()))
      .or(self.name.as_deref().filter(|s| !s.is_empty()))
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
  pub id: i64,
  pub name: String,
  pub occurs_at: Option<DateTime<Utc>>,
  pub venue: Option<Venue>,
  pub category: Option<Category>,
  pub taxonomy: Option<String>,
  pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
  #[serde(default)]
  pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_slug_source_prefers_short_name() {
    let category = Category {
      name: Some("Concerts".to_string()),
      slug: Some("concerts".to_string()),
      short_name: Some("concert".to_string()),
    };
    assert_eq!(category.slug_source(), Some("concert"));
  }

  #[test]
  fn category_slug_source_falls_back_to_slug_then_name() {
    let only_slug = Category { name: Some("Concerts".to_string()), slug: Some("concerts".to_string()), short_name: None };
    assert_eq!(only_slug.slug_source(), Some("concerts"));

    let only_name = Category { name: Some("Concerts".to_string()), slug: None, short_name: None };
    assert_eq!(only_name.slug_source(), Some("Concerts"));
  }

  #[test]
  fn category_slug_source_skips_empty_strings() {
    let category = Category {
      name: Some("Concerts".to_string()),
      slug: Some("".to_string()),
      short_name: Some("".to_string()),
    };
    assert_eq!(category.slug_source(), Some("Concerts"));
  }

  #[test]
  fn deserializes_minimal_event() {
    let json = r#"{"id": 42, "name": "Test Event"}"#;
    let event: Event = serde_json::from_str(json).unwrap();
    assert_eq!(event.id, 42);
    assert!(event.occurs_at.is_none());
    assert!(event.venue.is_none());
  }

  #[test]
  fn events_response_defaults_to_empty() {
    let resp: EventsResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.events.is_empty());
  }
}
