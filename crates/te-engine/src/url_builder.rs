//! SEO URL / slug construction for an event. Pure function over
//! `te_models::Event`, fails closed when a required field is missing rather
//! than emitting a partially-formed URL.

use chrono_tz::Tz;
use te_models::Event;
use thiserror::Error;

/// Timezone applied when an event carries no `timezone` field of its own.
const DEFAULT_EVENT_TIMEZONE: Tz = chrono_tz::America::Chicago;

/// Fixed query string appended to every generated URL.
const FIXED_QUERY: &str = "listingsType=event&orderListBy=retail_price%20asc";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UrlBuildError {
  #[error("event is missing a venue")]
  MissingVenue,
  #[error("event is missing an occurs_at timestamp")]
  MissingOccursAt,
  #[error("event timezone {0:?} is not recognized")]
  UnknownTimezone(String),
}

/// Build the canonical SEO URL for `event`:
///
/// `<base>/events/<name>-tickets_<city>-<state>_<venue>_<dayName>-<dayNum>-<monthName>-at-<h:mm>-<am|pm>[_<cat>]/<id>?listingsType=event&orderListBy=retail_price%20asc&quantity=<n>`
///
/// Sections are underscore-separated; each section's own words are
/// hyphen-joined. The category section is omitted when the event carries
/// no category. The event id is its own path segment ahead of the fixed
/// query string.
pub fn build_event_url(event: &Event) -> Result<String, UrlBuildError> {
  let venue = event.venue.as_ref().ok_or(UrlBuildError::MissingVenue)?;
  let occurs_at = event.occurs_at.ok_or(UrlBuildError::MissingOccursAt)?;

  let tz = resolve_timezone(event.timezone.as_deref())?;
  let local = occurs_at.with_timezone(&tz);

  let name_section = format!("{}-tickets", slugify(&event.name));
  let city_state_section = city_state_slug(venue);
  let venue_section = venue.name.as_deref().filter(|s| !s.is_empty()).map(slugify).unwrap_or_default();
  let when_section = when_slug(&local);

  let mut sections = vec![name_section, city_state_section, venue_section, when_section];
  if let Some(category) = event.category.as_ref().and_then(|c| c.slug_source()) {
    sections.push(slugify(category));
  }

  Ok(format!(
    "{}/events/{}/{}?{}&quantity={}",
    te_core::DEFAULT_OLT_BASE_URL,
    sections.join("_"),
    event.id,
    FIXED_QUERY,
    te_core::OLT_URL_DEFAULT_QUANTITY,
  ))
}

fn resolve_timezone(timezone: Option<&str>) -> Result<Tz, UrlBuildError> {
  match timezone {
    None => Ok(DEFAULT_EVENT_TIMEZONE),
    Some(name) => name.parse::<Tz>().map_err(|_| UrlBuildError::UnknownTimezone(name.to_string())),
  }
}

fn city_state_slug(venue: &te_models::Venue) -> String {
  let city = venue.city.as_deref().filter(|s| !s.is_empty()).map(slugify).unwrap_or_default();
  let state = venue
    .state_code
    .as_deref()
    .filter(|s| !s.is_empty())
    .or(venue.state.as_deref().filter(|s| !s.is_empty()))
    .map(slugify)
    .unwrap_or_default();

  if state.is_empty() {
    city
  } else if city.is_empty() {
    state
  } else {
    format!("{city}-{state}")
  }
}

/// `<dayName>-<dayNum>-<monthName>-at-<h:mm>-<am|pm>`, rendered in the
/// event's local timezone. Day number has no leading zero; the hour is
/// 12-hour without a leading zero; am/pm is lowercase.
fn when_slug(local: &chrono::DateTime<Tz>) -> String {
  let day_name = local.format("%A").to_string().to_lowercase();
  let day_num = local.format("%-d").to_string();
  let month_name = local.format("%B").to_string().to_lowercase();
  let time = local.format("%-I:%M").to_string();
  let am_pm = local.format("%P").to_string();
  format!("{day_name}-{day_num}-{month_name}-at-{time}-{am_pm}")
}

/// Lowercase; `&` becomes `and`; parentheses are preserved; ` - ` (the
/// literal space-dash-space sequence) becomes a triple hyphen; any other
/// run of non-alphanumeric characters collapses to a single hyphen; leading
/// and trailing hyphens are stripped.
fn slugify(input: &str) -> String {
  const TRIPLE_HYPHEN_MARKER: char = '\u{E000}';

  let lowered = input.to_lowercase().replace('&', "and");
  let marked = lowered.replace(" - ", &TRIPLE_HYPHEN_MARKER.to_string());

  let mut slug = String::with_capacity(marked.len());
  let mut last_was_sep = true;

  for ch in marked.chars() {
    if ch == TRIPLE_HYPHEN_MARKER {
      slug.push_str("---");
      last_was_sep = true;
    } else if ch.is_ascii_alphanumeric() || ch == '(' || ch == ')' {
      slug.push(ch);
      last_was_sep = false;
    } else if !last_was_sep {
      slug.push('-');
      last_was_sep = true;
    }
  }

  slug.trim_matches('-').to_string()
}
