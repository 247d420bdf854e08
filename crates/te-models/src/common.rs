//! Lenient deserialization helpers for fields the TE API sometimes renders as
//! a JSON string and sometimes as a JSON number.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may arrive as a JSON number or a numeric string
/// into an `f64`. Returns `None` for null, missing, or unparseable values —
/// callers treat an unparseable price the same as an absent one.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Num(f64),
    Str(String),
    Null,
  }

  Ok(match Option::<Raw>::deserialize(deserializer)? {
    Some(Raw::Num(n)) => Some(n),
    Some(Raw::Str(s)) => s.trim().parse::<f64>().ok(),
    Some(Raw::Null) | None => None,
  })
}

/// Deserialize a field that may arrive as a JSON number or a numeric string
/// into an `i64`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Num(i64),
    Str(String),
    Null,
  }

  Ok(match Option::<Raw>::deserialize(deserializer)? {
    Some(Raw::Num(n)) => Some(n),
    Some(Raw::Str(s)) => s.trim().parse::<i64>().ok(),
    Some(Raw::Null) | None => None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[derive(Deserialize)]
  struct Wrapper {
    #[serde(default, deserialize_with = "lenient_f64")]
    value: Option<f64>,
  }

  #[test]
  fn lenient_f64_accepts_number() {
    let w: Wrapper = serde_json::from_value(json!({"value": 135.5})).unwrap();
    assert_eq!(w.value, Some(135.5));
  }

  #[test]
  fn lenient_f64_accepts_string() {
    let w: Wrapper = serde_json::from_value(json!({"value": "135.50"})).unwrap();
    assert_eq!(w.value, Some(135.50));
  }

  #[test]
  fn lenient_f64_rejects_garbage_as_none() {
    let w: Wrapper = serde_json::from_value(json!({"value": "not-a-number"})).unwrap();
    assert_eq!(w.value, None);
  }

  #[test]
  fn lenient_f64_missing_is_none() {
    let w: Wrapper = serde_json::from_value(json!({})).unwrap();
    assert_eq!(w.value, None);
  }
}
