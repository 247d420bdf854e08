/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Request signing for the Ticket Evolution API.
//!
//! TE authenticates requests with an `X-Signature` header computed as
//! `base64(HMAC-SHA256(secret, canonical_string))`, where the canonical
//! string is `METHOD host+path?query` — a single space between the method
//! and the hostname, the path concatenated directly onto the hostname, with
//! query pairs percent-encoded and sorted lexicographically by key. The
//! trailing `?` is part of the signed string even when there is no query
//! string at all — omitting it produces a signature TE will reject.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Characters left unescaped, matching RFC 3986's unreserved set. Notably
/// this encodes a literal space as `%20`, never `+`.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

fn percent_encode_component(value: &str) -> String {
  utf8_percent_encode(value, UNRESERVED).to_string()
}

/// The exact string TE signs requests over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
  pub method: String,
  pub host: String,
  pub path: String,
  pub query: Vec<(String, String)>,
}

impl CanonicalRequest {
  pub fn new(method: &str, host: &str, path: &str, query: &[(String, String)]) -> Self {
    let mut query = query.to_vec();
    query.sort_by(|a, b| a.0.cmp(&b.0));
    Self { method: method.to_uppercase(), host: host.to_string(), path: path.to_string(), query }
  }

  /// Render the canonical string. Always ends the path segment with `?`,
  /// even when `query` is empty.
  pub fn build(&self) -> String {
    let encoded_query = self
      .query
      .iter()
      .map(|(k, v)| format!("{}={}", percent_encode_component(k), percent_encode_component(v)))
      .collect::<Vec<_>>()
      .join("&");

    format!("{} {}{}?{}", self.method, self.host, self.path, encoded_query)
  }
}

/// Signs canonical requests with a TE API secret.
pub struct Signer {
  secret: String,
}

impl Signer {
  pub fn new(secret: impl Into<String>) -> Self {
    Self { secret: secret.into() }
  }

  /// Compute the base64-encoded `X-Signature` header value for a request.
  pub fn sign(&self, method: &str, host: &str, path: &str, query: &[(String, String)]) -> String {
    let canonical = CanonicalRequest::new(method, host, path, query).build();
    self.sign_canonical(&canonical)
  }

  fn sign_canonical(&self, canonical: &str) -> String {
    let mut mac =
      HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts a key of any length");
    mac.update(canonical.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn canonical_string_is_method_space_host_path_query() {
    let query = vec![("event_id".to_string(), "9".to_string())];
    let canonical = CanonicalRequest::new("get", "api.ticketevolution.com", "/v9/listings", &query).build();
    assert_eq!(canonical, "GET api.ticketevolution.com/v9/listings?event_id=9");
  }

  #[test]
  fn canonical_string_always_has_trailing_question_mark() {
    let canonical = CanonicalRequest::new("GET", "api.ticketevolution.com", "/v9/listings", &[]).build();
    assert!(canonical.ends_with('?'), "canonical string must end with ? even with no query params");
  }

  #[test]
  fn canonical_string_sorts_query_keys_lexicographically() {
    let query = vec![("event_id".to_string(), "9".to_string()), ("per_page".to_string(), "100".to_string())];
    let canonical = CanonicalRequest::new("GET", "api.ticketevolution.com", "/v9/listings", &query).build();
    let query_part = canonical.rsplit('?').next().unwrap();
    assert_eq!(query_part, "event_id=9&per_page=100");
  }

  #[test]
  fn canonical_string_sort_is_independent_of_input_order() {
    let forward = vec![("b".to_string(), "1".to_string()), ("a".to_string(), "2".to_string())];
    let reversed = vec![("a".to_string(), "2".to_string()), ("b".to_string(), "1".to_string())];
    let built_forward = CanonicalRequest::new("GET", "h", "/p", &forward).build();
    let built_reversed = CanonicalRequest::new("GET", "h", "/p", &reversed).build();
    assert_eq!(built_forward, built_reversed);
  }

  #[test]
  fn percent_encoding_uses_percent20_not_plus_for_space() {
    let query = vec![("q".to_string(), "hello world".to_string())];
    let canonical = CanonicalRequest::new("GET", "h", "/p", &query).build();
    assert!(canonical.contains("hello%20world"));
    assert!(!canonical.contains('+'));
  }

  #[test]
  fn sign_is_deterministic_for_the_same_inputs() {
    let signer = Signer::new("top-secret");
    let a = signer.sign("GET", "api.ticketevolution.com", "/v9/listings", &[]);
    let b = signer.sign("GET", "api.ticketevolution.com", "/v9/listings", &[]);
    assert_eq!(a, b);
  }

  #[test]
  fn sign_differs_when_secret_differs() {
    let a = Signer::new("secret-a").sign("GET", "h", "/p", &[]);
    let b = Signer::new("secret-b").sign("GET", "h", "/p", &[]);
    assert_ne!(a, b);
  }

  #[test]
  fn sign_differs_when_canonical_request_differs() {
    let signer = Signer::new("secret");
    let a = signer.sign("GET", "h", "/v9/listings", &[]);
    let b = signer.sign("GET", "h", "/v9/events/1", &[]);
    assert_ne!(a, b);
  }

  #[test]
  fn sign_output_is_valid_base64() {
    let signer = Signer::new("secret");
    let sig = signer.sign("GET", "h", "/p", &[]);
    assert!(BASE64.decode(sig).is_ok());
  }
}
