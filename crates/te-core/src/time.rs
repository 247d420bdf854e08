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

//! UTC hour-bucket arithmetic.
//!
//! The hour bucket is both the aggregation key for `HourlyPrice` rows and the
//! lock identity for a `PollerRun`.

use chrono::{DateTime, Timelike, Utc};

/// Truncate an instant to the top of its UTC hour.
///
/// Idempotent: `truncate_to_hour_utc(truncate_to_hour_utc(t)) ==
/// truncate_to_hour_utc(t)`, and maps every instant in `[H, H+1h)` to `H`.
pub fn truncate_to_hour_utc(instant: DateTime<Utc>) -> DateTime<Utc> {
  instant.with_minute(0).and_then(|t| t.with_second(0)).and_then(|t| t.with_nanosecond(0)).expect(
    "truncating minute/second/nanosecond components to zero is always a valid DateTime",
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn truncate_is_idempotent() {
    let t = Utc::now();
    let once = truncate_to_hour_utc(t);
    let twice = truncate_to_hour_utc(once);
    assert_eq!(once, twice);
  }

  #[test]
  fn truncate_maps_whole_hour_window_to_same_bucket() {
    let h = "2026-07-28T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
    for offset_secs in [0, 1, 1799, 3599] {
      let instant = h + Duration::seconds(offset_secs);
      assert_eq!(truncate_to_hour_utc(instant), h);
    }
  }

  #[test]
  fn truncate_does_not_bleed_into_next_hour() {
    let h = "2026-07-28T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let next = h + Duration::hours(1);
    let instant = h + Duration::seconds(3600);
    assert_eq!(truncate_to_hour_utc(instant), next);
  }

  #[test]
  fn truncate_clears_sub_minute_precision() {
    let t = "2026-07-28T14:37:52.123Z".parse::<DateTime<Utc>>().unwrap();
    let bucket = truncate_to_hour_utc(t);
    assert_eq!(bucket.minute(), 0);
    assert_eq!(bucket.second(), 0);
    assert_eq!(bucket.nanosecond(), 0);
    assert_eq!(bucket.hour(), 14);
  }
}
