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

//! The three TE endpoints this system consumes: listings for an event,
//! a single event's metadata, and the events belonging to a performer.

use crate::error::Result;
use crate::transport::Transport;
use te_models::{Event, EventsResponse, ListingsResponse};

/// `GET /v9/listings?event_id=<id>&type=event` — all ticket groups for an event.
pub async fn list_listings(transport: &Transport, event_id: i64) -> Result<ListingsResponse> {
  transport
    .get(
      "/v9/listings",
      &[("event_id".to_string(), event_id.to_string()), ("type".to_string(), "event".to_string())],
    )
    .await
}

/// `GET /v9/events/<id>` — a single event's metadata.
pub async fn get_event(transport: &Transport, event_id: i64) -> Result<Event> {
  transport.get(&format!("/v9/events/{event_id}"), &[]).await
}

/// `GET /v9/events?performer_id=<id>` — all events for a performer, used by
/// the metadata refresher to discover newly scheduled events.
pub async fn list_events_by_performer(transport: &Transport, performer_id: i64) -> Result<EventsResponse> {
  transport.get("/v9/events", &[("performer_id".to_string(), performer_id.to_string())]).await
}
