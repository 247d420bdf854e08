//! # te-models
//!
//! Wire payload types for the Ticket Evolution (TE) `/listings` and
//! `/events` endpoints, plus lenient deserialization helpers for fields TE
//! renders inconsistently (sometimes a JSON number, sometimes the same value
//! as a string).

pub mod common;
pub mod event;
pub mod listing;

pub use common::{lenient_f64, lenient_i64};
pub use event::{Category, Event, EventsResponse, Venue};
pub use listing::{Listing, ListingsResponse};
