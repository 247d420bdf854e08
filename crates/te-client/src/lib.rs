#![warn(clippy::all)]

//! # te-client
//!
//! Signed HTTP client for the Ticket Evolution (TE) listings/events API.
//!
//! - [`signer`] — HMAC-SHA256 request signing
//! - [`transport`] — retrying, signed GET transport
//! - [`endpoints`] — the three TE endpoints this system consumes
//! - [`error`] — the [`TeError`] classification

pub mod endpoints;
pub mod error;
pub mod signer;
pub mod transport;

pub use endpoints::{get_event, list_events_by_performer, list_listings};
pub use error::{Result, TeError};
pub use signer::{CanonicalRequest, Signer};
pub use transport::Transport;
