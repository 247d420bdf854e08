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

//! # te-database-postgres
//!
//! PostgreSQL/Diesel persistence for the Ticket Pulse ingestion core.
//!
//! Provides connection pooling (`DatabaseContext`) and repositories for the
//! five entities the system tracks: events, hourly and daily price
//! aggregates, and poller runs (the single-writer lock + per-event outcome
//! log).
//!
//! ## Example
//!
//! ```ignore
//! use te_database_postgres::DatabaseContext;
//!
//! let db = DatabaseContext::new(&database_url)?;
//! let active = db.list_active_events().await?;
//! ```

pub mod connection;
pub mod models;
pub mod repositories;
pub mod repository;
pub mod schema;

pub use connection::establish_connection;
pub use repositories::LockOutcome;
pub use repository::{DatabaseContext, DbConnection, DbPool, RepositoryError, RepositoryResult};
