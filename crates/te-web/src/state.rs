//! Shared application state handed to every handler via `web::Data`.

use std::sync::Arc;

use te_client::Transport;
use te_core::Config;
use te_database_postgres::DatabaseContext;

pub struct AppState {
  pub db: DatabaseContext,
  pub transport: Arc<Transport>,
  pub config: Config,
}

impl AppState {
  pub fn new(db: DatabaseContext, transport: Arc<Transport>, config: Config) -> Self {
    Self { db, transport, config }
  }
}
