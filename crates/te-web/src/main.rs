use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use te_client::Transport;
use te_core::Config;
use te_database_postgres::DatabaseContext;

mod handlers;
mod state;

use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt().with_env_filter("info").init();

  let config = Config::from_env().expect("loading configuration");
  let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

  let db = DatabaseContext::new(&config.database_url).expect("connecting to database");
  let transport = Arc::new(Transport::new(&config).expect("building TE transport"));

  let state = web::Data::new(AppState::new(db, transport, config));

  tracing::info!(%bind_addr, "starting ticket pulse web trigger server");

  HttpServer::new(move || App::new().app_data(state.clone()).configure(handlers::configure))
    .bind(&bind_addr)?
    .run()
    .await
}
