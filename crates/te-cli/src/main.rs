use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::sync::Arc;

use te_client::Transport;
use te_core::Config;
use te_database_postgres::DatabaseContext;
use te_engine::{enforce_retention, refresh_events, Poller, RefreshStatus};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "te-cli")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Run one hourly poll cycle: acquire the lock, fetch listings for every
  /// active event, and write the hourly price aggregate.
  Hourly,

  /// Print the stored daily price rollup for one event. Daily rollups are
  /// produced by an external process; this only reads what's on record.
  Daily {
    #[arg(long)]
    event_id: i64,
  },

  /// Refresh event metadata from Ticket Evolution for one event, an
  /// explicit set of events, or (with neither given) every tracked event.
  /// Prints the diff without writing it unless `--apply` is given.
  RefreshMetadata {
    #[arg(long)]
    event_id: Option<i64>,

    #[arg(long, value_delimiter = ',')]
    event_ids: Option<Vec<i64>>,

    /// Write the computed update instead of only printing the diff.
    #[arg(long)]
    apply: bool,
  },

  /// Delete hourly price rows for events past the retention horizon.
  Retention,
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv().ok();

  let cli = Cli::parse();

  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  let config = Config::from_env().context("loading configuration")?;
  let db = DatabaseContext::new(&config.database_url).context("connecting to database")?;
  let transport = Arc::new(Transport::new(&config).context("building TE transport")?);

  match cli.command {
    Commands::Hourly => run_hourly(&config, db, transport).await?,
    Commands::Daily { event_id } => run_daily(&db, event_id).await?,
    Commands::RefreshMetadata { event_id, event_ids, apply } => {
      run_refresh_metadata(&config, transport, db, event_id, event_ids, !apply).await?
    }
    Commands::Retention => run_retention(&config, &db).await?,
  }

  Ok(())
}

async fn run_hourly(config: &Config, db: DatabaseContext, transport: Arc<Transport>) -> Result<()> {
  let poller = Poller::new(db, transport, config.stale_lock_minutes, config.batch_size);
  let outcome = poller.run_hourly_poll(Utc::now()).await?;
  println!("{outcome:?}");
  Ok(())
}

async fn run_daily(db: &DatabaseContext, event_id: i64) -> Result<()> {
  let hourly = db.hourly_prices_for_event(event_id).await?;
  println!("stored hourly rows for event {event_id}: {}", hourly.len());
  for row in hourly {
    println!(
      "{} min={} avg={} max={} count={}",
      row.hour_bucket,
      format_price(row.min_price),
      format_price(row.avg_price),
      format_price(row.max_price),
      row.listing_count
    );
  }
  Ok(())
}

async fn run_refresh_metadata(
  config: &Config,
  transport: Arc<Transport>,
  db: DatabaseContext,
  event_id: Option<i64>,
  event_ids: Option<Vec<i64>>,
  dry_run: bool,
) -> Result<()> {
  let ids = if let Some(id) = event_id {
    vec![id]
  } else if let Some(ids) = event_ids {
    ids
  } else {
    db.list_all_events().await.context("listing tracked events")?.into_iter().map(|e| e.id).collect()
  };

  let reports = refresh_events(transport, db, ids, dry_run, config.batch_size).await?;
  for report in reports {
    if report.status == RefreshStatus::Error {
      println!("event {}: status=error {}", report.event_id, report.error.unwrap_or_default());
      continue;
    }
    if report.is_noop() {
      println!("event {}: no changes", report.event_id);
      continue;
    }
    for change in &report.changes {
      println!("event {}: {} {} -> {}", report.event_id, change.field, change.previous, change.next);
    }
    println!("event {}: applied={}", report.event_id, report.applied);
  }
  Ok(())
}

fn format_price(price: Option<f64>) -> String {
  price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string())
}

async fn run_retention(config: &Config, db: &DatabaseContext) -> Result<()> {
  let report = enforce_retention(db, Utc::now(), config.hourly_retention_days_after_end).await?;
  println!("deleted {} hourly rows before {}", report.rows_deleted, report.cutoff);
  Ok(())
}
