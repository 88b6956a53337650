//! QUOTESYNC — Quote Collection Agent with Periodic Remote Sync
//!
//! Entry point. Loads configuration, initialises structured logging,
//! restores the quote collection from disk (or seeds the defaults),
//! and runs the fetch→merge→persist loop with graceful shutdown.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use quotesync::config;
use quotesync::remote::placeholder::PlaceholderClient;
use quotesync::remote::RemoteProvider;
use quotesync::storage::{self, JsonFileStorage};
use quotesync::store::{pick_random, QuoteStore, ALL_CATEGORIES};
use quotesync::types::SyncReport;

const BANNER: &str = r#"
  ___  _   _  ___ _____ _____ ______   ___   _  ____
 / _ \| | | |/ _ \_   _| ____/ ___\ \ / / \ | |/ ___|
| | | | | | | | | || | |  _| \___ \\ V /|  \| | |
| |_| | |_| | |_| || | | |___ ___) || | | |\  | |___
 \__\_\\___/ \___/ |_| |_____|____/ |_| |_| \_|\____|

  Quote collection agent with periodic remote sync
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = config::AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        agent_name = %cfg.agent.name,
        sync_interval_secs = cfg.agent.sync_interval_secs,
        server_url = %cfg.remote.server_url,
        "QUOTESYNC starting up"
    );

    // -- Restore or seed the collection ----------------------------------

    let storage = JsonFileStorage::new(&cfg.storage.quotes_file);
    let mut store = QuoteStore::open(Box::new(storage))?;
    info!(
        quotes = store.len(),
        categories = store.categories().len(),
        "Collection ready"
    );

    // Restore the last selected category filter, defaulting to "all".
    let filter_path = Path::new(&cfg.storage.filter_file);
    let filter = storage::load_filter(filter_path)?.unwrap_or_else(|| ALL_CATEGORIES.to_string());
    info!(filter = %filter, "Category filter restored");

    // -- Remote provider ---------------------------------------------------

    let provider = PlaceholderClient::new(&cfg.remote.server_url, cfg.remote.fetch_limit)?;

    // Show a quote before the first sync, as a sign of life.
    show_random_quote(&store, &filter);

    // -- Main loop ---------------------------------------------------------

    let sync_interval = Duration::from_secs(cfg.agent.sync_interval_secs);
    let mut interval = tokio::time::interval(sync_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut cycle: u64 = 0;

    info!(
        interval_secs = cfg.agent.sync_interval_secs,
        "Entering sync loop. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                cycle += 1;
                match run_sync_cycle(&provider, &mut store, cycle).await {
                    Ok(report) => {
                        log_sync_report(&report);
                        if report.changed {
                            show_random_quote(&store, &filter);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Sync cycle failed — continuing to next");
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    // Remember the active filter for the next run.
    storage::save_filter(filter_path, &filter)?;
    info!(
        quotes = store.len(),
        cycles = cycle,
        "QUOTESYNC shut down cleanly."
    );

    Ok(())
}

/// Run a single fetch→merge→persist cycle.
async fn run_sync_cycle(
    provider: &dyn RemoteProvider,
    store: &mut QuoteStore,
    cycle: u64,
) -> Result<SyncReport> {
    info!(cycle, provider = provider.name(), "Starting sync cycle");

    let server_quotes = provider.fetch_remote_quotes().await;
    let report = store.merge_remote(&server_quotes)?;

    Ok(SyncReport {
        cycle,
        fetched: server_quotes.len(),
        added: report.added.len(),
        total: store.len(),
        changed: report.changed,
        completed_at: Utc::now(),
    })
}

/// Log a human-readable cycle summary.
fn log_sync_report(report: &SyncReport) {
    info!(
        cycle = report.cycle,
        fetched = report.fetched,
        added = report.added,
        total = report.total,
        changed = report.changed,
        "Sync cycle complete"
    );
}

/// Pick and log a random quote from the active filter.
fn show_random_quote(store: &QuoteStore, filter: &str) {
    let filtered = store.filtered_by(filter);
    match pick_random(&filtered) {
        Some(quote) => info!(%quote, filter, "Quote of the moment"),
        None => info!(filter, "No quotes available for this category"),
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quotesync=info"));

    let json_logging = std::env::var("QUOTESYNC_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
