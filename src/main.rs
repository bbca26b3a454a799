//! # Bangla News
//!
//! HTTP service that scrapes Bengali news sites on demand.
//!
//! ## Usage
//!
//! ```sh
//! bangla_news --bind 0.0.0.0:8000 --data-dir ./data
//! curl localhost:8000/scrape/jamuna
//! curl localhost:8000/scrape-all
//! ```

use bangla_news::api::{self, AppState};
use bangla_news::cli::Cli;
use bangla_news::dispatch::ScrapeDispatcher;
use bangla_news::fetch::HttpFetcher;
use bangla_news::registry::SourceRegistry;
use bangla_news::utils::ensure_writable_dir;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir.display(),
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let registry = Arc::new(SourceRegistry::new());
    let fetcher = Arc::new(HttpFetcher::new(args.timeout())?);
    let dispatcher = ScrapeDispatcher::new(Arc::clone(&registry), fetcher)
        .with_article_limit(args.article_limit())
        .with_max_concurrent_fetches(args.max_concurrent_fetches);
    info!(
        sources = ?registry.ids(),
        timeout_secs = args.timeout_secs,
        article_limit = ?args.article_limit(),
        "bangla_news starting up"
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        data_dir: args.data_dir.clone(),
    };
    api::serve(args.bind, state).await?;

    info!("Shut down cleanly");
    Ok(())
}
