//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Serve scraped Bengali news over HTTP.
///
/// # Examples
///
/// ```sh
/// # Defaults: listen on 0.0.0.0:8000, write snapshots to ./data
/// bangla_news
///
/// # Parse every listed article and give slow sites more time
/// bangla_news --article-limit 0 --timeout-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address the HTTP API listens on
    #[arg(short, long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory receiving `{source}_news.json` snapshots
    #[arg(short, long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Per-request timeout for listing and article pages, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Articles parsed per source per run (0 parses every listed article)
    #[arg(long, env = "ARTICLE_LIMIT", default_value_t = 5)]
    pub article_limit: usize,

    /// Maximum concurrent article fetches per source
    #[arg(long, env = "MAX_CONCURRENT_FETCHES", default_value_t = 8)]
    pub max_concurrent_fetches: usize,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `None` when every listed article should be parsed.
    pub fn article_limit(&self) -> Option<usize> {
        (self.article_limit > 0).then_some(self.article_limit)
    }
}
