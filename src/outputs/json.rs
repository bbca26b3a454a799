//! JSON snapshot files, one per source.
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── jamuna_news.json
//! ├── dbcnews_news.json
//! └── prothomalo_news.json
//! ```
//!
//! Each file holds the latest scrape of that source and is overwritten on
//! every run. Nothing reads these files back.

use crate::error::SinkError;
use crate::models::ArticleRecord;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Path of the snapshot file for `source` inside `data_dir`.
pub fn snapshot_path(data_dir: &Path, source: &str) -> PathBuf {
    data_dir.join(format!("{source}_news.json"))
}

/// Write `articles` as a pretty-printed JSON array to `{data_dir}/{source}_news.json`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display(), %source))]
pub async fn write_source_articles(
    data_dir: &Path,
    source: &str,
    articles: &[ArticleRecord],
) -> Result<PathBuf, SinkError> {
    let json = serde_json::to_string_pretty(articles)?;

    fs::create_dir_all(data_dir).await?;
    let path = snapshot_path(data_dir, source);
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = articles.len(), "Wrote JSON snapshot");

    Ok(path)
}
