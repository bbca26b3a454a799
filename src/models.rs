//! Data models for scraped articles and aggregated scrape results.
//!
//! - [`ArticleRecord`]: one normalized article, identical across sources
//! - [`SourceOutcome`]: one source's entry in a scrape-all report
//! - [`ScrapeReport`]: per-source outcomes keyed by source identifier
//!
//! Optional fields serialize as empty strings so the JSON shape stays the
//! same whether or not extraction succeeded.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A single scraped article.
///
/// `url` and `source` are always set. Every other field is best-effort and
/// left as `None` when the page did not yield it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Canonical article URL.
    pub url: String,
    /// Headline.
    #[serde(
        default,
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty"
    )]
    pub title: Option<String>,
    /// Lead image URL.
    #[serde(
        default,
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty"
    )]
    pub cover_img: Option<String>,
    /// Publication time as ISO-8601 local date-time (`YYYY-MM-DDTHH:MM:SS`).
    #[serde(
        default,
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty"
    )]
    pub published_at: Option<String>,
    /// Body text, paragraphs separated by newlines.
    #[serde(
        default,
        serialize_with = "empty_if_none",
        deserialize_with = "none_if_empty"
    )]
    pub content: Option<String>,
    /// Source identifier, e.g. `"jamuna"`.
    pub source: String,
}

impl ArticleRecord {
    /// A record with only the mandatory fields populated.
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            cover_img: None,
            published_at: None,
            content: None,
            source: source.into(),
        }
    }
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn none_if_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Error descriptor reported for a source whose listing page failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub error: String,
}

/// Outcome of scraping one source during a scrape-all run.
///
/// Serializes untagged: either the article array or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceOutcome {
    Articles(Vec<ArticleRecord>),
    Failed(SourceFailure),
}

impl SourceOutcome {
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed(SourceFailure {
            error: error.to_string(),
        })
    }

    pub fn articles(&self) -> Option<&[ArticleRecord]> {
        match self {
            Self::Articles(articles) => Some(articles),
            Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-source results of a scrape-all run, keyed by source identifier.
pub type ScrapeReport = BTreeMap<String, SourceOutcome>;
