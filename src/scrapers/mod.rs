//! News source adapters.
//!
//! Each adapter follows the same two-phase pattern:
//!
//! 1. **Listing**: fetch the source's listing page and extract article URLs
//! 2. **Article**: fetch one article page and extract an [`ArticleRecord`]
//!
//! # Supported Sources
//!
//! | Source | Id | Module | Listing page |
//! |--------|----|--------|--------------|
//! | Jamuna TV | `jamuna` | [`jamuna`] | `https://jamuna.tv/` |
//! | DBC News | `dbcnews` | [`dbcnews`] | `https://dbcnews.tv/articles` |
//! | Prothom Alo | `prothomalo` | [`prothomalo`] | `https://www.prothomalo.com/collection/latest` |
//!
//! # Common Patterns
//!
//! Adapters only implement the pure HTML steps ([`SourceAdapter::extract_links`]
//! and [`SourceAdapter::extract_article`]). Fetching is provided by the trait,
//! so every adapter fails the same way: a page that cannot be retrieved is a
//! [`FetchError`], anything missing from a page that *was* retrieved just
//! leaves a field empty.

pub mod dbcnews;
pub mod jamuna;
pub mod prothomalo;

use crate::error::{FetchError, UnknownSourceError};
use crate::fetch::PageFetcher;
use crate::models::ArticleRecord;
use crate::utils::collapse_whitespace;
use async_trait::async_trait;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// The closed set of supported news sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Jamuna,
    DbcNews,
    ProthomAlo,
}

impl Source {
    /// Every source, in registration order.
    pub const ALL: [Source; 3] = [Source::Jamuna, Source::DbcNews, Source::ProthomAlo];

    /// Short identifier used in URLs, file names and records.
    pub fn id(self) -> &'static str {
        match self {
            Source::Jamuna => "jamuna",
            Source::DbcNews => "dbcnews",
            Source::ProthomAlo => "prothomalo",
        }
    }

    /// The listing page scraped when no override is given.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Source::Jamuna => "https://jamuna.tv/",
            Source::DbcNews => "https://dbcnews.tv/articles",
            Source::ProthomAlo => "https://www.prothomalo.com/collection/latest",
        }
    }

    /// Build this source's adapter reading its listing from `base_url`.
    pub fn adapter(self, base_url: impl Into<String>) -> Arc<dyn SourceAdapter> {
        let base_url = base_url.into();
        match self {
            Source::Jamuna => Arc::new(jamuna::JamunaScraper::new(base_url)),
            Source::DbcNews => Arc::new(dbcnews::DbcNewsScraper::new(base_url)),
            Source::ProthomAlo => Arc::new(prothomalo::ProthomAloScraper::new(base_url)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Source {
    type Err = UnknownSourceError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Source::ALL
            .into_iter()
            .find(|source| source.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSourceError(s.to_string()))
    }
}

/// Everything specific to one news website.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Which source this adapter scrapes.
    fn source(&self) -> Source;

    /// The listing page this adapter reads.
    fn base_url(&self) -> &str;

    /// Extract absolute article URLs from the listing page, in document order.
    ///
    /// Duplicates are removed by [`SourceAdapter::get_article_links`].
    fn extract_links(&self, html: &str) -> Vec<String>;

    /// Extract a record from an article page. Missing pieces stay `None`.
    fn extract_article(&self, url: &str, html: &str) -> ArticleRecord;

    /// Fetch the listing page and return its unique article URLs.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the listing page cannot be retrieved.
    async fn get_article_links(
        &self,
        fetcher: &dyn PageFetcher,
    ) -> Result<Vec<String>, FetchError> {
        let html = fetcher.fetch_page(self.base_url()).await?;
        let links: Vec<String> = self.extract_links(&html).into_iter().unique().collect();

        info!(
            source = %self.source(),
            count = links.len(),
            base_url = %self.base_url(),
            "Indexed article URLs"
        );
        debug!(source = %self.source(), urls = ?links, "Article URLs");
        Ok(links)
    }

    /// Fetch one article page and extract its record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the page cannot be retrieved.
    async fn parse_article(
        &self,
        fetcher: &dyn PageFetcher,
        url: &str,
    ) -> Result<ArticleRecord, FetchError> {
        let html = fetcher.fetch_page(url).await?;
        let record = self.extract_article(url, &html);
        debug!(
            source = %self.source(),
            %url,
            has_title = record.title.is_some(),
            has_date = record.published_at.is_some(),
            content_bytes = record.content.as_deref().map_or(0, str::len),
            "Parsed article"
        );
        Ok(record)
    }
}

/// Resolve `href` against `base`, keeping only http(s) results.
pub(crate) fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Whitespace-collapsed text of an element, `None` when blank.
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = collapse_whitespace(&element.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Text of the first element matching `selector`.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}

/// Attribute of the first element matching `selector`, `None` when blank.
pub(crate) fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Non-blank texts of every element matching `selector`, joined by `separator`.
pub(crate) fn joined_texts(
    document: &Html,
    selector: &Selector,
    separator: &str,
) -> Option<String> {
    let joined = document
        .select(selector)
        .filter_map(element_text)
        .collect::<Vec<_>>()
        .join(separator);
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_str_case_insensitive() {
        assert_eq!("jamuna".parse::<Source>().unwrap(), Source::Jamuna);
        assert_eq!("DBCNews".parse::<Source>().unwrap(), Source::DbcNews);
        assert_eq!(" ProthomAlo ".parse::<Source>().unwrap(), Source::ProthomAlo);
    }

    #[test]
    fn test_source_from_str_unknown() {
        let err = "bbc".parse::<Source>().unwrap_err();
        assert_eq!(err, UnknownSourceError("bbc".to_string()));
    }

    #[test]
    fn test_source_ids_unique_and_adapter_matches() {
        let ids: Vec<_> = Source::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["jamuna", "dbcnews", "prothomalo"]);
        for source in Source::ALL {
            let adapter = source.adapter(source.default_base_url());
            assert_eq!(adapter.source(), source);
            assert_eq!(adapter.base_url(), source.default_base_url());
        }
    }

    #[test]
    fn test_resolve_link() {
        let base = Url::parse("https://dbcnews.tv/articles").unwrap();
        assert_eq!(
            resolve_link(Some(&base), "/articles/123"),
            Some("https://dbcnews.tv/articles/123".to_string())
        );
        assert_eq!(
            resolve_link(Some(&base), "https://other.tv/x"),
            Some("https://other.tv/x".to_string())
        );
        assert_eq!(resolve_link(Some(&base), "mailto:desk@dbcnews.tv"), None);
        assert_eq!(resolve_link(Some(&base), "#top"), None);
        assert_eq!(resolve_link(None, "/relative"), None);
    }

    #[test]
    fn test_text_helpers() {
        let document = Html::parse_document(
            "<div><p> এক </p><p>  </p><p>দুই\n তিন</p><img class='x' src=' a.jpg '></div>",
        );
        let p = Selector::parse("p").unwrap();
        let img = Selector::parse("img.x").unwrap();
        let missing = Selector::parse("h1").unwrap();

        assert_eq!(first_text(&document, &p).as_deref(), Some("এক"));
        assert_eq!(joined_texts(&document, &p, "\n").as_deref(), Some("এক\nদুই তিন"));
        assert_eq!(first_attr(&document, &img, "src").as_deref(), Some("a.jpg"));
        assert_eq!(first_text(&document, &missing), None);
        assert_eq!(joined_texts(&document, &missing, "\n"), None);
    }
}
