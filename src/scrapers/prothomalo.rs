//! Prothom Alo article scraper.
//!
//! Reads the "latest" collection of [Prothom Alo](https://www.prothomalo.com).
//! Story cards link through `a.title-link` (and `.headline-title a` on some
//! layouts). Article bodies are split across `.story-element-text` blocks and
//! the lead image is only reliably exposed through `og:image`.

use super::{Source, SourceAdapter, first_attr, first_text, joined_texts, resolve_link};
use crate::dates::parse_prothomalo_date;
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

static LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.title-link, .headline-title a").expect("static selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("static selector"));
static COVER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).expect("static selector"));
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("time").expect("static selector"));
static PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".story-element-text p").expect("static selector"));

/// Adapter for Prothom Alo.
#[derive(Debug, Clone)]
pub struct ProthomAloScraper {
    base_url: String,
}

impl ProthomAloScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl SourceAdapter for ProthomAloScraper {
    fn source(&self) -> Source {
        Source::ProthomAlo
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn extract_links(&self, html: &str) -> Vec<String> {
        let base = Url::parse(&self.base_url).ok();
        let document = Html::parse_document(html);
        document
            .select(&LINKS)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| resolve_link(base.as_ref(), href))
            .collect()
    }

    fn extract_article(&self, url: &str, html: &str) -> ArticleRecord {
        let document = Html::parse_document(html);

        let published_at = first_text(&document, &DATE).and_then(|raw| {
            parse_prothomalo_date(&raw)
                .inspect_err(|e| debug!(%url, error = %e, "Leaving publishedAt empty"))
                .ok()
        });

        ArticleRecord {
            title: first_text(&document, &TITLE),
            cover_img: first_attr(&document, &COVER, "content"),
            published_at,
            content: joined_texts(&document, &PARAGRAPHS, "\n"),
            ..ArticleRecord::new(url, self.source().id())
        }
    }
}
