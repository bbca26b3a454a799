//! Jamuna TV article scraper.
//!
//! Scrapes [Jamuna TV](https://jamuna.tv), a WordPress site. The homepage
//! links stories through `.headline-link` and `.entry-title a`; only
//! absolute links are taken since relative ones point at category pages.

use super::{Source, SourceAdapter, first_attr, first_text, joined_texts, resolve_link};
use crate::dates::parse_jamuna_date;
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static LINK_SELECTORS: Lazy<[Selector; 2]> = Lazy::new(|| {
    [
        Selector::parse(".headline-link").expect("static selector"),
        Selector::parse(".entry-title a").expect("static selector"),
    ]
});
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.story-title.entry-title").expect("static selector"));
static COVER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img.wp-post-image").expect("static selector"));
static DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.date time").expect("static selector"));
static PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".article-content p").expect("static selector"));

/// Adapter for Jamuna TV.
#[derive(Debug, Clone)]
pub struct JamunaScraper {
    base_url: String,
}

impl JamunaScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl SourceAdapter for JamunaScraper {
    fn source(&self) -> Source {
        Source::Jamuna
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn extract_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        LINK_SELECTORS
            .iter()
            .flat_map(|selector| document.select(selector))
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| href.starts_with("http"))
            .filter_map(|href| resolve_link(None, href))
            .collect()
    }

    fn extract_article(&self, url: &str, html: &str) -> ArticleRecord {
        let document = Html::parse_document(html);

        let published_at = first_text(&document, &DATE).and_then(|raw| {
            parse_jamuna_date(&raw)
                .inspect_err(|e| debug!(%url, error = %e, "Leaving publishedAt empty"))
                .ok()
        });

        ArticleRecord {
            title: first_text(&document, &TITLE),
            cover_img: first_attr(&document, &COVER, "src"),
            published_at,
            content: joined_texts(&document, &PARAGRAPHS, "\n"),
            ..ArticleRecord::new(url, self.source().id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<html><body>
        <a class="headline-link" href="https://jamuna.tv/news/101">প্রথম</a>
        <h2 class="entry-title"><a href="https://jamuna.tv/news/102">দ্বিতীয়</a></h2>
        <a class="headline-link" href="/category/national">জাতীয়</a>
        <h2 class="entry-title"><a href="https://jamuna.tv/news/101">আবার প্রথম</a></h2>
        <a href="https://jamuna.tv/news/999">not a headline</a>
    </body></html>"#;

    const ARTICLE: &str = r#"<html><body>
        <h1 class="story-title entry-title"> ঢাকায় ভারী বৃষ্টি </h1>
        <span class="date"><time>22nd June 2024, 6:30 PM</time></span>
        <img class="attachment-full wp-post-image" src="https://jamuna.tv/wp-content/uploads/rain.jpg">
        <div class="article-content">
            <p>প্রথম অনুচ্ছেদ।</p>
            <p>   </p>
            <p>দ্বিতীয় অনুচ্ছেদ।</p>
        </div>
    </body></html>"#;

    #[test]
    fn test_extract_links_absolute_only_selector_order() {
        let scraper = JamunaScraper::new(Source::Jamuna.default_base_url());
        let links = scraper.extract_links(LISTING);
        assert_eq!(
            links,
            vec![
                "https://jamuna.tv/news/101",
                "https://jamuna.tv/news/102",
                "https://jamuna.tv/news/101",
            ]
        );
    }

    #[test]
    fn test_extract_article_full() {
        let scraper = JamunaScraper::new(Source::Jamuna.default_base_url());
        let record = scraper.extract_article("https://jamuna.tv/news/101", ARTICLE);

        assert_eq!(record.url, "https://jamuna.tv/news/101");
        assert_eq!(record.source, "jamuna");
        assert_eq!(record.title.as_deref(), Some("ঢাকায় ভারী বৃষ্টি"));
        assert_eq!(
            record.cover_img.as_deref(),
            Some("https://jamuna.tv/wp-content/uploads/rain.jpg")
        );
        assert_eq!(record.published_at.as_deref(), Some("2024-06-22T18:30:00"));
        assert_eq!(record.content.as_deref(), Some("প্রথম অনুচ্ছেদ।\nদ্বিতীয় অনুচ্ছেদ।"));
    }

    #[test]
    fn test_extract_article_partial() {
        let scraper = JamunaScraper::new(Source::Jamuna.default_base_url());
        let html = r#"<h1 class="story-title entry-title">শুধু শিরোনাম</h1>
            <span class="date"><time>কিছুক্ষণ আগে</time></span>"#;
        let record = scraper.extract_article("https://jamuna.tv/news/7", html);

        assert_eq!(record.title.as_deref(), Some("শুধু শিরোনাম"));
        assert_eq!(record.published_at, None);
        assert_eq!(record.cover_img, None);
        assert_eq!(record.content, None);
        assert_eq!(record.source, "jamuna");
    }
}
