//! DBC News article scraper.
//!
//! [DBC News](https://dbcnews.tv) is a Next.js site. Article links are
//! relative (`/articles/<id>`) and cover images are usually served through
//! the Next.js image optimizer (`/_next/image?url=<encoded>&w=...`), so the
//! real image URL has to be unwrapped from the query string.
//!
//! Dates are printed either absolutely (`শুক্রবার ৯ই মে ২০২৫ ০১:০৫:৫১ অপরাহ্ন`)
//! or relatively (`৩ ঘন্টা আগে`); see [`parse_dbcnews_date`].

use super::{Source, SourceAdapter, element_text, first_text, resolve_link};
use crate::dates::parse_dbcnews_date;
use crate::models::ArticleRecord;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("static selector"));
static SUBTITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("static selector"));
static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").expect("static selector"));
static DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.text-sm.whitespace-nowrap").expect("static selector"));
static PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.article-content-wrapper p").expect("static selector"));
static NEXT_IMAGE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"url=([^&]+)").expect("static regex"));

const IMAGE_HOST: &str = "api.dbcnews.tv";

/// Adapter for DBC News.
#[derive(Debug, Clone)]
pub struct DbcNewsScraper {
    base_url: String,
}

impl DbcNewsScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Unwrap a Next.js optimizer URL to the original image; pass others through.
fn unwrap_image_src(src: &str) -> Option<String> {
    if src.starts_with("/_next/image") {
        let encoded = NEXT_IMAGE_URL.captures(src)?.get(1)?.as_str();
        urlencoding::decode(encoded).ok().map(|s| s.into_owned())
    } else {
        Some(src.to_string())
    }
}

impl SourceAdapter for DbcNewsScraper {
    fn source(&self) -> Source {
        Source::DbcNews
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn extract_links(&self, html: &str) -> Vec<String> {
        let base = Url::parse(&self.base_url).ok();
        let document = Html::parse_document(html);
        document
            .select(&ANCHORS)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| href.contains("/articles/"))
            .filter_map(|href| resolve_link(base.as_ref(), href))
            .collect()
    }

    fn extract_article(&self, url: &str, html: &str) -> ArticleRecord {
        let document = Html::parse_document(html);

        let subtitle = first_text(&document, &SUBTITLE);
        let paragraphs = document.select(&PARAGRAPHS).filter_map(element_text);
        let content = subtitle.into_iter().chain(paragraphs).collect::<Vec<_>>().join("\n\n");

        let cover_img = document
            .select(&IMAGES)
            .filter_map(|el| el.value().attr("src"))
            .find(|src| src.contains(IMAGE_HOST))
            .and_then(unwrap_image_src);

        let now = Local::now().naive_local();
        let published_at = first_text(&document, &DATE).and_then(|raw| {
            parse_dbcnews_date(&raw, now)
                .inspect_err(|e| debug!(%url, error = %e, "Leaving publishedAt empty"))
                .ok()
        });

        ArticleRecord {
            title: first_text(&document, &TITLE),
            cover_img,
            published_at,
            content: (!content.is_empty()).then_some(content),
            ..ArticleRecord::new(url, self.source().id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<html><body>
        <a href="/articles/501">এক</a>
        <a href="/about">আমাদের সম্পর্কে</a>
        <a href="https://dbcnews.tv/articles/502">দুই</a>
        <a href="/articles/501">এক আবার</a>
        <a href="/video/77">ভিডিও</a>
    </body></html>"#;

    const ARTICLE: &str = r#"<html><body>
        <h1>বাজেট ঘোষণা</h1>
        <h3>সংসদে নতুন বাজেট পেশ</h3>
        <img src="/logo.svg">
        <img src="/_next/image?url=https%3A%2F%2Fapi.dbcnews.tv%2Fuploads%2Fbudget.jpg&amp;w=1080&amp;q=75">
        <span class="text-sm whitespace-nowrap">শুক্রবার ৯ই মে ২০২৫ ০১:০৫:৫১ অপরাহ্ন</span>
        <div class="article-content-wrapper">
            <p>প্রথম লাইন।</p>
            <p></p>
            <p>দ্বিতীয় লাইন।</p>
        </div>
    </body></html>"#;

    #[test]
    fn test_extract_links_resolves_relative() {
        let scraper = DbcNewsScraper::new(Source::DbcNews.default_base_url());
        let links = scraper.extract_links(LISTING);
        assert_eq!(
            links,
            vec![
                "https://dbcnews.tv/articles/501",
                "https://dbcnews.tv/articles/502",
                "https://dbcnews.tv/articles/501",
            ]
        );
    }

    #[test]
    fn test_extract_article_full() {
        let scraper = DbcNewsScraper::new(Source::DbcNews.default_base_url());
        let record = scraper.extract_article("https://dbcnews.tv/articles/501", ARTICLE);

        assert_eq!(record.source, "dbcnews");
        assert_eq!(record.title.as_deref(), Some("বাজেট ঘোষণা"));
        assert_eq!(
            record.cover_img.as_deref(),
            Some("https://api.dbcnews.tv/uploads/budget.jpg")
        );
        assert_eq!(record.published_at.as_deref(), Some("2025-05-09T13:05:51"));
        assert_eq!(
            record.content.as_deref(),
            Some("সংসদে নতুন বাজেট পেশ\n\nপ্রথম লাইন।\n\nদ্বিতীয় লাইন।")
        );
    }

    #[test]
    fn test_unwrap_image_src() {
        assert_eq!(
            unwrap_image_src("https://api.dbcnews.tv/a.jpg").as_deref(),
            Some("https://api.dbcnews.tv/a.jpg")
        );
        assert_eq!(unwrap_image_src("/_next/image?w=1080"), None);
    }

    #[test]
    fn test_extract_article_empty_page() {
        let scraper = DbcNewsScraper::new(Source::DbcNews.default_base_url());
        let record = scraper.extract_article("https://dbcnews.tv/articles/1", "<html></html>");
        assert_eq!(record.url, "https://dbcnews.tv/articles/1");
        assert_eq!(record.title, None);
        assert_eq!(record.cover_img, None);
        assert_eq!(record.published_at, None);
        assert_eq!(record.content, None);
    }
}
