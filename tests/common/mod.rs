//! Shared fixtures for integration tests.

#![allow(dead_code)]

use bangla_news::dispatch::ScrapeDispatcher;
use bangla_news::fetch::HttpFetcher;
use bangla_news::registry::SourceRegistry;
use bangla_news::scrapers::Source;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Timeout short enough that a delayed mock response counts as a failure.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Dispatcher whose every source reads its listing from `mock_server`.
pub fn dispatcher_for(mock_server: &MockServer) -> ScrapeDispatcher {
    let overrides: HashMap<Source, String> = Source::ALL
        .into_iter()
        .map(|source| (source, format!("{}/{}/", mock_server.uri(), source.id())))
        .collect();
    let registry = SourceRegistry::with_base_urls(&overrides);
    let fetcher = HttpFetcher::new(TEST_TIMEOUT).expect("client builds");
    ScrapeDispatcher::new(Arc::new(registry), Arc::new(fetcher))
}

/// DBC-style listing with relative `/articles/{id}` links.
pub fn dbc_listing(ids: &[u32]) -> String {
    let links: String = ids
        .iter()
        .map(|id| format!(r#"<a href="/articles/{id}">খবর {id}</a>"#))
        .collect();
    format!("<html><body>{links}</body></html>")
}

pub fn dbc_article(title: &str) -> String {
    format!(
        r#"<html><body>
            <h1>{title}</h1>
            <span class="text-sm whitespace-nowrap">শুক্রবার ৯ই মে ২০২৫ ০১:০৫:৫১ অপরাহ্ন</span>
            <div class="article-content-wrapper"><p>বিস্তারিত</p></div>
        </body></html>"#
    )
}

pub async fn mount_page(mock_server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

/// Answer 200 after `delay`.
pub async fn mount_delayed_page(
    mock_server: &MockServer,
    route: &str,
    body: &str,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body).set_delay(delay))
        .mount(mock_server)
        .await;
}

/// Answer well after [`TEST_TIMEOUT`], so the fetch times out.
pub async fn mount_slow_page(mock_server: &MockServer, route: &str, body: &str) {
    mount_delayed_page(mock_server, route, body, TEST_TIMEOUT * 4).await;
}
