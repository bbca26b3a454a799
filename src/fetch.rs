//! Page fetching shared by every source adapter.
//!
//! Adapters never talk to reqwest directly; they receive a [`PageFetcher`]
//! so the dispatcher can share one pooled client across all concurrent
//! fetches and tests can substitute a scripted one.

use crate::error::FetchError;
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; bangla_news/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Retrieves the body of a page as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a pooled reqwest client with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        debug!(bytes = body.len(), preview = %truncate_for_log(&body, 80), "Fetched page");
        Ok(body)
    }
}
