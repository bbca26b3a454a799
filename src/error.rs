//! Error types for fetching, parsing and persisting scraped articles.
//!
//! Only two of these ever reach a caller of the HTTP API:
//! [`UnknownSourceError`] (bad identifier) and [`FetchError`] (listing page
//! unreachable). [`DateParseError`] is always absorbed by the adapters and
//! [`SinkError`] is only logged.

use thiserror::Error;

/// Errors that can occur while retrieving a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure (DNS, connection reset, TLS, body decoding).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The per-request timeout elapsed.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Classify a reqwest error for `url`, separating timeouts from other
    /// transport failures.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Http {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// The requested source identifier has no registered adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no scraper available for source '{0}'")]
pub struct UnknownSourceError(pub String);

/// A date string did not match the source's expected format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse date '{input}': {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: &'static str,
}

impl DateParseError {
    pub fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Errors writing a source's JSON snapshot.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
