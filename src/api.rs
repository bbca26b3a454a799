//! HTTP API.
//!
//! | Route | Result |
//! |-------|--------|
//! | `GET /scrape/{source}[?url=...]` | JSON array of articles; 400/404/502 on error |
//! | `GET /scrape-all` | JSON object keyed by source id; each value an array or `{"error": ...}` |
//! | `GET /health` | liveness and version |
//!
//! Errors: 400 for a malformed `url`, 404 for an unknown source, 502 when the
//! listing page is unreachable.
//!
//! Successful scrapes are also written to `{data_dir}/{source}_news.json`.
//! A failed write is logged and does not change the response.

use crate::dispatch::ScrapeDispatcher;
use crate::error::{FetchError, UnknownSourceError};
use crate::models::{ArticleRecord, ScrapeReport, SourceOutcome};
use crate::outputs::json::write_source_articles;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};
use url::Url;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ScrapeDispatcher>,
    /// Directory receiving `{source}_news.json` snapshots.
    pub data_dir: PathBuf,
}

/// Errors surfaced to API clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    UnknownSource(#[from] UnknownSourceError),

    #[error("invalid listing url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnknownSource(_) => StatusCode::NOT_FOUND,
            ApiError::Fetch(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    /// Listing page to read instead of the source's default.
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/scrape/{source}", get(scrape_source))
        .route("/scrape-all", get(scrape_all))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(level = "info", skip(state, params))]
async fn scrape_source(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Query(params): Query<ScrapeParams>,
) -> Result<Json<Vec<ArticleRecord>>, ApiError> {
    let registry = state.dispatcher.registry();
    let adapter = match params.url.as_deref() {
        Some(url) => {
            let adapter = registry.resolve_with_base_url(&source, url)?;
            check_listing_url(url)?;
            adapter
        }
        None => registry.resolve(&source)?,
    };

    let articles = state.dispatcher.scrape_one(adapter.as_ref()).await?;
    save_snapshot(&state.data_dir, adapter.source().id(), &articles).await;
    Ok(Json(articles))
}

#[instrument(level = "info", skip_all)]
async fn scrape_all(State(state): State<AppState>) -> Json<ScrapeReport> {
    let report = state.dispatcher.scrape_all().await;
    for (source, outcome) in &report {
        if let SourceOutcome::Articles(articles) = outcome {
            save_snapshot(&state.data_dir, source, articles).await;
        }
    }
    Json(report)
}

/// Only absolute `http`/`https` URLs may replace a listing page.
fn check_listing_url(raw: &str) -> Result<(), ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

async fn save_snapshot(data_dir: &FsPath, source: &str, articles: &[ArticleRecord]) {
    if let Err(e) = write_source_articles(data_dir, source, articles).await {
        error!(%source, error = %e, "Failed to write JSON snapshot");
    }
}
