//! # Bangla News
//!
//! Scrapes article listings and article bodies from Bengali news websites
//! (Jamuna TV, DBC News, Prothom Alo), normalizes every article into an
//! [`models::ArticleRecord`], and serves the results over HTTP while writing a
//! JSON snapshot per source to disk.
//!
//! ## Architecture
//!
//! 1. **Lookup**: [`registry::SourceRegistry`] resolves a source id to its adapter
//! 2. **Listing**: the adapter extracts article URLs from the listing page
//! 3. **Articles**: [`dispatch::ScrapeDispatcher`] parses every article
//!    concurrently, dropping the ones that fail to load
//! 4. **Output**: [`api`] returns the records and [`outputs::json`] writes them

pub mod api;
pub mod cli;
pub mod dates;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod registry;
pub mod scrapers;
pub mod utils;
