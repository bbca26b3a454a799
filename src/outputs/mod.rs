//! Output generation.
//!
//! - [`json`]: writes each source's scraped articles to `{source}_news.json`

pub mod json;
