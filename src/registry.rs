//! Lookup from source identifier to adapter.

use crate::error::UnknownSourceError;
use crate::scrapers::{Source, SourceAdapter};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered mapping from [`Source`] to its adapter.
pub struct SourceRegistry {
    adapters: Vec<(Source, Arc<dyn SourceAdapter>)>,
}

impl SourceRegistry {
    /// Every source, reading from its default listing page.
    pub fn new() -> Self {
        Self::with_base_urls(&HashMap::new())
    }

    /// Every source, with the listing page replaced for the sources present
    /// in `overrides`.
    pub fn with_base_urls(overrides: &HashMap<Source, String>) -> Self {
        let adapters = Source::ALL
            .into_iter()
            .map(|source| {
                let base_url = overrides
                    .get(&source)
                    .map(String::as_str)
                    .unwrap_or(source.default_base_url());
                (source, source.adapter(base_url))
            })
            .collect();
        Self { adapters }
    }

    /// Resolve a case-insensitive identifier such as `"Jamuna"`.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn SourceAdapter>, UnknownSourceError> {
        let wanted: Source = id.parse()?;
        self.adapters
            .iter()
            .find(|(source, _)| *source == wanted)
            .map(|(_, adapter)| Arc::clone(adapter))
            .ok_or_else(|| UnknownSourceError(id.to_string()))
    }

    /// Resolve `id`, but read the listing from `base_url` instead.
    pub fn resolve_with_base_url(
        &self,
        id: &str,
        base_url: &str,
    ) -> Result<Arc<dyn SourceAdapter>, UnknownSourceError> {
        let adapter = self.resolve(id)?;
        Ok(adapter.source().adapter(base_url))
    }

    /// Registered identifiers, in registration order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|(source, _)| source.id()).collect()
    }

    /// Registered adapters, in registration order.
    pub fn adapters(&self) -> impl Iterator<Item = &Arc<dyn SourceAdapter>> {
        self.adapters.iter().map(|(_, adapter)| adapter)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_every_known_id() {
        let registry = SourceRegistry::new();
        for id in registry.ids() {
            let adapter = registry.resolve(id).unwrap();
            assert_eq!(adapter.source().id(), id);
        }
        assert_eq!(registry.resolve("JAMUNA").unwrap().source(), Source::Jamuna);
    }

    #[test]
    fn test_unknown_id_fails() {
        let registry = SourceRegistry::new();
        for id in ["", "bbc", "jamuna.tv", "prothom-alo"] {
            let err = registry.resolve(id).err().unwrap();
            assert_eq!(err, UnknownSourceError(id.to_string()));
        }
    }

    #[test]
    fn test_ids_in_registration_order() {
        let registry = SourceRegistry::new();
        assert_eq!(registry.ids(), vec!["jamuna", "dbcnews", "prothomalo"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_base_url_overrides() {
        let overrides = HashMap::from([(Source::DbcNews, "http://127.0.0.1:9/list".to_string())]);
        let registry = SourceRegistry::with_base_urls(&overrides);
        assert_eq!(registry.resolve("dbcnews").unwrap().base_url(), "http://127.0.0.1:9/list");
        assert_eq!(
            registry.resolve("jamuna").unwrap().base_url(),
            Source::Jamuna.default_base_url()
        );
    }

    #[test]
    fn test_resolve_with_base_url() {
        let registry = SourceRegistry::new();
        let adapter = registry
            .resolve_with_base_url("prothomalo", "https://www.prothomalo.com/bangladesh")
            .unwrap();
        assert_eq!(adapter.source(), Source::ProthomAlo);
        assert_eq!(adapter.base_url(), "https://www.prothomalo.com/bangladesh");
        assert!(registry.resolve_with_base_url("nope", "https://x").is_err());
    }
}
