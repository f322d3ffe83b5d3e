//! Discovery caches.
//!
//! Three independent maps, each filled once per key and never evicted:
//! location to physical URLs, scheme to enumerator, and
//! (enumerator, URL) to resource names. Backends are assumed static for the
//! lifetime of the scanner.

use cpscan_api::{Location, LocationEnumerator, ResourceNames, ScanResult};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Entry counts of the three caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub locations: usize,
    pub enumerators: usize,
    pub name_sets: usize,
}

#[derive(Default)]
pub struct DiscoveryCache {
    location_urls: DashMap<Location, Arc<Vec<Url>>>,
    enumerators: DashMap<String, Arc<dyn LocationEnumerator>>,
    resource_names: DashMap<(String, Url), Arc<ResourceNames>>,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical URLs of `location`, computed on first request.
    ///
    /// Concurrent misses may compute twice; the first stored value wins.
    pub fn location_urls(
        &self,
        location: &Location,
        compute: impl FnOnce() -> ScanResult<Vec<Url>>,
    ) -> ScanResult<Arc<Vec<Url>>> {
        if let Some(urls) = self.location_urls.get(location) {
            return Ok(urls.value().clone());
        }
        let urls = Arc::new(compute()?);
        Ok(self
            .location_urls
            .entry(location.clone())
            .or_insert(urls)
            .value()
            .clone())
    }

    /// Enumerator for `scheme`. Schemes without an enumerator are not cached,
    /// so they are looked up again on the next request.
    pub fn enumerator(
        &self,
        scheme: &str,
        compute: impl FnOnce() -> Option<Arc<dyn LocationEnumerator>>,
    ) -> Option<Arc<dyn LocationEnumerator>> {
        if let Some(enumerator) = self.enumerators.get(scheme) {
            return Some(enumerator.value().clone());
        }
        let enumerator = compute()?;
        Some(
            self.enumerators
                .entry(scheme.to_string())
                .or_insert(enumerator)
                .value()
                .clone(),
        )
    }

    /// Resource names `enumerator` lists below `url`. Failures are not cached.
    pub fn resource_names(
        &self,
        enumerator: &str,
        url: &Url,
        compute: impl FnOnce() -> ScanResult<ResourceNames>,
    ) -> ScanResult<Arc<ResourceNames>> {
        let key = (enumerator.to_string(), url.clone());
        if let Some(names) = self.resource_names.get(&key) {
            return Ok(names.value().clone());
        }
        let names = Arc::new(compute()?);
        Ok(self.resource_names.entry(key).or_insert(names).value().clone())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            locations: self.location_urls.len(),
            enumerators: self.enumerators.len(),
            name_sets: self.resource_names.len(),
        }
    }
}
