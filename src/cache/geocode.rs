//! LRU cache of geocoding results.

use std::future::Future;

use moka::future::Cache;
use moka::policy::EvictionPolicy;

use super::SingleFlight;
use crate::Result;
use crate::types::ResolvedLocation;

/// Canonical cache key for a free-text place query: lower-cased, trimmed,
/// internal whitespace collapsed to single spaces.
///
/// ```
/// assert_eq!(wzbot::cache::normalize_query("  New   York, NY "), "new york, ny");
/// ```
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Size-bounded, least-recently-used cache of [`ResolvedLocation`]s.
///
/// Entries never expire; the least recently used one is evicted once the
/// capacity is exceeded.
pub struct GeocodeCache {
    inner: SingleFlight<ResolvedLocation>,
}

impl GeocodeCache {
    pub fn new(capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self {
            inner: SingleFlight::new("geocode", entries),
        }
    }

    /// Look up `query` (normalised), resolving it with `compute` on a miss.
    pub async fn get_or_compute<F>(&self, query: &str, compute: F) -> Result<ResolvedLocation>
    where
        F: Future<Output = Result<ResolvedLocation>>,
    {
        self.inner
            .get_or_compute(normalize_query(query), compute)
            .await
    }

    /// Whether `query` currently has a cached result.
    pub fn contains(&self, query: &str) -> bool {
        self.inner.contains(&normalize_query(query))
    }

    /// Approximate number of entries (settles after pending maintenance).
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new(super::CacheConfig::default().geocode_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    fn place(name: &str) -> ResolvedLocation {
        ResolvedLocation::new(name, "Region", Coordinates::new(1.0, 2.0))
    }

    async fn must_be_cached() -> Result<ResolvedLocation> {
        panic!("entry should have been served from the cache")
    }

    #[test]
    fn normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize_query("Mandeville,  LA"), "mandeville, la");
        assert_eq!(normalize_query("\t70447\n"), "70447");
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_evicted() {
        let cache = GeocodeCache::new(2);

        cache.get_or_compute("a", async { Ok(place("a")) }).await.unwrap();
        cache.get_or_compute("b", async { Ok(place("b")) }).await.unwrap();
        cache.inner.run_pending_tasks().await;

        // Touch "a" so "b" becomes the least recently used.
        cache.get_or_compute("a", must_be_cached()).await.unwrap();
        cache.inner.run_pending_tasks().await;

        cache.get_or_compute("c", async { Ok(place("c")) }).await.unwrap();
        cache.inner.run_pending_tasks().await;

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn keys_are_normalised() {
        let cache = GeocodeCache::default();
        cache
            .get_or_compute("New York, NY", async { Ok(place("New York")) })
            .await
            .unwrap();

        let hit = cache
            .get_or_compute("  new york,   ny", must_be_cached())
            .await
            .unwrap();
        assert_eq!(hit.name, "New York");
    }
}
