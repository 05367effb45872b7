//! Caching subsystem.
//!
//! Two independent caches, each owned by the [`WeatherService`](crate::WeatherService)
//! that uses them:
//!
//! - [`GeocodeCache`]: size-bounded LRU of geocoding results, keyed on the
//!   normalised query text. No expiry.
//!
//! - [`WeatherCache`]: size-bounded snapshots of forecast data, keyed on the
//!   coordinate string. Entries expire a fixed time after insertion.
//!
//! Both go through `get_or_compute`, which is single-flight per key: while
//! one caller is computing a missing entry, concurrent callers for the same
//! key wait for that computation instead of issuing their own upstream
//! request. Failures are handed to every waiter and are not cached.

pub mod geocode;
pub mod weather;

pub use geocode::{GeocodeCache, normalize_query};
pub use weather::WeatherCache;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::Result;
use crate::telemetry;

/// Configuration for both caches.
///
/// ```rust
/// # use wzbot::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .geocode_capacity(128)
///     .weather_ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum geocoding results kept. Default: 32.
    pub geocode_capacity: u64,
    /// Maximum weather snapshots kept. Default: 64.
    pub weather_capacity: u64,
    /// How long a weather snapshot stays valid. Default: 15 minutes.
    pub weather_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_capacity: 32,
            weather_capacity: 64,
            weather_ttl: Duration::from_secs(900),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geocode_capacity(mut self, n: u64) -> Self {
        self.geocode_capacity = n;
        self
    }

    pub fn weather_capacity(mut self, n: u64) -> Self {
        self.weather_capacity = n;
        self
    }

    pub fn weather_ttl(mut self, ttl: Duration) -> Self {
        self.weather_ttl = ttl;
        self
    }
}

/// Shared moka wrapper behind both caches.
pub(crate) struct SingleFlight<V> {
    label: &'static str,
    entries: Cache<String, V>,
}

impl<V> SingleFlight<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(label: &'static str, entries: Cache<String, V>) -> Self {
        Self { label, entries }
    }

    /// Return the cached value for `key`, or drive `compute` to fill it.
    ///
    /// `compute` is only polled on a miss, and only by one caller per key.
    pub(crate) async fn get_or_compute<F>(&self, key: String, compute: F) -> Result<V>
    where
        F: Future<Output = Result<V>>,
    {
        let entry = self
            .entries
            .entry(key)
            .or_try_insert_with(compute)
            .await
            .map_err(Arc::unwrap_or_clone)?;

        if entry.is_fresh() {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => self.label).increment(1);
            debug!(cache = self.label, key = %entry.key(), "cache miss");
        } else {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => self.label).increment(1);
            debug!(cache = self.label, key = %entry.key(), "cache hit");
        }

        Ok(entry.into_value())
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub(crate) fn clear(&self) {
        self.entries.invalidate_all();
    }

    #[cfg(test)]
    pub(crate) async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }
}
