//! Time-bounded cache of forecast snapshots.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use super::{CacheConfig, SingleFlight};
use crate::Result;
use crate::types::{Coordinates, WeatherSnapshot};

/// Size-bounded cache of [`WeatherSnapshot`]s keyed on coordinates.
///
/// Every entry expires `ttl` after it was inserted, whether or not it was
/// read in the meantime.
pub struct WeatherCache {
    inner: SingleFlight<WeatherSnapshot>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner: SingleFlight::new("weather", entries),
            ttl,
        }
    }

    /// Look up `coordinates`, fetching with `compute` on a miss or after expiry.
    pub async fn get_or_compute<F>(
        &self,
        coordinates: &Coordinates,
        compute: F,
    ) -> Result<WeatherSnapshot>
    where
        F: Future<Output = Result<WeatherSnapshot>>,
    {
        self.inner
            .get_or_compute(coordinates.to_string(), compute)
            .await
    }

    pub fn contains(&self, coordinates: &Coordinates) -> bool {
        self.inner.contains(&coordinates.to_string())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
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

impl Default for WeatherCache {
    fn default() -> Self {
        let config = CacheConfig::default();
        Self::new(config.weather_capacity, config.weather_ttl)
    }
}
