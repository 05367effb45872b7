//! Provider traits.
//!
//! Upstream services implement the capability they actually offer
//! ([`GeocodeBackend`], [`ForecastBackend`]) rather than one "god trait".
//! The [`WeatherProvider`] the service talks to is either a single service
//! that does both (e.g. [`WeatherApiClient`](super::WeatherApiClient)) or a
//! [`CombinedProvider`] pairing one backend of each kind.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wzbot::providers::{CombinedProvider, OpenWeatherMapClient, WeatherstackClient};
//!
//! # fn main() -> wzbot::Result<()> {
//! let provider = CombinedProvider::new(
//!     Arc::new(WeatherstackClient::new("ws-key")?),
//!     Arc::new(OpenWeatherMapClient::new("owm-key")?),
//! );
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::format;
use crate::types::{Coordinates, ResolvedLocation, UnitFormat, WeatherSnapshot};

// ============================================================================
// Backend capabilities
// ============================================================================

/// An upstream service that turns free text into a place.
#[async_trait]
pub trait GeocodeBackend: Send + Sync {
    /// Backend name for logging/metrics.
    fn name(&self) -> &str;

    /// Resolve `query` (a city, "City, ST", a postal code...).
    ///
    /// Fails with `LocationNotFound` when the upstream has no usable match.
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation>;
}

/// An upstream service that reports conditions for a coordinate pair.
#[async_trait]
pub trait ForecastBackend: Send + Sync {
    /// Backend name for logging/metrics.
    fn name(&self) -> &str;

    /// Current conditions plus the daily forecast, starting today.
    async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot>;
}

// ============================================================================
// Weather provider
// ============================================================================

/// Everything the [`WeatherService`](crate::WeatherService) needs from upstream.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Geocode a free-text query.
    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation>;

    /// Fetch conditions for already-known coordinates.
    ///
    /// Never geocodes: callers holding stored coordinates skip
    /// [`resolve_location`](Self::resolve_location) entirely.
    async fn fetch_current_conditions(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot>;

    /// Render the one-line summary.
    ///
    /// The default uses the shared formatter; providers only override this
    /// to change the layout, never the unit math.
    fn render_display(
        &self,
        location: &ResolvedLocation,
        snapshot: &WeatherSnapshot,
        unit: UnitFormat,
    ) -> Result<String> {
        format::render_display(location, snapshot, unit)
    }
}

// ============================================================================
// Combined provider
// ============================================================================

/// A provider backed by two distinct services: one geocoder, one forecast.
pub struct CombinedProvider {
    name: String,
    geocoder: Arc<dyn GeocodeBackend>,
    forecast: Arc<dyn ForecastBackend>,
}

impl CombinedProvider {
    pub fn new(geocoder: Arc<dyn GeocodeBackend>, forecast: Arc<dyn ForecastBackend>) -> Self {
        let name = format!("{}+{}", geocoder.name(), forecast.name());
        Self {
            name,
            geocoder,
            forecast,
        }
    }
}

#[async_trait]
impl WeatherProvider for CombinedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation> {
        self.geocoder.geocode(query).await
    }

    async fn fetch_current_conditions(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        self.forecast.forecast(coordinates).await
    }
}

// ============================================================================
// Tests
// ============================================================================
