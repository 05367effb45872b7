//! WeatherService: the query pipeline.
//!
//! Ties a [`WeatherProvider`] to the two caches and the user resolver:
//!
//! 1. resolve the requester (stored record or anonymous)
//! 2. pick coordinates: stored ones when the query is empty, otherwise
//!    geocode the query through the geocode cache
//! 3. fetch conditions through the weather cache
//! 4. render in the requester's unit preference

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cache::{CacheConfig, GeocodeCache, WeatherCache};
use crate::providers::WeatherProvider;
use crate::types::{Coordinates, Requester, ResolvedLocation, UnitFormat, UserLocation, WeatherSnapshot};
use crate::users::{UserResolver, UserStore};
use crate::{Result, WeatherError};

/// Longest location text a user may store.
pub const MAX_LOCATION_LEN: usize = 80;

/// Result of a current-weather request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    /// The rendered one-line summary.
    Report(String),
    /// No query was given and the requester has no stored location.
    NoLocationSet,
}

impl WeatherOutcome {
    /// The rendered report, if any.
    pub fn report(&self) -> Option<&str> {
        match self {
            WeatherOutcome::Report(text) => Some(text),
            WeatherOutcome::NoLocationSet => None,
        }
    }
}

/// Answers "weather for X" and "where is X" requests.
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    geocode_cache: GeocodeCache,
    weather_cache: WeatherCache,
    users: UserResolver,
}

impl WeatherService {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        cache_config: &CacheConfig,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            provider,
            geocode_cache: GeocodeCache::new(cache_config.geocode_capacity),
            weather_cache: WeatherCache::new(cache_config.weather_capacity, cache_config.weather_ttl),
            users: UserResolver::new(store),
        }
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Geocode `query`, answering from the geocode cache when possible.
    #[instrument(skip(self), fields(operation = "get_location"))]
    pub async fn get_location(&self, query: &str) -> Result<ResolvedLocation> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::InvalidInput("empty location query".to_string()));
        }

        self.geocode_cache
            .get_or_compute(query, self.provider.resolve_location(query))
            .await
    }

    /// Current weather for `nick`, at `query` or at their stored location
    /// when `query` is blank.
    #[instrument(skip(self), fields(operation = "get_current"))]
    pub async fn get_current(&self, nick: &str, query: &str) -> Result<WeatherOutcome> {
        let requester = self.users.resolve(nick).await?;
        self.get_current_for(&requester, query).await
    }

    /// Like [`get_current`](Self::get_current) for an already-resolved requester.
    #[instrument(
        skip(self, requester),
        fields(operation = "get_current", anonymous = requester.is_anonymous())
    )]
    pub async fn get_current_for(&self, requester: &Requester, query: &str) -> Result<WeatherOutcome> {
        let location = if query.trim().is_empty() {
            match requester.stored_location() {
                Some(user) => user.resolved_location(),
                None => return Ok(WeatherOutcome::NoLocationSet),
            }
        } else {
            self.get_location(query).await?
        };

        let snapshot = self.fetch_weather(&location.coordinates).await?;
        let report = self
            .provider
            .render_display(&location, &snapshot, requester.unit_format())?;
        Ok(WeatherOutcome::Report(report))
    }

    /// Geocode `query` and store it as `nick`'s location.
    ///
    /// An existing record keeps its unit preference and creation time.
    #[instrument(skip(self), fields(operation = "set_location"))]
    pub async fn set_location(&self, nick: &str, host: &str, query: &str) -> Result<UserLocation> {
        let query = query.trim();
        if query.is_empty() || query.chars().count() > MAX_LOCATION_LEN {
            return Err(WeatherError::InvalidInput(format!(
                "location must be 1 to {MAX_LOCATION_LEN} characters"
            )));
        }

        let place = self.get_location(query).await?;
        let store = self.users.store();

        let user = match store.get(nick).await? {
            Some(mut existing) => {
                existing.host = host.to_string();
                existing.location = place.name;
                existing.region = place.region;
                existing.coordinates = place.coordinates;
                existing
            }
            None => UserLocation::new(nick, host, &place),
        };

        store.upsert(user.clone()).await?;
        info!(
            nick,
            location = %user.location,
            coordinates = %user.coordinates,
            "user location updated"
        );
        Ok(user)
    }

    /// Change `nick`'s unit preference. `None` if `nick` has no record.
    #[instrument(skip(self), fields(operation = "set_unit_format"))]
    pub async fn set_unit_format(&self, nick: &str, unit: UnitFormat) -> Result<Option<UserLocation>> {
        let store = self.users.store();
        let Some(mut user) = store.get(nick).await? else {
            return Ok(None);
        };

        user.unit_format = unit;
        store.upsert(user.clone()).await?;
        info!(nick, unit = u8::from(unit), "user unit format updated");
        Ok(Some(user))
    }

    /// The user resolver backing this service.
    pub fn users(&self) -> &UserResolver {
        &self.users
    }

    pub fn geocode_cache(&self) -> &GeocodeCache {
        &self.geocode_cache
    }

    pub fn weather_cache(&self) -> &WeatherCache {
        &self.weather_cache
    }

    /// Empty both caches.
    pub fn clear_caches(&self) {
        self.geocode_cache.clear();
        self.weather_cache.clear();
    }

    /// Fails with `WeatherNotFound` on an incomplete snapshot, which is not cached.
    async fn fetch_weather(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        let fetch = async {
            let snapshot = self.provider.fetch_current_conditions(coordinates).await?;
            if !snapshot.is_complete() {
                warn!(
                    provider = self.provider.name(),
                    coordinates = %coordinates,
                    "incomplete weather payload"
                );
                return Err(WeatherError::WeatherNotFound(coordinates.to_string()));
            }
            Ok(snapshot)
        };
        self.weather_cache.get_or_compute(coordinates, fetch).await
    }
}
