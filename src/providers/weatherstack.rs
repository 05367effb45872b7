//! Weatherstack client, used for geocoding only.
//!
//! The `current` endpoint echoes a `location` object for any query it can
//! place, which is all this client reads.
//! See: <https://weatherstack.com/documentation>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use super::http::{self, DEFAULT_TIMEOUT};
use super::traits::GeocodeBackend;
use crate::types::{Coordinates, ResolvedLocation, lenient_f64};
use crate::{Result, WeatherError};

/// Default base URL. The free tier only serves plain http.
pub const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";

/// Client for the Weatherstack API.
#[derive(Clone)]
pub struct WeatherstackClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherstackClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_http_client(
            api_key,
            base_url,
            http::build_client(DEFAULT_TIMEOUT)?,
        ))
    }

    /// Create a client that shares an existing HTTP client.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        }
    }

    /// Geocode a free-text query.
    pub async fn geocode(&self, query: &str) -> Result<ResolvedLocation> {
        let url = format!("{}/current", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("access_key", self.api_key.as_str()), ("query", query)]);

        let body: GeocodeResponse = http::get_json("weatherstack", request).await?;

        // Lookup failures arrive as 200 with an error object.
        if let Some(err) = body.error {
            error!(
                code = err.code,
                info = err.info.as_deref().unwrap_or_default(),
                "weatherstack geolocation failed"
            );
            return Err(WeatherError::LocationNotFound(query.to_string()));
        }

        let location = body
            .location
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;

        let (Some(lat), Some(lon)) = (location.lat, location.lon) else {
            return Err(WeatherError::LocationNotFound(query.to_string()));
        };

        ResolvedLocation::from_geocode(
            query,
            location.name.as_deref(),
            location.region.as_deref(),
            location.country.as_deref(),
            Coordinates::new(lat, lon),
        )
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    location: Option<GeocodeLocation>,
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct GeocodeLocation {
    name: Option<String>,
    region: Option<String>,
    country: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    lon: Option<f64>,
}

#[derive(Deserialize)]
struct UpstreamError {
    code: Option<i64>,
    info: Option<String>,
}

#[async_trait]
impl GeocodeBackend for WeatherstackClient {
    fn name(&self) -> &str {
        "weatherstack"
    }

    async fn geocode(&self, query: &str) -> Result<ResolvedLocation> {
        WeatherstackClient::geocode(self, query).await
    }
}
