//! WeatherAPI.com client.
//!
//! A single service that both geocodes and forecasts, so it implements
//! [`WeatherProvider`] directly.
//! See: <https://www.weatherapi.com/docs/>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http::{self, DEFAULT_TIMEOUT};
use super::traits::WeatherProvider;
use crate::types::{
    Coordinates, CurrentConditions, DailyForecast, Humidity, ResolvedLocation, WeatherSnapshot,
};
use crate::{Result, WeatherError};

/// Default base URL for the WeatherAPI.com API
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// Upstream answers 400 with this code when a query matches nothing.
const NO_MATCHING_LOCATION: &str = "1006";

/// Client for the WeatherAPI.com API.
#[derive(Clone)]
pub struct WeatherApiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherApiClient {
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

    async fn lookup(&self, query: &str) -> Result<ResolvedLocation> {
        let url = format!("{}/v1/current.json", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query)]);

        let body: CurrentResponse = match http::get_json("weatherapi", request).await {
            Ok(body) => body,
            Err(WeatherError::Api { status: 400, message })
                if message.contains(NO_MATCHING_LOCATION) =>
            {
                debug!(query, "weatherapi found no matching location");
                return Err(WeatherError::LocationNotFound(query.to_string()));
            }
            Err(e) => return Err(e),
        };

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

    async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        let url = format!("{}/v1/forecast.json", self.base_url);
        let q = coordinates.to_string();
        let request = self.http.get(&url).query(&[
            ("key", self.api_key.as_str()),
            ("q", q.as_str()),
            ("days", "1"),
        ]);

        let body: ForecastResponse = http::get_json("weatherapi", request).await?;
        Ok(body.into())
    }
}

#[derive(Deserialize)]
struct CurrentResponse {
    location: Option<ApiLocation>,
}

#[derive(Deserialize)]
struct ApiLocation {
    name: Option<String>,
    region: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: Option<ApiCurrent>,
    forecast: Option<ApiForecast>,
}

#[derive(Deserialize)]
struct ApiCurrent {
    temp_f: Option<f64>,
    feelslike_f: Option<f64>,
    humidity: Option<f64>,
    wind_mph: Option<f64>,
    wind_degree: Option<f64>,
    condition: Option<ApiCondition>,
}

#[derive(Deserialize)]
struct ApiForecast {
    #[serde(default)]
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Deserialize)]
struct ApiForecastDay {
    day: Option<ApiDay>,
}

#[derive(Deserialize)]
struct ApiDay {
    maxtemp_f: Option<f64>,
    mintemp_f: Option<f64>,
    condition: Option<ApiCondition>,
}

#[derive(Deserialize)]
struct ApiCondition {
    #[serde(default)]
    text: String,
}

fn condition_text(condition: Option<ApiCondition>) -> String {
    condition.map(|c| c.text).unwrap_or_default()
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(body: ForecastResponse) -> Self {
        let current = body.current.and_then(|c| {
            Some(CurrentConditions {
                temperature_f: c.temp_f?,
                feels_like_f: c.feelslike_f?,
                humidity: Humidity::percent(c.humidity?),
                wind_speed_mph: c.wind_mph?,
                wind_bearing: c.wind_degree,
                condition: condition_text(c.condition),
            })
        });

        let daily = body
            .forecast
            .map(|f| f.forecastday)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| {
                let day = d.day?;
                Some(DailyForecast {
                    high_f: day.maxtemp_f?,
                    low_f: day.mintemp_f?,
                    summary: condition_text(day.condition),
                })
            })
            .collect();

        WeatherSnapshot { current, daily }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    fn name(&self) -> &str {
        "weatherapi"
    }

    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation> {
        self.lookup(query).await
    }

    async fn fetch_current_conditions(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        self.forecast(coordinates).await
    }
}
