//! Pirate Weather client (Dark Sky compatible), used for forecasts.
//!
//! The API key is part of the path and humidity is a 0–1 fraction.
//! See: <https://docs.pirateweather.net/>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::http::{self, DEFAULT_TIMEOUT};
use super::traits::ForecastBackend;
use crate::Result;
use crate::types::{Coordinates, CurrentConditions, DailyForecast, Humidity, WeatherSnapshot};

/// Default base URL for the Pirate Weather API
pub const DEFAULT_BASE_URL: &str = "https://api.pirateweather.net";

/// Client for the Pirate Weather forecast API.
#[derive(Clone)]
pub struct PirateWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl PirateWeatherClient {
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

    /// Fetch current conditions and the daily forecast in US units.
    pub async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}/forecast/{}/{}",
            self.base_url, self.api_key, coordinates
        );
        let request = self
            .http
            .get(&url)
            .query(&[("exclude", "minutely,hourly"), ("units", "us")]);

        let body: ForecastResponse = http::get_json("pirateweather", request).await?;
        Ok(body.into())
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    currently: Option<Currently>,
    daily: Option<DailyBlock>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Currently {
    #[serde(default)]
    summary: String,
    temperature: Option<f64>,
    apparent_temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    wind_bearing: Option<f64>,
}

#[derive(Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyPoint {
    #[serde(default)]
    summary: String,
    temperature_high: Option<f64>,
    temperature_low: Option<f64>,
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(body: ForecastResponse) -> Self {
        let current = body.currently.and_then(|c| {
            Some(CurrentConditions {
                temperature_f: c.temperature?,
                feels_like_f: c.apparent_temperature?,
                humidity: Humidity::fraction(c.humidity?),
                wind_speed_mph: c.wind_speed?,
                wind_bearing: c.wind_bearing,
                condition: c.summary,
            })
        });

        let daily = body
            .daily
            .map(|block| block.data)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| {
                Some(DailyForecast {
                    high_f: d.temperature_high?,
                    low_f: d.temperature_low?,
                    summary: d.summary,
                })
            })
            .collect();

        WeatherSnapshot { current, daily }
    }
}

#[async_trait]
impl ForecastBackend for PirateWeatherClient {
    fn name(&self) -> &str {
        "pirateweather"
    }

    async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        PirateWeatherClient::forecast(self, coordinates).await
    }
}
