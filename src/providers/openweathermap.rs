//! OpenWeatherMap One Call client, used for forecasts.
//!
//! Requests imperial units and drops minutely/hourly blocks.
//! See: <https://openweathermap.org/api/one-call-3>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::http::{self, DEFAULT_TIMEOUT};
use super::traits::ForecastBackend;
use crate::Result;
use crate::types::{Coordinates, CurrentConditions, DailyForecast, Humidity, WeatherSnapshot};

/// Default base URL for the OpenWeatherMap API
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const ONE_CALL_PATH: &str = "/data/3.0/onecall";

/// Client for the OpenWeatherMap One Call API.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherMapClient {
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

    /// Fetch current conditions and the daily forecast.
    pub async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        let url = format!("{}{}", self.base_url, ONE_CALL_PATH);
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let request = self.http.get(&url).query(&[
            ("exclude", "minutely,hourly"),
            ("units", "imperial"),
            ("appid", self.api_key.as_str()),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
        ]);

        let body: OneCallResponse = http::get_json("openweathermap", request).await?;
        Ok(body.into())
    }
}

#[derive(Deserialize)]
struct OneCallResponse {
    current: Option<OneCallCurrent>,
    #[serde(default)]
    daily: Vec<OneCallDaily>,
}

#[derive(Deserialize)]
struct OneCallCurrent {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Deserialize)]
struct OneCallDaily {
    temp: Option<OneCallDailyTemp>,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Deserialize)]
struct OneCallDailyTemp {
    max: Option<f64>,
    min: Option<f64>,
}

#[derive(Deserialize)]
struct OneCallCondition {
    #[serde(default)]
    description: String,
}

fn first_description(weather: &[OneCallCondition]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_default()
}

impl From<OneCallResponse> for WeatherSnapshot {
    fn from(body: OneCallResponse) -> Self {
        let current = body.current.and_then(|c| {
            Some(CurrentConditions {
                temperature_f: c.temp?,
                feels_like_f: c.feels_like?,
                humidity: Humidity::percent(c.humidity?),
                wind_speed_mph: c.wind_speed?,
                wind_bearing: c.wind_deg,
                condition: first_description(&c.weather),
            })
        });

        let daily = body
            .daily
            .into_iter()
            .filter_map(|d| {
                let temp = d.temp?;
                Some(DailyForecast {
                    high_f: temp.max?,
                    low_f: temp.min?,
                    summary: first_description(&d.weather),
                })
            })
            .collect();

        WeatherSnapshot { current, daily }
    }
}

#[async_trait]
impl ForecastBackend for OpenWeatherMapClient {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn forecast(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        OpenWeatherMapClient::forecast(self, coordinates).await
    }
}
