//! Builder for configuring service instances

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::config::{Config, ForecastKind, ProviderKind};
use crate::providers::http::{self, DEFAULT_TIMEOUT};
use crate::providers::{
    CombinedProvider, ForecastBackend, OpenWeatherMapClient, PirateWeatherClient,
    WeatherApiClient, WeatherProvider, WeatherstackClient, openweathermap, pirateweather,
    weatherapi, weatherstack,
};
use crate::service::WeatherService;
use crate::users::{InMemoryUserStore, UserStore};
use crate::{Result, WeatherError};

/// Main entry point for creating service instances.
pub struct WeatherBot;

impl WeatherBot {
    /// Create a new builder for configuring the service.
    pub fn builder() -> WeatherServiceBuilder {
        WeatherServiceBuilder::new()
    }
}

/// Forecast backend selected for a combined provider, with its key.
#[derive(Debug, Clone)]
enum ForecastChoice {
    OpenWeatherMap(String),
    PirateWeather(String),
}

/// Builder for configuring service instances.
///
/// Provider selection, in order:
/// 1. an explicit [`provider`](Self::provider)
/// 2. Weatherstack geocoding + the configured forecast backend
/// 3. WeatherAPI.com alone
pub struct WeatherServiceBuilder {
    provider: Option<Arc<dyn WeatherProvider>>,
    weatherstack_key: Option<String>,
    forecast: Option<ForecastChoice>,
    weatherapi_key: Option<String>,
    timeout: Duration,
    cache_config: CacheConfig,
    user_store: Option<Arc<dyn UserStore>>,
}

impl WeatherServiceBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            weatherstack_key: None,
            forecast: None,
            weatherapi_key: None,
            timeout: DEFAULT_TIMEOUT,
            cache_config: CacheConfig::default(),
            user_store: None,
        }
    }

    /// Start from a loaded [`Config`], resolving keys from the file or environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.provider.timeout_secs == 0 {
            return Err(WeatherError::Configuration(
                "provider.timeout_secs must be at least 1".to_string(),
            ));
        }

        let builder = Self::new()
            .timeout(config.timeout())
            .cache_config(config.cache_config());

        let builder = match config.provider.kind {
            ProviderKind::Combined => {
                let builder = builder.weatherstack(config.keys.require("weatherstack")?);
                match config.provider.forecast {
                    ForecastKind::OpenWeatherMap => {
                        builder.openweathermap(config.keys.require("openweathermap")?)
                    }
                    ForecastKind::PirateWeather => {
                        builder.pirate_weather(config.keys.require("pirateweather")?)
                    }
                }
            }
            ProviderKind::Unified => builder.weatherapi(config.keys.require("weatherapi")?),
        };
        Ok(builder)
    }

    /// Use Weatherstack for geocoding.
    pub fn weatherstack(mut self, api_key: impl Into<String>) -> Self {
        self.weatherstack_key = Some(api_key.into());
        self
    }

    /// Use OpenWeatherMap One Call for forecasts.
    pub fn openweathermap(mut self, api_key: impl Into<String>) -> Self {
        self.forecast = Some(ForecastChoice::OpenWeatherMap(api_key.into()));
        self
    }

    /// Use Pirate Weather for forecasts.
    pub fn pirate_weather(mut self, api_key: impl Into<String>) -> Self {
        self.forecast = Some(ForecastChoice::PirateWeather(api_key.into()));
        self
    }

    /// Use WeatherAPI.com for both geocoding and forecasts.
    pub fn weatherapi(mut self, api_key: impl Into<String>) -> Self {
        self.weatherapi_key = Some(api_key.into());
        self
    }

    /// Use a ready-made provider, ignoring any configured keys.
    pub fn provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the per-request timeout for upstream calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Set the user store (default: an empty [`InMemoryUserStore`]).
    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<WeatherService> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => Self::build_provider(
                self.weatherstack_key,
                self.forecast,
                self.weatherapi_key,
                self.timeout,
            )?,
        };

        let store = self
            .user_store
            .unwrap_or_else(|| Arc::new(InMemoryUserStore::new()));

        Ok(WeatherService::new(provider, &self.cache_config, store))
    }

    fn build_provider(
        weatherstack_key: Option<String>,
        forecast: Option<ForecastChoice>,
        weatherapi_key: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn WeatherProvider>> {
        // One HTTP client shared by every backend
        let client = http::build_client(timeout)?;

        match (weatherstack_key, forecast, weatherapi_key) {
            (Some(ws_key), Some(forecast), _) => {
                let geocoder = Arc::new(WeatherstackClient::with_http_client(
                    ws_key,
                    weatherstack::DEFAULT_BASE_URL,
                    client.clone(),
                ));
                let forecast: Arc<dyn ForecastBackend> = match forecast {
                    ForecastChoice::OpenWeatherMap(key) => Arc::new(
                        OpenWeatherMapClient::with_http_client(
                            key,
                            openweathermap::DEFAULT_BASE_URL,
                            client,
                        ),
                    ),
                    ForecastChoice::PirateWeather(key) => Arc::new(
                        PirateWeatherClient::with_http_client(
                            key,
                            pirateweather::DEFAULT_BASE_URL,
                            client,
                        ),
                    ),
                };
                Ok(Arc::new(CombinedProvider::new(geocoder, forecast)))
            }
            (_, _, Some(key)) => Ok(Arc::new(WeatherApiClient::with_http_client(
                key,
                weatherapi::DEFAULT_BASE_URL,
                client,
            ))),
            (Some(_), None, None) => Err(WeatherError::Configuration(
                "weatherstack only geocodes; configure a forecast backend too".to_string(),
            )),
            (None, Some(_), None) => Err(WeatherError::Configuration(
                "a forecast backend needs weatherstack for geocoding".to_string(),
            )),
            (None, None, None) => Err(WeatherError::NoProvider),
        }
    }
}

impl Default for WeatherServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
