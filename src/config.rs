//! Configuration loading.
//!
//! Configuration is loaded from a TOML file with the following resolution order:
//! 1. explicit path (e.g. `wz --config <path>`)
//! 2. `~/.wzbot/config.toml` (user)
//! 3. `/etc/wzbot/config.toml` (system)
//!
//! API keys may live in the `[keys]` table; any key not set there is read
//! from its environment variable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::{Result, WeatherError};

/// wzbot configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub keys: ApiKeys,
}

/// Which upstream services answer requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Weatherstack geocoding plus a separate forecast backend.
    #[default]
    Combined,
    /// WeatherAPI.com for both.
    Unified,
}

/// Forecast backend used by [`ProviderKind::Combined`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastKind {
    #[default]
    OpenWeatherMap,
    PirateWeather,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub forecast: ForecastKind,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            forecast: ForecastKind::default(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// The `[cache]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_geocode_capacity")]
    pub geocode_capacity: u64,
    #[serde(default = "default_weather_capacity")]
    pub weather_capacity: u64,
    #[serde(default = "default_weather_ttl")]
    pub weather_ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            geocode_capacity: default_geocode_capacity(),
            weather_capacity: default_weather_capacity(),
            weather_ttl_secs: default_weather_ttl(),
        }
    }
}

fn default_geocode_capacity() -> u64 {
    32
}

fn default_weather_capacity() -> u64 {
    64
}

fn default_weather_ttl() -> u64 {
    900
}

impl From<&CacheSection> for CacheConfig {
    fn from(section: &CacheSection) -> Self {
        CacheConfig::new()
            .geocode_capacity(section.geocode_capacity)
            .weather_capacity(section.weather_capacity)
            .weather_ttl(Duration::from_secs(section.weather_ttl_secs))
    }
}

/// The `[keys]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub weatherstack: Option<String>,
    #[serde(default)]
    pub openweathermap: Option<String>,
    #[serde(default)]
    pub pirateweather: Option<String>,
    #[serde(default)]
    pub weatherapi: Option<String>,
}

/// Backend name → environment variable name mapping.
pub const KEY_ENV_VARS: &[(&str, &str)] = &[
    ("weatherstack", "WS_API_KEY"),
    ("openweathermap", "OWM_API_KEY"),
    ("pirateweather", "PIRATE_WEATHER_API_KEY"),
    ("weatherapi", "WEATHERAPI_KEY"),
];

impl ApiKeys {
    /// Key for `backend`, falling back to the corresponding environment variable.
    pub fn api_key(&self, backend: &str) -> Option<String> {
        let from_file = match backend {
            "weatherstack" => self.weatherstack.as_ref(),
            "openweathermap" => self.openweathermap.as_ref(),
            "pirateweather" => self.pirateweather.as_ref(),
            "weatherapi" => self.weatherapi.as_ref(),
            _ => None,
        }
        .filter(|key| !key.trim().is_empty())
        .cloned();

        from_file.or_else(|| {
            KEY_ENV_VARS
                .iter()
                .find(|(name, _)| *name == backend)
                .and_then(|(_, env_var)| std::env::var(env_var).ok())
                .filter(|key| !key.trim().is_empty())
        })
    }

    /// Like [`api_key`](Self::api_key), but a missing key is a configuration error.
    pub fn require(&self, backend: &str) -> Result<String> {
        self.api_key(backend).ok_or_else(|| {
            let env_var = KEY_ENV_VARS
                .iter()
                .find(|(name, _)| *name == backend)
                .map_or("", |(_, env_var)| *env_var);
            WeatherError::Configuration(format!(
                "missing API key for {backend} (set keys.{backend} or {env_var})"
            ))
        })
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.wzbot/config.toml`
    /// 3. `/etc/wzbot/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_file(&path)
    }

    /// Like [`load`](Self::load), but defaults when no config file exists.
    ///
    /// An explicit path must still exist, and a file that is found must
    /// read and parse.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        if explicit_path.is_some() {
            return Self::load(explicit_path);
        }
        Ok(Self::load_first(&Self::default_paths())?.unwrap_or_default())
    }

    /// Load the first existing file among `candidates`, if any.
    fn load_first(candidates: &[PathBuf]) -> Result<Option<Self>> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_file(path).map(Some),
            None => Ok(None),
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            WeatherError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::parse(&content).map_err(|e| match e {
            WeatherError::Configuration(msg) => {
                WeatherError::Configuration(format!("Failed to parse config file {path:?}: {msg}"))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WeatherError::Configuration(e.to_string()))
    }

    /// Cache settings as a [`CacheConfig`].
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::from(&self.cache)
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(WeatherError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        Self::default_paths()
            .into_iter()
            .find(|path| path.exists())
            .ok_or_else(|| {
                WeatherError::Configuration(
                    "No config file found. Create ~/.wzbot/config.toml or /etc/wzbot/config.toml"
                        .to_string(),
                )
            })
    }

    /// User config, then system config.
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(2);
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".wzbot").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/wzbot/config.toml"));
        paths
    }
}
