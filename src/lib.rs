//! wzbot - weather lookups for chat bots
//!
//! This crate turns a free-text place query (or a user's remembered
//! location) into a one-line weather summary. It provides:
//!
//! - a [`WeatherProvider`] trait over geocoding and forecast backends
//! - single-flight caches for geocoding (LRU) and forecasts (TTL)
//! - user resolution against a pluggable [`UserStore`]
//! - shared unit, compass-direction and display formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use wzbot::{WeatherBot, WeatherOutcome};
//!
//! #[tokio::main]
//! async fn main() -> wzbot::Result<()> {
//!     let service = WeatherBot::builder()
//!         .weatherstack("ws-your-key")
//!         .openweathermap("owm-your-key")
//!         .build()?;
//!
//!     match service.get_current("alice", "New York, NY").await? {
//!         WeatherOutcome::Report(line) => println!("{line}"),
//!         WeatherOutcome::NoLocationSet => println!("no location set"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod providers;
pub mod service;
pub mod telemetry;
pub mod types;
pub mod users;
pub mod version;

// Re-export main types at crate root
pub use builder::{WeatherBot, WeatherServiceBuilder};
pub use cache::{CacheConfig, GeocodeCache, WeatherCache};
pub use config::Config;
pub use error::{Result, WeatherError};
pub use providers::{CombinedProvider, ForecastBackend, GeocodeBackend, WeatherProvider};
pub use service::{WeatherOutcome, WeatherService};
pub use users::{InMemoryUserStore, UserResolver, UserStore};
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    AnonymousUser, Coordinates, CurrentConditions, DailyForecast, Humidity, HumidityScale,
    Requester, ResolvedLocation, UnitFormat, UserLocation, WeatherSnapshot,
};
