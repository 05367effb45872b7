//! Upstream weather services.
//!
//! Geocoding and forecasting backends, the [`WeatherProvider`] trait the
//! service talks to, and the shared HTTP plumbing.

pub mod http;
pub mod openweathermap;
pub mod pirateweather;
pub mod traits;
pub mod weatherapi;
pub mod weatherstack;

pub use openweathermap::OpenWeatherMapClient;
pub use pirateweather::PirateWeatherClient;
pub use traits::{CombinedProvider, ForecastBackend, GeocodeBackend, WeatherProvider};
pub use weatherapi::WeatherApiClient;
pub use weatherstack::WeatherstackClient;
