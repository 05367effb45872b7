//! Public types for the wzbot API.

mod location;
mod snapshot;
mod user;

pub(crate) use location::lenient_f64;
pub use location::{Coordinates, ResolvedLocation};
pub use snapshot::{CurrentConditions, DailyForecast, Humidity, HumidityScale, WeatherSnapshot};
pub use user::{AnonymousUser, Requester, UnitFormat, UserLocation};
