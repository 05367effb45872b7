//! Provider-agnostic formatting.
//!
//! Every backend converts its payload into a [`WeatherSnapshot`](crate::types::WeatherSnapshot)
//! first; the helpers here only ever see plain numbers and strings.

mod direction;
mod display;
mod units;

pub use direction::direction_for;
pub use display::render_display;
pub use units::{Quantity, dual_unit, fahrenheit_to_celsius, humidity_percent, mph_to_kph};
