//! One-line weather summary

use super::direction::direction_for;
use super::units::{Quantity, dual_unit, humidity_percent};
use crate::types::{ResolvedLocation, UnitFormat, WeatherSnapshot};
use crate::{Result, WeatherError};

/// Bold toggle understood by IRC clients.
const BOLD: char = '\x02';

/// Render the fixed-format summary for `location`.
///
/// Fails with [`WeatherError::WeatherNotFound`] when the snapshot has no
/// current conditions or no forecast day.
pub fn render_display(
    location: &ResolvedLocation,
    snapshot: &WeatherSnapshot,
    unit: UnitFormat,
) -> Result<String> {
    let (current, today) = match (&snapshot.current, snapshot.today()) {
        (Some(current), Some(today)) => (current, today),
        _ => {
            tracing::error!(
                coordinates = %location.coordinates,
                "forecast data has no current conditions or forecast day"
            );
            return Err(WeatherError::WeatherNotFound(location.coordinates.to_string()));
        }
    };

    let temperature = dual_unit(current.temperature_f, Quantity::Temperature, unit);
    let feels_like = dual_unit(current.feels_like_f, Quantity::Temperature, unit);
    let high = dual_unit(today.high_f, Quantity::Temperature, unit);
    let low = dual_unit(today.low_f, Quantity::Temperature, unit);
    let wind = dual_unit(current.wind_speed_mph, Quantity::Speed, unit);

    Ok(format!(
        "{BOLD}{}, {}{BOLD} :: {} {temperature} (Humidity: {}%) | \
         {BOLD}Feels like{BOLD}: {feels_like} | \
         {BOLD}Wind{BOLD}: {} at {wind} | \
         {BOLD}Today{BOLD}: {}. High {high} - Low {low}",
        location.name,
        location.region,
        capitalize(&current.condition),
        humidity_percent(current.humidity),
        direction_for(current.wind_bearing),
        capitalize(&today.summary),
    ))
}

/// Upper-case the first character, leave the rest as the upstream wrote it.
fn capitalize(text: &str) -> String {
    let text = text.trim().trim_end_matches('.');
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
