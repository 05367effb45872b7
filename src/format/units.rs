//! Dual-unit rendering of single readings

use crate::types::{Humidity, HumidityScale, UnitFormat};

const KPH_PER_MPH: f64 = 1.609344;

/// What a reading measures. Inputs are always imperial (°F or mph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Speed,
}

pub fn fahrenheit_to_celsius(value_f: f64) -> f64 {
    (value_f - 32.0) / 1.8
}

pub fn mph_to_kph(value_mph: f64) -> f64 {
    value_mph * KPH_PER_MPH
}

/// Render an imperial reading as `"<imperial>/<metric>"` or, for
/// [`UnitFormat::Metric`], `"<metric>/<imperial>"`. Both magnitudes use one
/// decimal place.
///
/// ```
/// use wzbot::UnitFormat;
/// use wzbot::format::{dual_unit, Quantity};
///
/// assert_eq!(dual_unit(52.61, Quantity::Temperature, UnitFormat::Imperial), "52.6F/11.4C");
/// assert_eq!(dual_unit(52.61, Quantity::Temperature, UnitFormat::Metric), "11.4C/52.6F");
/// ```
pub fn dual_unit(value: f64, quantity: Quantity, primary: UnitFormat) -> String {
    let (imperial, metric, imperial_unit, metric_unit) = match quantity {
        Quantity::Temperature => (value, fahrenheit_to_celsius(value), "F", "C"),
        Quantity::Speed => (value, mph_to_kph(value), "mph", "kph"),
    };

    match primary {
        UnitFormat::Imperial => format!("{imperial:.1}{imperial_unit}/{metric:.1}{metric_unit}"),
        UnitFormat::Metric => format!("{metric:.1}{metric_unit}/{imperial:.1}{imperial_unit}"),
    }
}

/// Relative humidity as an integer percentage in `0..=100`.
pub fn humidity_percent(humidity: Humidity) -> u8 {
    let percent = match humidity.scale {
        HumidityScale::Percent => humidity.value,
        HumidityScale::Fraction => humidity.value * 100.0,
    };
    percent.round().clamp(0.0, 100.0) as u8
}
