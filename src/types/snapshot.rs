//! Normalised current conditions and forecast

use serde::{Deserialize, Serialize};

/// Scale the upstream reports relative humidity on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumidityScale {
    /// 0–100
    Percent,
    /// 0–1 (Dark Sky style)
    Fraction,
}

/// A relative humidity reading in the scale the backend reported it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Humidity {
    pub value: f64,
    pub scale: HumidityScale,
}

impl Humidity {
    pub fn percent(value: f64) -> Self {
        Self {
            value,
            scale: HumidityScale::Percent,
        }
    }

    pub fn fraction(value: f64) -> Self {
        Self {
            value,
            scale: HumidityScale::Fraction,
        }
    }
}

/// Current conditions. Temperatures in °F, wind speed in mph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub humidity: Humidity,
    pub wind_speed_mph: f64,
    /// Wind bearing in degrees, if reported.
    pub wind_bearing: Option<f64>,
    pub condition: String,
}

/// One forecast day. Temperatures in °F.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub high_f: f64,
    pub low_f: f64,
    pub summary: String,
}

/// What a forecast backend returned for one coordinate pair.
///
/// Backends fill in what the payload carried; a snapshot missing current
/// conditions or every forecast day cannot be rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    /// First forecast day (today), if present.
    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }

    /// Whether there is enough to render a report: current conditions and today.
    pub fn is_complete(&self) -> bool {
        self.current.is_some() && !self.daily.is_empty()
    }
}
