//! Coordinates and geocoding results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Result, WeatherError};

/// A latitude/longitude pair.
///
/// The canonical text form is `"<lat>,<lon>"` with exactly one comma. It is
/// the weather cache key and the form persisted on [`UserLocation`](super::UserLocation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || WeatherError::InvalidInput(format!("malformed coordinates: {s:?}"));

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        if lon.contains(',') {
            return Err(invalid());
        }

        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(latitude, longitude))
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A place resolved by geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// City or place name as reported upstream.
    #[serde(rename = "location")]
    pub name: String,
    /// Region/state, or the country when the upstream region is blank.
    pub region: String,
    pub coordinates: Coordinates,
}

impl ResolvedLocation {
    pub fn new(name: impl Into<String>, region: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            coordinates,
        }
    }

    /// Build a location from raw geocoder fields.
    ///
    /// The region is preferred; a blank region falls back to the country.
    /// When both are blank the place is not usable and the lookup fails with
    /// [`WeatherError::LocationNotFound`].
    pub fn from_geocode(
        query: &str,
        name: Option<&str>,
        region: Option<&str>,
        country: Option<&str>,
        coordinates: Coordinates,
    ) -> Result<Self> {
        let region = [region, country]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;

        let name = name.map(str::trim).unwrap_or_default();

        Ok(Self::new(name, region, coordinates))
    }
}

/// Accepts a coordinate component encoded either as a JSON number or as a
/// numeric string (weatherstack sends `"40.714"`).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_display_matches_upstream_text() {
        let coords = Coordinates::new(40.714, -74.006);
        assert_eq!(coords.to_string(), "40.714,-74.006");
    }

    #[test]
    fn coordinates_parse() {
        let coords: Coordinates = "29.974,-90.087".parse().unwrap();
        assert_eq!(coords, Coordinates::new(29.974, -90.087));
    }

    #[test]
    fn coordinates_reject_extra_comma() {
        assert!("1.0,2.0,3.0".parse::<Coordinates>().is_err());
    }

    #[test]
    fn coordinates_reject_missing_comma() {
        assert!("40.714".parse::<Coordinates>().is_err());
    }

    #[test]
    fn coordinates_reject_non_numeric() {
        assert!("north,west".parse::<Coordinates>().is_err());
        assert!("NaN,1".parse::<Coordinates>().is_err());
    }

    #[test]
    fn region_preferred_over_country() {
        let loc = ResolvedLocation::from_geocode(
            "New York, NY",
            Some("New York"),
            Some("New York"),
            Some("United States of America"),
            Coordinates::new(40.714, -74.006),
        )
        .unwrap();
        assert_eq!(loc.region, "New York");
    }

    #[test]
    fn blank_region_falls_back_to_country() {
        let loc = ResolvedLocation::from_geocode(
            "New York",
            Some("New York"),
            Some(" "),
            Some("USA"),
            Coordinates::new(40.714, -74.006),
        )
        .unwrap();
        assert_eq!(loc.region, "USA");
    }

    #[test]
    fn blank_region_and_country_is_not_found() {
        let err = ResolvedLocation::from_geocode(
            "70888",
            Some("Nowhere"),
            Some(""),
            Some(""),
            Coordinates::new(0.0, 0.0),
        )
        .unwrap_err();
        assert_eq!(err, WeatherError::LocationNotFound("70888".into()));
    }

    #[test]
    fn resolved_location_serializes_with_location_key() {
        let loc = ResolvedLocation::new("New York", "New York", Coordinates::new(40.714, -74.006));
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": "New York",
                "region": "New York",
                "coordinates": "40.714,-74.006",
            })
        );
    }
}
