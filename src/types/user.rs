//! Requesting users and their stored preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::{Coordinates, ResolvedLocation};
use crate::WeatherError;

/// Which unit of each imperial/metric pair is displayed first.
///
/// Persisted as `1` (imperial first) or `2` (metric first).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UnitFormat {
    #[default]
    Imperial,
    Metric,
}

impl TryFrom<u8> for UnitFormat {
    type Error = WeatherError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UnitFormat::Imperial),
            2 => Ok(UnitFormat::Metric),
            other => Err(WeatherError::InvalidInput(format!(
                "unit format must be 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<UnitFormat> for u8 {
    fn from(value: UnitFormat) -> Self {
        match value {
            UnitFormat::Imperial => 1,
            UnitFormat::Metric => 2,
        }
    }
}

/// A user's remembered location, owned by a [`UserStore`](crate::users::UserStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    /// Unique key.
    pub nick: String,
    /// Contact host (`user@host`).
    pub host: String,
    /// Free-text place name.
    pub location: String,
    /// Region/state name.
    pub region: String,
    pub coordinates: Coordinates,
    #[serde(rename = "format")]
    pub unit_format: UnitFormat,
    pub created_at: DateTime<Utc>,
}

impl UserLocation {
    /// A new record for `nick` at a freshly geocoded place, imperial first.
    pub fn new(nick: impl Into<String>, host: impl Into<String>, place: &ResolvedLocation) -> Self {
        Self {
            nick: nick.into(),
            host: host.into(),
            location: place.name.clone(),
            region: place.region.clone(),
            coordinates: place.coordinates,
            unit_format: UnitFormat::default(),
            created_at: Utc::now(),
        }
    }

    /// The stored place, as if it had just been geocoded.
    pub fn resolved_location(&self) -> ResolvedLocation {
        ResolvedLocation::new(&self.location, &self.region, self.coordinates)
    }
}

/// Stand-in for a requester with no stored record. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousUser;

impl AnonymousUser {
    pub fn unit_format(&self) -> UnitFormat {
        UnitFormat::Imperial
    }
}

/// The identity a weather request is made on behalf of.
#[derive(Debug, Clone, PartialEq)]
pub enum Requester {
    Registered(UserLocation),
    Anonymous(AnonymousUser),
}

impl Requester {
    pub fn unit_format(&self) -> UnitFormat {
        match self {
            Requester::Registered(user) => user.unit_format,
            Requester::Anonymous(anon) => anon.unit_format(),
        }
    }

    /// The persisted location, if any.
    pub fn stored_location(&self) -> Option<&UserLocation> {
        match self {
            Requester::Registered(user) => Some(user),
            Requester::Anonymous(_) => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Requester::Anonymous(_))
    }
}

impl From<UserLocation> for Requester {
    fn from(user: UserLocation) -> Self {
        Requester::Registered(user)
    }
}

impl From<Option<UserLocation>> for Requester {
    fn from(user: Option<UserLocation>) -> Self {
        user.map_or(Requester::Anonymous(AnonymousUser), Requester::Registered)
    }
}
