//! wzbot error types

/// wzbot error types
///
/// `Clone` so that every caller waiting on the same in-flight cache
/// computation receives the failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    // Lookup outcomes
    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("weather not found: {0}")]
    WeatherNotFound(String),

    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    // Persistence errors
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("no provider configured")]
    NoProvider,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl WeatherError {
    /// Whether the upstream service failed to answer (transport failure,
    /// non-2xx status or an undecodable body).
    ///
    /// These are logged and surfaced as "try again later". The core never
    /// retries them.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            WeatherError::Http(_) | WeatherError::Api { .. } | WeatherError::Json(_)
        )
    }

    /// Returns a short message suitable for replying to the requester.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Unable to find this location.",
            WeatherError::WeatherNotFound(_) => "Unable to find the weather at this time.",
            WeatherError::Http(_) | WeatherError::Api { .. } | WeatherError::Json(_) => {
                "There was an error. Try again later."
            }
            WeatherError::InvalidInput(_) => "That location is not valid.",
            WeatherError::PersistenceUnavailable(_)
            | WeatherError::NoProvider
            | WeatherError::Configuration(_) => "There is an error. Contact admin.",
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry API keys.
        let err = err.without_url();
        if err.is_timeout() {
            WeatherError::Http(format!("request timed out: {err}"))
        } else if err.is_decode() {
            WeatherError::Json(err.to_string())
        } else {
            WeatherError::Http(err.to_string())
        }
    }
}

/// Result type alias for wzbot operations
pub type Result<T> = std::result::Result<T, WeatherError>;
