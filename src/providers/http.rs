//! Shared HTTP plumbing for upstream clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::telemetry;
use crate::version::version_string;
use crate::{Result, WeatherError};

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the client shared by all backends of one service.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(format!("wzbot/{}", version_string()))
        .build()
        .map_err(|e| WeatherError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Send `request` and decode a JSON body, recording the outcome.
///
/// Non-2xx statuses become [`WeatherError::Api`]; transport failures and
/// timeouts become [`WeatherError::Http`].
pub(crate) async fn get_json<T>(backend: &str, request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let result = fetch(backend, request).await;

    let status = if result.is_ok() { "ok" } else { "error" };
    metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
        "backend" => backend.to_owned(),
        "status" => status,
    )
    .increment(1);

    if let Err(e) = &result {
        warn!(backend, error = %e, "upstream request failed");
    }
    result
}

async fn fetch<T>(backend: &str, request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;
    let response = check_status(backend, response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Map a non-success status to [`WeatherError::Api`], keeping the body as
/// the message so callers can inspect upstream error codes.
async fn check_status(backend: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("{backend} returned {status}")
    } else {
        body
    };

    Err(WeatherError::Api {
        status: status.as_u16(),
        message,
    })
}
