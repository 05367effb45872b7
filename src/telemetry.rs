//! Telemetry metric name constants.
//!
//! Centralised metric names for wzbot operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `wzbot_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `cache`: which cache answered: "geocode" or "weather"
//! - `backend`: upstream service name (e.g. "weatherstack", "openweathermap")
//! - `status`: outcome: "ok" or "error"

/// Total lookups answered from a cache without computing.
///
/// Labels: `cache`.
pub const CACHE_HITS_TOTAL: &str = "wzbot_cache_hits_total";

/// Total lookups that had to compute (and store) a fresh value.
///
/// Labels: `cache`.
pub const CACHE_MISSES_TOTAL: &str = "wzbot_cache_misses_total";

/// Total outbound requests to upstream weather and geocoding services.
///
/// Labels: `backend`, `status` ("ok" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "wzbot_upstream_requests_total";
