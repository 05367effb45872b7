//! Tests for the WeatherService pipeline with a scripted provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wzbot::{
    CacheConfig, Coordinates, CurrentConditions, DailyForecast, Humidity, InMemoryUserStore,
    Requester, ResolvedLocation, Result, UnitFormat, UserLocation, UserStore, WeatherBot,
    WeatherError, WeatherOutcome, WeatherProvider, WeatherService, WeatherSnapshot,
};

// ============================================================================
// Mock provider
// ============================================================================

/// Knows two places and has weather everywhere. Counts every upstream call.
#[derive(Default)]
struct ScriptedProvider {
    geocode_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
    last_forecast: std::sync::Mutex<Option<Coordinates>>,
    /// Number of leading forecasts that come back without a daily section.
    incomplete_forecasts: usize,
}

impl ScriptedProvider {
    fn with_incomplete_forecasts(count: usize) -> Self {
        Self {
            incomplete_forecasts: count,
            ..Self::default()
        }
    }

    fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    fn last_forecast(&self) -> Option<Coordinates> {
        *self.last_forecast.lock().unwrap()
    }
}

#[async_trait]
impl WeatherProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn resolve_location(&self, query: &str) -> Result<ResolvedLocation> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        match query {
            "New York, NY" => Ok(ResolvedLocation::new(
                "New York",
                "New York",
                Coordinates::new(40.714, -74.006),
            )),
            "Mandeville, LA" => Ok(ResolvedLocation::new(
                "Mandeville",
                "Louisiana",
                Coordinates::new(30.358, -90.066),
            )),
            other => Err(WeatherError::LocationNotFound(other.to_string())),
        }
    }

    async fn fetch_current_conditions(&self, coordinates: &Coordinates) -> Result<WeatherSnapshot> {
        let call = self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_forecast.lock().unwrap() = Some(*coordinates);
        let mut snapshot = WeatherSnapshot {
            current: Some(CurrentConditions {
                temperature_f: 52.61,
                feels_like_f: 52.61,
                humidity: Humidity::percent(82.0),
                wind_speed_mph: 12.81,
                wind_bearing: Some(300.0),
                condition: "light rain".into(),
            }),
            daily: vec![DailyForecast {
                high_f: 54.3,
                low_f: 42.65,
                summary: "light rain in the morning and afternoon".into(),
            }],
        };
        if call < self.incomplete_forecasts {
            snapshot.daily.clear();
        }
        Ok(snapshot)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn service_with(provider: Arc<ScriptedProvider>, store: Arc<dyn UserStore>) -> WeatherService {
    WeatherBot::builder()
        .provider(provider)
        .user_store(store)
        .build()
        .unwrap()
}

fn stored_new_yorker(nick: &str, unit_format: UnitFormat) -> UserLocation {
    let place = ResolvedLocation::new("New York", "New York", "40.714,-74.006".parse().unwrap());
    let mut user = UserLocation::new(nick, "alice@example.net", &place);
    user.unit_format = unit_format;
    user
}

fn report(outcome: WeatherOutcome) -> String {
    match outcome {
        WeatherOutcome::Report(line) => line,
        WeatherOutcome::NoLocationSet => panic!("expected a report"),
    }
}

// ============================================================================
// get_current
// ============================================================================

#[tokio::test]
async fn anonymous_without_query_has_no_location() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));

    let outcome = service.get_current("stranger", "").await.unwrap();

    assert_eq!(outcome, WeatherOutcome::NoLocationSet);
    assert_eq!(provider.geocode_calls(), 0);
    assert_eq!(provider.forecast_calls(), 0);
}

#[tokio::test]
async fn stored_coordinates_skip_geocoding() {
    let provider = Arc::new(ScriptedProvider::default());
    let store = Arc::new(InMemoryUserStore::new());
    store
        .upsert(stored_new_yorker("alice", UnitFormat::Imperial))
        .await
        .unwrap();
    let service = service_with(provider.clone(), store);

    let line = report(service.get_current("alice", "  ").await.unwrap());

    assert_eq!(provider.geocode_calls(), 0);
    assert_eq!(provider.forecast_calls(), 1);
    assert_eq!(provider.last_forecast(), Some(Coordinates::new(40.714, -74.006)));
    assert!(line.starts_with("\x02New York, New York\x02 :: Light rain 52.6F/11.4C"));
}

#[tokio::test]
async fn stored_unit_preference_is_honoured() {
    let provider = Arc::new(ScriptedProvider::default());
    let store = Arc::new(InMemoryUserStore::new());
    store
        .upsert(stored_new_yorker("alice", UnitFormat::Metric))
        .await
        .unwrap();
    let service = service_with(provider, store);

    // Explicit third-party lookup still uses the requester's preference.
    let line = report(service.get_current("alice", "Mandeville, LA").await.unwrap());
    assert!(line.starts_with("\x02Mandeville, Louisiana\x02 :: Light rain 11.4C/52.6F"));
}

#[tokio::test]
async fn explicit_query_geocodes_then_fetches() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));

    let line = report(service.get_current("stranger", "Mandeville, LA").await.unwrap());
    assert!(line.contains("Mandeville, Louisiana"));
    assert_eq!(provider.geocode_calls(), 1);
    assert_eq!(provider.last_forecast(), Some(Coordinates::new(30.358, -90.066)));

    // Second request is answered from both caches.
    service.get_current("someone-else", "mandeville,  la").await.unwrap();
    assert_eq!(provider.geocode_calls(), 1);
    assert_eq!(provider.forecast_calls(), 1);
}

#[tokio::test]
async fn unknown_place_is_location_not_found() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));

    let err = service.get_current("stranger", "Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(_)));
    assert_eq!(err.user_message(), "Unable to find this location.");
    assert_eq!(provider.forecast_calls(), 0);
}

#[tokio::test]
async fn uninitialized_store_is_persistence_unavailable() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::uninitialized()));

    let err = service.get_current("alice", "").await.unwrap_err();
    assert!(matches!(err, WeatherError::PersistenceUnavailable(_)));
    assert_eq!(err.user_message(), "There is an error. Contact admin.");
    assert_eq!(provider.geocode_calls() + provider.forecast_calls(), 0);
}

#[tokio::test]
async fn get_current_for_supplied_requester() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::uninitialized()));

    // A caller-supplied record never touches the store.
    let requester = Requester::from(stored_new_yorker("alice", UnitFormat::Imperial));
    let outcome = service.get_current_for(&requester, "").await.unwrap();
    assert!(outcome.report().unwrap().contains("New York, New York"));
    assert_eq!(provider.geocode_calls(), 0);
}

// ============================================================================
// get_location
// ============================================================================

#[tokio::test]
async fn get_location_is_cached() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));

    let first = service.get_location("New York, NY").await.unwrap();
    let second = service.get_location("NEW YORK, NY").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.coordinates.to_string(), "40.714,-74.006");
    assert_eq!(provider.geocode_calls(), 1);

    service.clear_caches();
    service.get_location("New York, NY").await.unwrap();
    assert_eq!(provider.geocode_calls(), 2);
}

// ============================================================================
// set_location / set_unit_format
// ============================================================================

#[tokio::test]
async fn set_location_creates_then_updates() {
    let provider = Arc::new(ScriptedProvider::default());
    let store = Arc::new(InMemoryUserStore::new());
    let service = service_with(provider, store.clone());

    let created = service
        .set_location("bob", "bob@example.net", "New York, NY")
        .await
        .unwrap();
    assert_eq!(created.location, "New York");
    assert_eq!(created.unit_format, UnitFormat::Imperial);

    service.set_unit_format("bob", UnitFormat::Metric).await.unwrap();

    let moved = service
        .set_location("bob", "bob@elsewhere.net", "Mandeville, LA")
        .await
        .unwrap();
    assert_eq!(moved.location, "Mandeville");
    assert_eq!(moved.region, "Louisiana");
    assert_eq!(moved.host, "bob@elsewhere.net");
    assert_eq!(moved.unit_format, UnitFormat::Metric);
    assert_eq!(moved.created_at, created.created_at);

    let stored = store.get("bob").await.unwrap().unwrap();
    assert_eq!(stored, moved);
}

#[tokio::test]
async fn set_location_then_weather_uses_stored_place() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));

    service
        .set_location("carol", "carol@example.net", "Mandeville, LA")
        .await
        .unwrap();
    let line = report(service.get_current("carol", "").await.unwrap());

    assert!(line.contains("Mandeville, Louisiana"));
    assert_eq!(provider.geocode_calls(), 1);
}

#[tokio::test]
async fn set_location_rejects_unknown_place_without_storing() {
    let provider = Arc::new(ScriptedProvider::default());
    let store = Arc::new(InMemoryUserStore::new());
    let service = service_with(provider, store.clone());

    let err = service
        .set_location("dave", "dave@example.net", "Atlantis")
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn custom_cache_config_is_applied() {
    let provider = Arc::new(ScriptedProvider::default());
    let service = WeatherBot::builder()
        .provider(provider)
        .cache_config(CacheConfig::new().weather_ttl(std::time::Duration::from_secs(60)))
        .build()
        .unwrap();

    assert_eq!(service.weather_cache().ttl(), std::time::Duration::from_secs(60));
    assert_eq!(service.provider_name(), "scripted");
}

// ============================================================================
// Incomplete upstream payloads
// ============================================================================

#[tokio::test]
async fn incomplete_forecast_is_not_cached() {
    let provider = Arc::new(ScriptedProvider::with_incomplete_forecasts(1));
    let service = service_with(provider.clone(), Arc::new(InMemoryUserStore::new()));
    let new_york = Coordinates::new(40.714, -74.006);

    let err = service.get_current("alice", "New York, NY").await.unwrap_err();
    assert_eq!(err, WeatherError::WeatherNotFound("40.714,-74.006".into()));
    assert!(!service.weather_cache().contains(&new_york));

    let line = report(service.get_current("alice", "New York, NY").await.unwrap());
    assert!(line.starts_with("\x02New York, New York\x02 :: "));
    assert_eq!(provider.forecast_calls(), 2);
    assert_eq!(provider.geocode_calls(), 1);
}
