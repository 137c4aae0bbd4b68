//! Fixture-driven native services
//!
//! Implements the native traits of both platforms from a JSON fixture, so
//! the adapter can be exercised on hosts without a device geocoder. Each
//! query maps to a scripted response:
//!
//! ```json
//! {
//!   "android": { "Berlin": { "outcome": "results", "items": [ { "latitude": 52.52, "longitude": 13.40 } ] } },
//!   "geocode": { "Paris":  { "outcome": "error", "message": "kCLErrorNetwork", "code": 2 } },
//!   "search":  { "coffee": { "outcome": "silent" } }
//! }
//! ```
//!
//! Queries without an entry answer with an empty result list. Callback
//! deliveries happen on a separate thread, as they do on a device.

use crate::bridge::Completion;
use crate::coord::SearchRegion;
use crate::error::{Error, Result};
use crate::geocoder::android::native::{Address, AndroidGeocoder};
use crate::geocoder::android::AndroidBackend;
use crate::geocoder::apple::native::{
    ClGeocoder, LocalSearch, LocalSearchRequest, LocalSearchResponse, MapItem, Placemark,
};
use crate::geocoder::apple::AppleBackend;
use crate::geocoder::{GeoKodeOptions, GeocodeFailure, GeocodingBackend, NativeError, Platform};
use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Scripted native behaviour for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Scripted<T> {
    /// Deliver these items
    Results { items: Vec<T> },
    /// Deliver a native error
    Error {
        message: String,
        #[serde(default)]
        code: Option<i64>,
    },
    /// Never deliver anything
    Silent,
}

fn scripted_error(message: &str, code: Option<i64>) -> NativeError {
    NativeError {
        code,
        message: message.to_string(),
    }
}

/// A replay fixture for both platforms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayFixture {
    /// Android `Geocoder` responses by query
    pub android: HashMap<String, Scripted<Address>>,
    /// `CLGeocoder` responses by query
    pub geocode: HashMap<String, Scripted<Placemark>>,
    /// `MKLocalSearch` responses by query
    pub search: HashMap<String, Scripted<MapItem>>,
}

impl ReplayFixture {
    /// Load a fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Fixture(format!("Failed to read fixture {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a fixture from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::Fixture(format!("Failed to parse fixture: {}", e)))
    }
}

/// Deliver `script` through `completion` from a separate thread
///
/// Silent scripts park the completion in `stalled` so it is never dropped
/// and the caller observes a hang rather than an abandoned request. Parked
/// completions whose caller has gone away are released on the next park.
fn deliver<T, U>(
    script: Option<&Scripted<T>>,
    completion: Completion<U>,
    stalled: &Mutex<Vec<Completion<U>>>,
    wrap: impl FnOnce(Vec<T>) -> U + Send + 'static,
) where
    T: Clone + Send + 'static,
    U: Send + 'static,
{
    let delivery = match script {
        None => Ok(Vec::new()),
        Some(Scripted::Results { items }) => Ok(items.clone()),
        Some(Scripted::Error { message, code }) => Err(scripted_error(message, *code)),
        Some(Scripted::Silent) => {
            let mut stalled = stalled
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            stalled.retain(|parked| !parked.is_cancelled());
            stalled.push(completion);
            return;
        }
    };

    std::thread::spawn(move || {
        completion.complete(delivery.map(wrap));
    });
}

fn record<T>(log: &Mutex<Vec<T>>, entry: T) {
    log.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(entry);
}

fn snapshot<T: Clone>(log: &Mutex<Vec<T>>) -> Vec<T> {
    log.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replayed Android geocoder
#[derive(Debug, Default)]
pub struct ReplayAndroid {
    fixture: Arc<ReplayFixture>,
    requests: Mutex<Vec<(String, usize)>>,
    stalled: Mutex<Vec<Completion<Vec<Address>>>>,
}

impl ReplayAndroid {
    pub fn new(fixture: Arc<ReplayFixture>) -> Self {
        Self {
            fixture,
            ..Default::default()
        }
    }

    /// Queries received so far, with the result limit each asked for
    pub fn requests(&self) -> Vec<(String, usize)> {
        snapshot(&self.requests)
    }
}

impl AndroidGeocoder for ReplayAndroid {
    fn get_from_location_name(
        &self,
        location_name: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<Address>, NativeError> {
        record(&self.requests, (location_name.to_string(), max_results));
        debug!(location_name, "Replaying blocking geocoder call");

        // A blocking call cannot hang without pinning a worker thread, so a
        // silent script surfaces the way the real service times out.
        match self.fixture.android.get(location_name) {
            None => Ok(Vec::new()),
            Some(Scripted::Results { items }) => Ok(items.iter().take(max_results).cloned().collect()),
            Some(Scripted::Error { message, code }) => Err(scripted_error(message, *code)),
            Some(Scripted::Silent) => Err(NativeError::new("Service not Available")),
        }
    }

    fn get_from_location_name_with_listener(
        &self,
        location_name: &str,
        max_results: usize,
        completion: Completion<Vec<Address>>,
    ) -> std::result::Result<(), NativeError> {
        record(&self.requests, (location_name.to_string(), max_results));
        debug!(location_name, "Replaying listener geocoder call");

        let script = self.fixture.android.get(location_name).map(|script| match script {
            Scripted::Results { items } => Scripted::Results {
                items: items.iter().take(max_results).cloned().collect(),
            },
            other => other.clone(),
        });
        deliver(script.as_ref(), completion, &self.stalled, |items| items);
        Ok(())
    }
}

/// Replayed `CLGeocoder` and `MKLocalSearch`
#[derive(Debug, Default)]
pub struct ReplayApple {
    fixture: Arc<ReplayFixture>,
    geocode_requests: Mutex<Vec<String>>,
    search_requests: Mutex<Vec<LocalSearchRequest>>,
    stalled_geocodes: Mutex<Vec<Completion<Vec<Placemark>>>>,
    stalled_searches: Mutex<Vec<Completion<LocalSearchResponse>>>,
}

impl ReplayApple {
    pub fn new(fixture: Arc<ReplayFixture>) -> Self {
        Self {
            fixture,
            ..Default::default()
        }
    }

    pub fn geocode_requests(&self) -> Vec<String> {
        snapshot(&self.geocode_requests)
    }

    pub fn search_requests(&self) -> Vec<LocalSearchRequest> {
        snapshot(&self.search_requests)
    }

    /// Region of the most recent search, if it had one
    pub fn last_search_region(&self) -> Option<SearchRegion> {
        self.search_requests().last().and_then(|request| request.region)
    }
}

impl ClGeocoder for ReplayApple {
    fn geocode_address_string(
        &self,
        address: &str,
        completion: Completion<Vec<Placemark>>,
    ) -> std::result::Result<(), NativeError> {
        record(&self.geocode_requests, address.to_string());
        debug!(address, "Replaying geocodeAddressString");

        deliver(
            self.fixture.geocode.get(address),
            completion,
            &self.stalled_geocodes,
            |placemarks| placemarks,
        );
        Ok(())
    }
}

impl LocalSearch for ReplayApple {
    fn start(
        &self,
        request: LocalSearchRequest,
        completion: Completion<LocalSearchResponse>,
    ) -> std::result::Result<(), NativeError> {
        debug!(query = %request.natural_language_query, "Replaying MKLocalSearch");
        let script = self.fixture.search.get(&request.natural_language_query);
        record(&self.search_requests, request);

        deliver(script, completion, &self.stalled_searches, |map_items| {
            LocalSearchResponse { map_items }
        });
        Ok(())
    }
}

/// A backend for either platform, backed by a replay fixture
pub enum ReplayBackend {
    Android(AndroidBackend<ReplayAndroid>),
    Apple(AppleBackend<Arc<ReplayApple>, Arc<ReplayApple>>),
}

impl ReplayBackend {
    pub fn new(
        platform: Platform,
        fixture: ReplayFixture,
        api_level: u32,
        options: GeoKodeOptions,
    ) -> Self {
        let fixture = Arc::new(fixture);
        match platform {
            Platform::Android => Self::Android(AndroidBackend::new(
                ReplayAndroid::new(fixture),
                api_level,
                options,
            )),
            Platform::Apple => {
                let apple = Arc::new(ReplayApple::new(fixture));
                Self::Apple(AppleBackend::new(Arc::clone(&apple), apple, options))
            }
        }
    }
}

impl GeocodingBackend for ReplayBackend {
    fn platform(&self) -> Platform {
        match self {
            Self::Android(backend) => backend.platform(),
            Self::Apple(backend) => backend.platform(),
        }
    }

    async fn geocode(&self, query: &str) -> std::result::Result<Vec<Location>, GeocodeFailure> {
        match self {
            Self::Android(backend) => backend.geocode(query).await,
            Self::Apple(backend) => backend.geocode(query).await,
        }
    }

    async fn search(
        &self,
        query: &str,
        region: Option<SearchRegion>,
    ) -> std::result::Result<Vec<Location>, GeocodeFailure> {
        match self {
            Self::Android(backend) => backend.search(query, region).await,
            Self::Apple(backend) => backend.search(query, region).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge;
    use crate::geocoder::GeoKode;
    use std::time::Duration;

    const FIXTURE: &str = r#"{
        "android": {
            "Berlin": { "outcome": "results", "items": [
                { "locality": "Berlin", "latitude": 52.52, "longitude": 13.405 },
                { "locality": "Berlin, NH", "latitude": 44.47, "longitude": -71.18 }
            ] },
            "offline": { "outcome": "error", "message": "grpc failed" },
            "hang": { "outcome": "silent" }
        },
        "geocode": {
            "Paris": { "outcome": "error", "message": "kCLErrorNetwork", "code": 2 }
        },
        "search": {
            "coffee": { "outcome": "results", "items": [ { "name": "Blue Bottle" } ] }
        }
    }"#;

    fn fixture() -> Arc<ReplayFixture> {
        Arc::new(ReplayFixture::from_json(FIXTURE).unwrap())
    }

    #[test]
    fn test_parse_fixture() {
        let fixture = fixture();
        assert_eq!(fixture.android.len(), 3);
        assert!(matches!(
            fixture.geocode.get("Paris"),
            Some(Scripted::Error { code: Some(2), .. })
        ));
        assert!(matches!(fixture.android.get("hang"), Some(Scripted::Silent)));
    }

    #[test]
    fn test_parse_invalid_fixture() {
        assert!(ReplayFixture::from_json("{ not json").is_err());
        assert!(ReplayFixture::from_json(r#"{"android": {"x": {"outcome": "maybe"}}}"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReplayFixture::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read fixture"));
    }

    #[test]
    fn test_blocking_replay_honors_limit() {
        let android = ReplayAndroid::new(fixture());

        assert_eq!(android.get_from_location_name("Berlin", 1).unwrap().len(), 1);
        assert_eq!(android.get_from_location_name("Berlin", 5).unwrap().len(), 2);
        assert!(android.get_from_location_name("Atlantis", 5).unwrap().is_empty());
        assert!(android.get_from_location_name("offline", 5).is_err());
        assert!(android.get_from_location_name("hang", 5).is_err());

        assert_eq!(android.requests()[0], ("Berlin".to_string(), 1));
    }

    #[tokio::test]
    async fn test_listener_replay_delivers() {
        let android = ReplayAndroid::new(fixture());
        let addresses = bridge::call_native(None, |completion| {
            android.get_from_location_name_with_listener("Berlin", 5, completion)
        })
        .await
        .unwrap();
        assert_eq!(addresses.len(), 2);
    }

    #[tokio::test]
    async fn test_listener_replay_silent_times_out() {
        let android = ReplayAndroid::new(fixture());
        let limit = Duration::from_millis(20);
        let result = bridge::call_native(Some(limit), |completion| {
            android.get_from_location_name_with_listener("hang", 5, completion)
        })
        .await;
        assert_eq!(result, Err(GeocodeFailure::TimedOut(limit)));
    }

    #[tokio::test]
    async fn test_stalled_completions_are_released_after_timeout() {
        let android = ReplayAndroid::new(fixture());
        let limit = Duration::from_millis(5);

        for _ in 0..3 {
            let result = bridge::call_native(Some(limit), |completion| {
                android.get_from_location_name_with_listener("hang", 5, completion)
            })
            .await;
            assert_eq!(result, Err(GeocodeFailure::TimedOut(limit)));
        }

        // Only the most recent request is still parked
        assert_eq!(android.stalled.lock().unwrap().len(), 1);
        assert_eq!(android.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_apple_replay_error_and_search() {
        let apple = ReplayApple::new(fixture());

        let result = bridge::call_native(None, |completion| {
            apple.geocode_address_string("Paris", completion)
        })
        .await;
        assert_eq!(
            result,
            Err(GeocodeFailure::Native(NativeError::with_code(2, "kCLErrorNetwork")))
        );

        let request = LocalSearchRequest {
            natural_language_query: "coffee".to_string(),
            region: None,
        };
        let response = bridge::call_native(None, |completion| apple.start(request, completion))
            .await
            .unwrap();
        assert_eq!(response.map_items.len(), 1);
        assert_eq!(apple.geocode_requests(), vec!["Paris".to_string()]);
        assert_eq!(apple.search_requests().len(), 1);
        assert_eq!(apple.last_search_region(), None);
    }

    #[tokio::test]
    async fn test_replay_backend_android_paths_agree() {
        for api_level in [30, 34] {
            let backend = ReplayBackend::new(
                Platform::Android,
                ReplayFixture::from_json(FIXTURE).unwrap(),
                api_level,
                GeoKodeOptions::default().with_max_results(1),
            );
            let geokode = GeoKode::new(backend);

            let results = geokode.locate("Berlin").await.unwrap();
            assert_eq!(results.len(), 1, "api level {}", api_level);
            assert_eq!(results[0].locality(), Some("Berlin"));
            assert_eq!(geokode.locate("offline").await, None);
        }
    }

    #[tokio::test]
    async fn test_replay_backend_apple_search_region() {
        let backend = ReplayBackend::new(
            Platform::Apple,
            ReplayFixture::from_json(FIXTURE).unwrap(),
            0,
            GeoKodeOptions::default(),
        );
        let geokode = GeoKode::new(backend);
        assert_eq!(geokode.platform(), Platform::Apple);

        // The only map item has no placemark, so it is dropped.
        let results = geokode.auto_search("coffee", Some(45.0), Some(7.0)).await;
        assert_eq!(results, Some(vec![]));

        let ReplayBackend::Apple(apple) = geokode.backend() else {
            panic!("expected the apple backend");
        };
        let region = apple.local_search().last_search_region().unwrap();
        assert_eq!(region.center.lat, 45.0);
        assert_eq!(region.latitude_delta, 0.1);
    }
}
