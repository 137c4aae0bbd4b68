//! API-level dispatch between the two `Geocoder` call shapes
//!
//! Devices below API level 33 only have the blocking lookup; newer ones
//! deliver results through a listener. [`AddressDispatch`] picks one path
//! for a backend, and both paths return the same raw address list.

use crate::bridge;
use crate::constants::android::LISTENER_API_LEVEL;
use crate::geocoder::android::native::{Address, AndroidGeocoder};
use crate::geocoder::GeocodeFailure;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Which native lookup to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressDispatch {
    /// Blocking `getFromLocationName`, run on the blocking thread pool
    Legacy,
    /// Listener-based `getFromLocationName`, bridged to a future
    Listener,
}

impl AddressDispatch {
    /// Choose the path for a device running `api_level`
    pub fn for_api_level(api_level: u32) -> Self {
        if api_level < LISTENER_API_LEVEL {
            Self::Legacy
        } else {
            Self::Listener
        }
    }

    /// Look up `query`, asking the native geocoder for at most `max_results`
    pub async fn fetch<G: AndroidGeocoder>(
        self,
        geocoder: &Arc<G>,
        query: &str,
        max_results: usize,
        timeout: Option<Duration>,
    ) -> Result<Vec<Address>, GeocodeFailure> {
        if !geocoder.is_present() {
            return Err(GeocodeFailure::Unavailable);
        }

        debug!(path = ?self, max_results, "Dispatching geocoder request");
        match self {
            Self::Legacy => fetch_blocking(geocoder, query, max_results, timeout).await,
            Self::Listener => fetch_with_listener(geocoder, query, max_results, timeout).await,
        }
    }
}

async fn fetch_blocking<G: AndroidGeocoder>(
    geocoder: &Arc<G>,
    query: &str,
    max_results: usize,
    timeout: Option<Duration>,
) -> Result<Vec<Address>, GeocodeFailure> {
    let geocoder = Arc::clone(geocoder);
    let query = query.to_string();
    let task = tokio::task::spawn_blocking(move || {
        geocoder.get_from_location_name(&query, max_results)
    });

    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| GeocodeFailure::TimedOut(limit))?,
        None => task.await,
    };

    joined
        .map_err(|e| GeocodeFailure::Worker(e.to_string()))?
        .map_err(GeocodeFailure::Native)
}

async fn fetch_with_listener<G: AndroidGeocoder>(
    geocoder: &Arc<G>,
    query: &str,
    max_results: usize,
    timeout: Option<Duration>,
) -> Result<Vec<Address>, GeocodeFailure> {
    bridge::call_native(timeout, |completion| {
        geocoder.get_from_location_name_with_listener(query, max_results, completion)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Completion;
    use crate::geocoder::NativeError;
    use std::sync::Mutex;

    /// Records which native entry point ran and with what limit
    #[derive(Default)]
    struct RecordingGeocoder {
        absent: bool,
        calls: Mutex<Vec<(&'static str, usize)>>,
    }

    impl RecordingGeocoder {
        fn calls(&self) -> Vec<(&'static str, usize)> {
            self.calls.lock().unwrap().clone()
        }

        fn addresses(n: usize) -> Vec<Address> {
            (0..n)
                .map(|i| Address {
                    latitude: Some(i as f64),
                    longitude: Some(i as f64),
                    ..Default::default()
                })
                .collect()
        }
    }

    impl AndroidGeocoder for RecordingGeocoder {
        fn is_present(&self) -> bool {
            !self.absent
        }

        fn get_from_location_name(
            &self,
            _location_name: &str,
            max_results: usize,
        ) -> Result<Vec<Address>, NativeError> {
            self.calls.lock().unwrap().push(("blocking", max_results));
            Ok(Self::addresses(max_results))
        }

        fn get_from_location_name_with_listener(
            &self,
            _location_name: &str,
            max_results: usize,
            completion: Completion<Vec<Address>>,
        ) -> Result<(), NativeError> {
            self.calls.lock().unwrap().push(("listener", max_results));
            completion.succeed(Self::addresses(max_results));
            Ok(())
        }
    }

    #[test]
    fn test_for_api_level() {
        assert_eq!(AddressDispatch::for_api_level(21), AddressDispatch::Legacy);
        assert_eq!(AddressDispatch::for_api_level(32), AddressDispatch::Legacy);
        assert_eq!(AddressDispatch::for_api_level(33), AddressDispatch::Listener);
        assert_eq!(AddressDispatch::for_api_level(35), AddressDispatch::Listener);
    }

    #[tokio::test]
    async fn test_legacy_path_uses_blocking_call() {
        let geocoder = Arc::new(RecordingGeocoder::default());
        let addresses = AddressDispatch::Legacy
            .fetch(&geocoder, "Berlin", 3, None)
            .await
            .unwrap();

        assert_eq!(addresses.len(), 3);
        assert_eq!(geocoder.calls(), vec![("blocking", 3)]);
    }

    #[tokio::test]
    async fn test_listener_path_uses_listener_call() {
        let geocoder = Arc::new(RecordingGeocoder::default());
        let addresses = AddressDispatch::Listener
            .fetch(&geocoder, "Berlin", 4, Some(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(addresses.len(), 4);
        assert_eq!(geocoder.calls(), vec![("listener", 4)]);
    }

    #[tokio::test]
    async fn test_absent_geocoder_is_unavailable() {
        let geocoder = Arc::new(RecordingGeocoder {
            absent: true,
            ..Default::default()
        });

        for path in [AddressDispatch::Legacy, AddressDispatch::Listener] {
            let result = path.fetch(&geocoder, "Berlin", 5, None).await;
            assert_eq!(result, Err(GeocodeFailure::Unavailable));
        }
        assert!(geocoder.calls().is_empty());
    }

    struct PanickingGeocoder;

    impl AndroidGeocoder for PanickingGeocoder {
        fn get_from_location_name(&self, _: &str, _: usize) -> Result<Vec<Address>, NativeError> {
            panic!("native crash");
        }

        fn get_from_location_name_with_listener(
            &self,
            _: &str,
            _: usize,
            _: Completion<Vec<Address>>,
        ) -> Result<(), NativeError> {
            Err(NativeError::new("IllegalArgumentException"))
        }
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_failure() {
        let geocoder = Arc::new(PanickingGeocoder);
        let result = AddressDispatch::Legacy.fetch(&geocoder, "x", 1, None).await;
        assert!(matches!(result, Err(GeocodeFailure::Worker(_))));
    }

    #[tokio::test]
    async fn test_listener_synchronous_error() {
        let geocoder = Arc::new(PanickingGeocoder);
        let result = AddressDispatch::Listener.fetch(&geocoder, "x", 1, None).await;
        assert_eq!(
            result,
            Err(GeocodeFailure::Native(NativeError::new("IllegalArgumentException")))
        );
    }
}
