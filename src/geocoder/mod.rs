//! Geocoding over platform-native services
//!
//! The [`GeoKode`] facade is the public entry point. It talks to one
//! [`GeocodingBackend`], which wraps a platform's native geocoder:
//!
//! - [`android::AndroidBackend`]: blocking or listener-based `Geocoder`,
//!   chosen by API level
//! - [`apple::AppleBackend`]: callback-based `CLGeocoder` plus `MKLocalSearch`
//!
//! ## Flex Point
//! Adding a platform requires:
//! 1. Create `src/geocoder/{platform}/` with its native traits and mapper
//! 2. Implement `GeocodingBackend` for the platform's backend
//! 3. Add a [`Platform`] variant and wire it into the CLI

pub mod android;
pub mod apple;
pub mod facade;
pub mod outcome;
pub mod replay;

pub use facade::{join_components, GeoKode};
pub use outcome::{GeocodeFailure, GeocodeOutcome, NativeError};

use crate::config::Config;
use crate::constants::geocoder::{DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_SECS};
use crate::coord::SearchRegion;
use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Trait for platform geocoding backends
///
/// Implementations receive queries that are already known to be non-blank.
pub trait GeocodingBackend: Send + Sync {
    /// Which platform this backend drives
    fn platform(&self) -> Platform;

    /// Forward geocode a free-form query
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Location>, GeocodeFailure>> + Send;

    /// Search for places matching `query`, biased to `region` when given
    ///
    /// Platforms without a local search facility fall back to [`Self::geocode`].
    fn search(
        &self,
        query: &str,
        region: Option<SearchRegion>,
    ) -> impl Future<Output = Result<Vec<Location>, GeocodeFailure>> + Send;
}

/// Supported native platforms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Android `android.location.Geocoder`
    #[default]
    Android,
    /// Apple CoreLocation `CLGeocoder` and MapKit `MKLocalSearch`
    Apple,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Apple => write!(f, "apple"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "apple" | "ios" => Ok(Self::Apple),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Settings shared by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKodeOptions {
    /// Upper bound on results requested from (and returned by) the native service
    pub max_results: usize,
    /// How long to wait for a native completion; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for GeoKodeOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl GeoKodeOptions {
    /// Set the result limit (at least one result is always requested)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Re-apply the result floor to options built as a struct literal
    pub(crate) fn normalized(self) -> Self {
        self.with_max_results(self.max_results)
    }
}

impl From<&Config> for GeoKodeOptions {
    fn from(config: &Config) -> Self {
        Self::default()
            .with_max_results(config.geocoder.max_results)
            .with_timeout(config.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_platform_from_str() {
        assert_eq!(Platform::from_str("android"), Ok(Platform::Android));
        assert_eq!(Platform::from_str("Apple"), Ok(Platform::Apple));
        assert_eq!(Platform::from_str("ios"), Ok(Platform::Apple));
        assert!(Platform::from_str("symbian").is_err());
    }

    #[test]
    fn test_platform_display_roundtrip() {
        for platform in [Platform::Android, Platform::Apple] {
            assert_eq!(Platform::from_str(&platform.to_string()), Ok(platform));
        }
    }

    #[test]
    fn test_default_options() {
        let options = GeoKodeOptions::default();
        assert_eq!(options.max_results, 5);
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_max_results_floor() {
        assert_eq!(GeoKodeOptions::default().with_max_results(0).max_results, 1);
        assert_eq!(GeoKodeOptions::default().with_max_results(9).max_results, 9);
    }

    #[test]
    fn test_normalized_applies_floor_to_literals() {
        let options = GeoKodeOptions {
            max_results: 0,
            timeout: None,
        };
        assert_eq!(options.normalized().max_results, 1);
        assert_eq!(options.normalized().timeout, None);
        assert_eq!(GeoKodeOptions::default().normalized(), GeoKodeOptions::default());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.geocoder.max_results = 3;
        config.geocoder.timeout_secs = 0;

        let options = GeoKodeOptions::from(&config);
        assert_eq!(options.max_results, 3);
        assert_eq!(options.timeout, None);
    }
}
