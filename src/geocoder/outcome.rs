//! Geocoding outcomes
//!
//! Every query ends in exactly one of three states: there was nothing to
//! ask, the native service failed, or it answered (possibly with nothing).

use crate::location::Location;
use std::time::Duration;
use thiserror::Error;

/// An error reported by a native geocoding service
///
/// Carries whatever the platform handed back: a message and, on platforms
/// that have one, a numeric error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.code, .message))]
pub struct NativeError {
    pub code: Option<i64>,
    pub message: String,
}

fn render(code: &Option<i64>, message: &str) -> String {
    match code {
        Some(code) => format!("[{}] {}", code, message),
        None => message.to_string(),
    }
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

/// Why a geocoding call produced no answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeFailure {
    /// The device has no geocoding backend installed
    #[error("no geocoder service is present on this device")]
    Unavailable,

    /// The native layer reported an error, synchronously or through its callback
    #[error("native geocoder failed: {0}")]
    Native(NativeError),

    /// The native completion did not arrive in time
    #[error("native geocoder did not complete within {0:?}")]
    TimedOut(Duration),

    /// The native layer dropped its completion without ever invoking it
    #[error("native geocoder abandoned the request")]
    Abandoned,

    /// The worker running a blocking native call died
    #[error("geocoder worker failed: {0}")]
    Worker(String),
}

/// Result of a single geocoding or search call
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// The query was empty or whitespace; no native call was made
    NoQuery,
    /// The native service failed
    Failed(GeocodeFailure),
    /// The native service answered; the list may be empty
    Found(Vec<Location>),
}

impl GeocodeOutcome {
    /// Collapse to the two-way shape: `None` for no query or failure
    pub fn into_option(self) -> Option<Vec<Location>> {
        match self {
            Self::Found(locations) => Some(locations),
            Self::NoQuery | Self::Failed(_) => None,
        }
    }

    pub fn locations(&self) -> Option<&[Location]> {
        match self {
            Self::Found(locations) => Some(locations),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&GeocodeFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Result<Vec<Location>, GeocodeFailure>> for GeocodeOutcome {
    fn from(result: Result<Vec<Location>, GeocodeFailure>) -> Self {
        match result {
            Ok(locations) => Self::Found(locations),
            Err(failure) => Self::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option_distinguishes_empty_from_failure() {
        assert_eq!(GeocodeOutcome::Found(vec![]).into_option(), Some(vec![]));
        assert_eq!(GeocodeOutcome::NoQuery.into_option(), None);
        assert_eq!(
            GeocodeOutcome::Failed(GeocodeFailure::Abandoned).into_option(),
            None
        );
    }

    #[test]
    fn test_native_error_display() {
        assert_eq!(NativeError::new("offline").to_string(), "offline");
        assert_eq!(
            NativeError::with_code(8, "kCLErrorGeocodeFoundNoResult").to_string(),
            "[8] kCLErrorGeocodeFoundNoResult"
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = GeocodeFailure::Native(NativeError::new("grpc failed"));
        assert_eq!(failure.to_string(), "native geocoder failed: grpc failed");
        assert!(GeocodeFailure::TimedOut(Duration::from_secs(2))
            .to_string()
            .contains("2s"));
    }

    #[test]
    fn test_from_result() {
        let ok: GeocodeOutcome = Ok(vec![Location::default()]).into();
        assert!(ok.is_found());
        assert_eq!(ok.locations().map(|l| l.len()), Some(1));

        let err: GeocodeOutcome = Err(GeocodeFailure::Unavailable).into();
        assert_eq!(err.failure(), Some(&GeocodeFailure::Unavailable));
    }
}
