//! Error types for geokode

use thiserror::Error;

/// Main error type for geokode operations
///
/// Geocoding failures themselves are not errors at this level: they are
/// reported through [`crate::geocoder::GeocodeOutcome`]. This type covers the
/// ambient plumbing around the geocoder (configuration, fixtures, output).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geokode operations
pub type Result<T> = std::result::Result<T, Error>;
