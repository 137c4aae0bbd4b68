//! Centralized constants for the geokode crate
//!
//! Values shared between the platform backends, the mappers and the
//! configuration layer.

/// Geocoder request settings
pub mod geocoder {
    /// Maximum number of results requested from a native geocoder
    pub const DEFAULT_MAX_RESULTS: usize = 5;

    /// Seconds to wait for a native completion before giving up
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Latitude/longitude span (degrees) of the region used to bias a local search
    pub const SEARCH_REGION_SPAN_DEGREES: f64 = 0.1;
}

/// Android-style platform constants
pub mod android {
    /// First API level (Android 13, "Tiramisu") with the listener-based geocoder
    pub const LISTENER_API_LEVEL: u32 = 33;

    /// `maxAddressLineIndex` reported by an address with no lines
    pub const NO_ADDRESS_LINES: i32 = -1;
}

/// Apple-style platform constants
pub mod apple {
    /// Key of the formatted address lines in a placemark's address dictionary
    pub const FORMATTED_ADDRESS_LINES_KEY: &str = "FormattedAddressLines";

    /// Coordinate component value treated as "no coordinate"
    pub const UNSET_COORDINATE: f64 = 0.0;
}
