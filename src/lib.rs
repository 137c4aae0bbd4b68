//! geokode: Unified Forward Geocoding
//!
//! A library and CLI tool that turns address text into structured
//! [`Location`]s using whichever geocoder the host platform provides.
//!
//! ## Features
//!
//! - One facade ([`GeoKode`]) over Android `Geocoder` and Apple
//!   `CLGeocoder` / `MKLocalSearch`
//! - Android call shape chosen by API level (blocking or listener)
//! - Callback-to-async bridging with timeouts and cancellation
//! - Search biased toward a user location
//! - Replay natives driven by a JSON fixture, for hosts without a device
//!
//! ## Quick Start
//!
//! ```rust
//! use geokode::geocoder::replay::{ReplayBackend, ReplayFixture};
//! use geokode::geocoder::{GeoKode, GeoKodeOptions, Platform};
//!
//! let fixture = ReplayFixture::from_json(
//!     r#"{ "android": { "Berlin": { "outcome": "results",
//!          "items": [ { "locality": "Berlin", "latitude": 52.52, "longitude": 13.405 } ] } } }"#,
//! )
//! .unwrap();
//! let backend = ReplayBackend::new(Platform::Android, fixture, 33, GeoKodeOptions::default());
//! let geokode = GeoKode::new(backend);
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let results = runtime.block_on(geokode.locate("Berlin")).unwrap();
//! assert_eq!(results[0].locality(), Some("Berlin"));
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geocoder;
pub mod location;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, SearchRegion};
pub use error::{Error, Result};
pub use geocoder::{
    GeoKode, GeoKodeOptions, GeocodeFailure, GeocodeOutcome, GeocodingBackend, NativeError,
    Platform,
};
pub use location::{ExtraValue, Location};
