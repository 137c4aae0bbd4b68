//! Android backend
//!
//! Wraps an [`AndroidGeocoder`]. Local search does not exist on this
//! platform, so [`GeocodingBackend::search`] is plain geocoding and the
//! search region is ignored.

pub mod dispatch;
pub mod mapper;
pub mod native;

pub use dispatch::AddressDispatch;
pub use native::{Address, AndroidGeocoder, Bundle, BundleValue};

use crate::coord::SearchRegion;
use crate::geocoder::{GeoKodeOptions, GeocodeFailure, GeocodingBackend, Platform};
use crate::location::Location;
use std::sync::Arc;

/// Geocoding backend for Android devices
pub struct AndroidBackend<G> {
    geocoder: Arc<G>,
    dispatch: AddressDispatch,
    options: GeoKodeOptions,
}

impl<G: AndroidGeocoder> AndroidBackend<G> {
    /// Create a backend for a device running `api_level`
    pub fn new(geocoder: G, api_level: u32, options: GeoKodeOptions) -> Self {
        Self::from_shared(Arc::new(geocoder), api_level, options)
    }

    /// Create a backend around a geocoder the caller keeps a handle to
    pub fn from_shared(geocoder: Arc<G>, api_level: u32, options: GeoKodeOptions) -> Self {
        Self {
            geocoder,
            dispatch: AddressDispatch::for_api_level(api_level),
            options: options.normalized(),
        }
    }

    pub fn dispatch(&self) -> AddressDispatch {
        self.dispatch
    }

    pub fn options(&self) -> GeoKodeOptions {
        self.options
    }

    pub fn geocoder(&self) -> &Arc<G> {
        &self.geocoder
    }
}

impl<G: AndroidGeocoder> GeocodingBackend for AndroidBackend<G> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    async fn geocode(&self, query: &str) -> Result<Vec<Location>, GeocodeFailure> {
        let max_results = self.options.max_results;
        let addresses = self
            .dispatch
            .fetch(&self.geocoder, query, max_results, self.options.timeout)
            .await?;

        Ok(addresses
            .iter()
            .filter_map(mapper::address_to_location)
            .take(max_results)
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        _region: Option<SearchRegion>,
    ) -> Result<Vec<Location>, GeocodeFailure> {
        self.geocode(query).await
    }
}
