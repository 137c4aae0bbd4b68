//! Apple backend
//!
//! Geocoding goes through [`ClGeocoder`], place search through
//! [`LocalSearch`]. Neither native call takes a result limit, so results are
//! cut to `max_results` after mapping.

pub mod mapper;
pub mod native;

pub use native::{
    ClGeocoder, LocalSearch, LocalSearchRequest, LocalSearchResponse, MapItem, Placemark,
    PlacemarkLocation,
};

use crate::bridge;
use crate::coord::SearchRegion;
use crate::geocoder::{GeoKodeOptions, GeocodeFailure, GeocodingBackend, Platform};
use crate::location::Location;
use tracing::debug;

/// Geocoding backend for Apple platforms
pub struct AppleBackend<G, S> {
    geocoder: G,
    local_search: S,
    options: GeoKodeOptions,
}

impl<G: ClGeocoder, S: LocalSearch> AppleBackend<G, S> {
    pub fn new(geocoder: G, local_search: S, options: GeoKodeOptions) -> Self {
        Self {
            geocoder,
            local_search,
            options: options.normalized(),
        }
    }

    pub fn options(&self) -> GeoKodeOptions {
        self.options
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn local_search(&self) -> &S {
        &self.local_search
    }
}

impl<G: ClGeocoder, S: LocalSearch> GeocodingBackend for AppleBackend<G, S> {
    fn platform(&self) -> Platform {
        Platform::Apple
    }

    async fn geocode(&self, query: &str) -> Result<Vec<Location>, GeocodeFailure> {
        let placemarks = bridge::call_native(self.options.timeout, |completion| {
            self.geocoder.geocode_address_string(query, completion)
        })
        .await?;

        debug!(count = placemarks.len(), "Geocoder returned placemarks");
        Ok(placemarks
            .iter()
            .filter_map(mapper::placemark_to_location)
            .take(self.options.max_results)
            .collect())
    }

    async fn search(
        &self,
        query: &str,
        region: Option<SearchRegion>,
    ) -> Result<Vec<Location>, GeocodeFailure> {
        let request = LocalSearchRequest {
            natural_language_query: query.to_string(),
            region,
        };
        let response = bridge::call_native(self.options.timeout, |completion| {
            self.local_search.start(request, completion)
        })
        .await?;

        debug!(count = response.map_items.len(), "Local search returned map items");
        Ok(response
            .map_items
            .iter()
            .filter_map(mapper::map_item_to_location)
            .take(self.options.max_results)
            .collect())
    }
}
