//! CoreLocation / MapKit surface
//!
//! Rust shapes of `CLPlacemark`, `MKMapItem` and the local-search request
//! and response, plus the traits an Objective-C bridge (or a fake)
//! implements. Completion handlers are [`Completion`]s: a `(result, error)`
//! callback becomes `succeed(result)` or `fail(error)`.

use crate::bridge::Completion;
use crate::coord::SearchRegion;
use crate::geocoder::NativeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// `CLLocation.coordinate`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacemarkLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// A resolved place (`CLPlacemark` / `MKPlacemark`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placemark {
    pub name: Option<String>,
    pub thoroughfare: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub administrative_area: Option<String>,
    pub sub_administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub iso_country_code: Option<String>,
    pub country: Option<String>,
    pub location: Option<PlacemarkLocation>,
    /// The deprecated, loosely typed `addressDictionary`
    pub address_dictionary: Option<Map<String, Value>>,
}

/// A local-search hit (`MKMapItem`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapItem {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub url: Option<String>,
    pub placemark: Option<Placemark>,
}

/// `MKLocalSearchRequest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSearchRequest {
    pub natural_language_query: String,
    pub region: Option<SearchRegion>,
}

/// `MKLocalSearchResponse`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalSearchResponse {
    pub map_items: Vec<MapItem>,
}

/// `CLGeocoder`
pub trait ClGeocoder: Send + Sync + 'static {
    /// `geocodeAddressString(_:completionHandler:)`
    fn geocode_address_string(
        &self,
        address: &str,
        completion: Completion<Vec<Placemark>>,
    ) -> Result<(), NativeError>;
}

/// `MKLocalSearch`
pub trait LocalSearch: Send + Sync + 'static {
    /// Create a search for `request` and `start(completionHandler:)` it
    fn start(
        &self,
        request: LocalSearchRequest,
        completion: Completion<LocalSearchResponse>,
    ) -> Result<(), NativeError>;
}

impl<T: ClGeocoder> ClGeocoder for Arc<T> {
    fn geocode_address_string(
        &self,
        address: &str,
        completion: Completion<Vec<Placemark>>,
    ) -> Result<(), NativeError> {
        (**self).geocode_address_string(address, completion)
    }
}

impl<T: LocalSearch> LocalSearch for Arc<T> {
    fn start(
        &self,
        request: LocalSearchRequest,
        completion: Completion<LocalSearchResponse>,
    ) -> Result<(), NativeError> {
        (**self).start(request, completion)
    }
}
