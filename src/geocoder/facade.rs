//! The unified geocoding facade

use crate::coord::{Coordinates, SearchRegion};
use crate::geocoder::{GeocodeOutcome, GeocodingBackend, Platform};
use crate::location::Location;
use tracing::{debug, warn};

/// Join address components into one free-form query
///
/// Components are separated by a single space and otherwise left untouched.
pub fn join_components<S: AsRef<str>>(components: &[S]) -> String {
    components
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Platform-neutral geocoder
///
/// The plain methods return `None` when there was no query or the native
/// service failed, and `Some` (possibly empty) when it answered. The
/// `*_detailed` variants keep the three cases apart.
///
/// ```no_run
/// # async fn demo<B: geokode::geocoder::GeocodingBackend>(backend: B) {
/// use geokode::geocoder::GeoKode;
///
/// let geokode = GeoKode::new(backend);
/// if let Some(results) = geokode.locate_components(&["1600", "Amphitheatre Pkwy"]).await {
///     for location in results {
///         println!("{:?}", location.coordinates());
///     }
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeoKode<B> {
    backend: B,
}

impl<B: GeocodingBackend> GeoKode<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn platform(&self) -> Platform {
        self.backend.platform()
    }

    /// Geocode a list of address components (street, city, ...)
    pub async fn locate_components<S: AsRef<str>>(&self, components: &[S]) -> Option<Vec<Location>> {
        self.locate(&join_components(components)).await
    }

    /// Geocode a single address string
    pub async fn locate(&self, query: &str) -> Option<Vec<Location>> {
        let outcome = self.locate_detailed(query).await;
        collapse(outcome, query)
    }

    /// Search places and points of interest near an optional user location
    ///
    /// The bias applies only when both latitude and longitude are given.
    pub async fn auto_search(
        &self,
        query: &str,
        user_latitude: Option<f64>,
        user_longitude: Option<f64>,
    ) -> Option<Vec<Location>> {
        let outcome = self
            .auto_search_detailed(query, user_latitude, user_longitude)
            .await;
        collapse(outcome, query)
    }

    pub async fn locate_components_detailed<S: AsRef<str>>(&self, components: &[S]) -> GeocodeOutcome {
        let query = join_components(components);
        self.locate_detailed(&query).await
    }

    pub async fn locate_detailed(&self, query: &str) -> GeocodeOutcome {
        if is_blank(query) {
            return GeocodeOutcome::NoQuery;
        }

        debug!(platform = %self.platform(), query, "Geocoding");
        self.backend.geocode(query).await.into()
    }

    pub async fn auto_search_detailed(
        &self,
        query: &str,
        user_latitude: Option<f64>,
        user_longitude: Option<f64>,
    ) -> GeocodeOutcome {
        if is_blank(query) {
            return GeocodeOutcome::NoQuery;
        }

        let region = search_region(user_latitude, user_longitude);
        debug!(platform = %self.platform(), query, biased = region.is_some(), "Searching");
        self.backend.search(query, region).await.into()
    }
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

fn search_region(user_latitude: Option<f64>, user_longitude: Option<f64>) -> Option<SearchRegion> {
    let center = Coordinates::from_parts(user_latitude, user_longitude)?;
    match center.validate() {
        Ok(()) => Some(SearchRegion::around(center)),
        Err(e) => {
            warn!("Ignoring search bias: {}", e);
            None
        }
    }
}

fn collapse(outcome: GeocodeOutcome, query: &str) -> Option<Vec<Location>> {
    if let GeocodeOutcome::Failed(failure) = &outcome {
        warn!(query, "Failed to retrieve location: {}", failure);
    }
    outcome.into_option()
}
