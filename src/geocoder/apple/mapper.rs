//! `CLPlacemark` / `MKMapItem` → [`Location`] mapping
//!
//! Placemarks carry no presence flag for their coordinate. A component is
//! treated as present when it is finite and differs from `0.0`, so a real
//! point on the equator or the prime meridian reports that component as
//! missing. Callers that need exact presence should read
//! [`Location::has_latitude`] with that limitation in mind.

use crate::constants::apple::{FORMATTED_ADDRESS_LINES_KEY, UNSET_COORDINATE};
use crate::geocoder::apple::native::{MapItem, Placemark};
use crate::location::Location;
use serde_json::{Map, Value};

/// Map one placemark; `None` when it has no location
pub fn placemark_to_location(placemark: &Placemark) -> Option<Location> {
    let coordinate = placemark.location?;

    Some(Location {
        feature_name: placemark.name.clone(),
        address_lines: formatted_address_lines(placemark.address_dictionary.as_ref()),
        admin_area: placemark.administrative_area.clone(),
        sub_admin_area: placemark.sub_administrative_area.clone(),
        locality: placemark.locality.clone(),
        sub_locality: placemark.sub_locality.clone(),
        thoroughfare: placemark.thoroughfare.clone(),
        sub_thoroughfare: placemark.sub_thoroughfare.clone(),
        postal_code: placemark.postal_code.clone(),
        country_code: placemark.iso_country_code.clone(),
        country_name: placemark.country.clone(),
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
        has_latitude: is_set(coordinate.latitude),
        has_longitude: is_set(coordinate.longitude),
        ..Default::default()
    })
}

/// Map one local-search hit; `None` without a located placemark
///
/// The item's own name, phone number and URL win over the placemark's.
pub fn map_item_to_location(item: &MapItem) -> Option<Location> {
    let mut location = placemark_to_location(item.placemark.as_ref()?)?;

    if item.name.is_some() {
        location.feature_name = item.name.clone();
    }
    location.phone = item.phone_number.clone();
    location.url = item.url.clone();
    Some(location)
}

fn is_set(component: f64) -> bool {
    component.is_finite() && component != UNSET_COORDINATE
}

/// `FormattedAddressLines` when it is an array of strings, else nothing
fn formatted_address_lines(dictionary: Option<&Map<String, Value>>) -> Vec<String> {
    let Some(Value::Array(lines)) = dictionary.and_then(|d| d.get(FORMATTED_ADDRESS_LINES_KEY)) else {
        return Vec::new();
    };

    lines
        .iter()
        .map(|line| line.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
