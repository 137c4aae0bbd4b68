//! `Address` → [`Location`] mapping

use crate::geocoder::android::native::{Address, Bundle, BundleValue};
use crate::location::{ExtraValue, Location};
use tracing::warn;

/// Map one native address
///
/// Returns `None` when the address reports neither latitude nor longitude.
/// Every other field is copied as-is; an address line the native object
/// cannot read becomes an empty string so the line count stays intact.
pub fn address_to_location(address: &Address) -> Option<Location> {
    if !address.has_latitude() && !address.has_longitude() {
        return None;
    }

    let line_count = usize::try_from(address.max_address_line_index() + 1).unwrap_or(0);
    let address_lines = (0..line_count)
        .map(|index| address.address_line(index).unwrap_or_default().to_string())
        .collect();

    Some(Location {
        feature_name: address.feature_name.clone(),
        address_lines,
        admin_area: address.admin_area.clone(),
        sub_admin_area: address.sub_admin_area.clone(),
        locality: address.locality.clone(),
        sub_locality: address.sub_locality.clone(),
        thoroughfare: address.thoroughfare.clone(),
        sub_thoroughfare: address.sub_thoroughfare.clone(),
        premises: address.premises.clone(),
        postal_code: address.postal_code.clone(),
        country_code: address.country_code.clone(),
        country_name: address.country_name.clone(),
        latitude: address.latitude.unwrap_or_default(),
        longitude: address.longitude.unwrap_or_default(),
        has_latitude: address.has_latitude(),
        has_longitude: address.has_longitude(),
        phone: address.phone.clone(),
        url: address.url.clone(),
        extras: address.extras.as_ref().map(bundle_to_extras).unwrap_or_default(),
    })
}

/// Keep the primitive entries of a bundle, in order
///
/// Null entries are skipped; unreadable or non-primitive entries are dropped
/// with a warning.
pub fn bundle_to_extras(bundle: &Bundle) -> Vec<(String, ExtraValue)> {
    let mut extras = Vec::with_capacity(bundle.len());

    for key in bundle.keys() {
        let value = match bundle.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(e) => {
                warn!(key, "Error retrieving bundle value: {}", e);
                continue;
            }
        };

        let extra = match value {
            BundleValue::Int(v) => ExtraValue::Integer(*v),
            BundleValue::Long(v) => ExtraValue::Long(*v),
            BundleValue::Float(v) => ExtraValue::Float(*v),
            BundleValue::Double(v) => ExtraValue::Double(*v),
            BundleValue::Boolean(v) => ExtraValue::Boolean(*v),
            BundleValue::String(v) => ExtraValue::String(v.clone()),
            BundleValue::Null => continue,
            other => {
                warn!(key, kind = other.kind(), "Dropping unsupported bundle value");
                continue;
            }
        };
        extras.push((key.to_string(), extra));
    }

    extras
}
