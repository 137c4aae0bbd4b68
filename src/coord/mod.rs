//! Geographic coordinates and search regions
//!
//! [`Coordinates`] is the plain latitude/longitude pair used for search
//! bias; [`SearchRegion`] is the fixed-span box built around it.

use crate::constants::geocoder::SEARCH_REGION_SPAN_DEGREES;
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build coordinates from an optional latitude/longitude pair
    ///
    /// Both halves must be present; a lone latitude or longitude yields `None`.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A rectangular region described by a center and a span in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl SearchRegion {
    /// Region with the default local-search span around `center`
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            latitude_delta: SEARCH_REGION_SPAN_DEGREES,
            longitude_delta: SEARCH_REGION_SPAN_DEGREES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_in_range() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_from_parts_requires_both() {
        assert_eq!(
            Coordinates::from_parts(Some(1.0), Some(2.0)),
            Some(Coordinates::new(1.0, 2.0))
        );
        assert_eq!(Coordinates::from_parts(Some(1.0), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(2.0)), None);
    }

    #[test]
    fn test_region_around_uses_fixed_span() {
        let region = SearchRegion::around(Coordinates::new(37.33, -122.03));
        assert_relative_eq!(region.latitude_delta, 0.1);
        assert_relative_eq!(region.longitude_delta, 0.1);
        assert_eq!(region.center, Coordinates::new(37.33, -122.03));
    }
}
