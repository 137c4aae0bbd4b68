//! Normalized geocoding result
//!
//! [`Location`] is the one record every platform backend produces. Its shape
//! follows the Android `Address` class, the richer of the two native models;
//! fields a platform cannot supply are simply absent.

use crate::constants::android::NO_ADDRESS_LINES;
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize, Serializer};

/// A primitive value carried in [`Location::extras`]
///
/// Native key/value bags may hold anything; only these kinds survive mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExtraValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl std::fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
        }
    }
}

/// One normalized geocoding result
///
/// Immutable once built: the platform mappers construct it, callers read it
/// through accessors. Latitude and longitude are only meaningful when the
/// matching `has_*` flag is set; [`Location::latitude`] and
/// [`Location::longitude`] enforce that.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub(crate) feature_name: Option<String>,
    #[serde(default)]
    pub(crate) address_lines: Vec<String>,
    #[serde(default)]
    pub(crate) admin_area: Option<String>,
    #[serde(default)]
    pub(crate) sub_admin_area: Option<String>,
    #[serde(default)]
    pub(crate) locality: Option<String>,
    #[serde(default)]
    pub(crate) sub_locality: Option<String>,
    #[serde(default)]
    pub(crate) thoroughfare: Option<String>,
    #[serde(default)]
    pub(crate) sub_thoroughfare: Option<String>,
    #[serde(default)]
    pub(crate) premises: Option<String>,
    #[serde(default)]
    pub(crate) postal_code: Option<String>,
    #[serde(default)]
    pub(crate) country_code: Option<String>,
    #[serde(default)]
    pub(crate) country_name: Option<String>,
    #[serde(default)]
    pub(crate) latitude: f64,
    #[serde(default)]
    pub(crate) longitude: f64,
    #[serde(default)]
    pub(crate) has_latitude: bool,
    #[serde(default)]
    pub(crate) has_longitude: bool,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) extras: Vec<(String, ExtraValue)>,
}

impl Location {
    /// Start building a location by hand (host bindings, fixtures)
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    pub fn feature_name(&self) -> Option<&str> {
        self.feature_name.as_deref()
    }

    /// Address lines in display order
    pub fn address_lines(&self) -> &[String] {
        &self.address_lines
    }

    /// Index of the last address line, `-1` when there are none
    ///
    /// Derived from [`Location::address_lines`]; kept for callers that still
    /// expect the Android-style count.
    pub fn max_address_line_index(&self) -> i32 {
        i32::try_from(self.address_lines.len())
            .map(|len| len - 1)
            .unwrap_or(i32::MAX)
            .max(NO_ADDRESS_LINES)
    }

    pub fn admin_area(&self) -> Option<&str> {
        self.admin_area.as_deref()
    }

    pub fn sub_admin_area(&self) -> Option<&str> {
        self.sub_admin_area.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn sub_locality(&self) -> Option<&str> {
        self.sub_locality.as_deref()
    }

    pub fn thoroughfare(&self) -> Option<&str> {
        self.thoroughfare.as_deref()
    }

    pub fn sub_thoroughfare(&self) -> Option<&str> {
        self.sub_thoroughfare.as_deref()
    }

    pub fn premises(&self) -> Option<&str> {
        self.premises.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// ISO 3166-1 alpha-2 country code
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country_name.as_deref()
    }

    /// Latitude, or `None` when the source did not report one
    pub fn latitude(&self) -> Option<f64> {
        self.has_latitude.then_some(self.latitude)
    }

    /// Longitude, or `None` when the source did not report one
    pub fn longitude(&self) -> Option<f64> {
        self.has_longitude.then_some(self.longitude)
    }

    pub fn has_latitude(&self) -> bool {
        self.has_latitude
    }

    pub fn has_longitude(&self) -> bool {
        self.has_longitude
    }

    /// Both coordinate components, when both are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude(), self.longitude())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Provider-specific key/value pairs, in native order
    pub fn extras(&self) -> &[(String, ExtraValue)] {
        &self.extras
    }

    /// Look up an extra by key (first match)
    pub fn extra(&self, key: &str) -> Option<&ExtraValue> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

/// Serialized form, which also carries the derived line index
#[derive(Serialize)]
struct LocationView<'a> {
    feature_name: Option<&'a str>,
    address_lines: &'a [String],
    max_address_line_index: i32,
    admin_area: Option<&'a str>,
    sub_admin_area: Option<&'a str>,
    locality: Option<&'a str>,
    sub_locality: Option<&'a str>,
    thoroughfare: Option<&'a str>,
    sub_thoroughfare: Option<&'a str>,
    premises: Option<&'a str>,
    postal_code: Option<&'a str>,
    country_code: Option<&'a str>,
    country_name: Option<&'a str>,
    latitude: f64,
    longitude: f64,
    has_latitude: bool,
    has_longitude: bool,
    phone: Option<&'a str>,
    url: Option<&'a str>,
    extras: &'a [(String, ExtraValue)],
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LocationView {
            feature_name: self.feature_name(),
            address_lines: self.address_lines(),
            max_address_line_index: self.max_address_line_index(),
            admin_area: self.admin_area(),
            sub_admin_area: self.sub_admin_area(),
            locality: self.locality(),
            sub_locality: self.sub_locality(),
            thoroughfare: self.thoroughfare(),
            sub_thoroughfare: self.sub_thoroughfare(),
            premises: self.premises(),
            postal_code: self.postal_code(),
            country_code: self.country_code(),
            country_name: self.country_name(),
            latitude: self.latitude,
            longitude: self.longitude,
            has_latitude: self.has_latitude,
            has_longitude: self.has_longitude,
            phone: self.phone(),
            url: self.url(),
            extras: self.extras(),
        }
        .serialize(serializer)
    }
}

/// Builder for [`Location`]
#[derive(Debug, Default)]
pub struct LocationBuilder {
    inner: Location,
}

impl LocationBuilder {
    pub fn feature_name(mut self, value: impl Into<String>) -> Self {
        self.inner.feature_name = Some(value.into());
        self
    }

    pub fn address_line(mut self, value: impl Into<String>) -> Self {
        self.inner.address_lines.push(value.into());
        self
    }

    pub fn admin_area(mut self, value: impl Into<String>) -> Self {
        self.inner.admin_area = Some(value.into());
        self
    }

    pub fn sub_admin_area(mut self, value: impl Into<String>) -> Self {
        self.inner.sub_admin_area = Some(value.into());
        self
    }

    pub fn locality(mut self, value: impl Into<String>) -> Self {
        self.inner.locality = Some(value.into());
        self
    }

    pub fn sub_locality(mut self, value: impl Into<String>) -> Self {
        self.inner.sub_locality = Some(value.into());
        self
    }

    pub fn thoroughfare(mut self, value: impl Into<String>) -> Self {
        self.inner.thoroughfare = Some(value.into());
        self
    }

    pub fn sub_thoroughfare(mut self, value: impl Into<String>) -> Self {
        self.inner.sub_thoroughfare = Some(value.into());
        self
    }

    pub fn premises(mut self, value: impl Into<String>) -> Self {
        self.inner.premises = Some(value.into());
        self
    }

    pub fn postal_code(mut self, value: impl Into<String>) -> Self {
        self.inner.postal_code = Some(value.into());
        self
    }

    pub fn country_code(mut self, value: impl Into<String>) -> Self {
        self.inner.country_code = Some(value.into());
        self
    }

    pub fn country_name(mut self, value: impl Into<String>) -> Self {
        self.inner.country_name = Some(value.into());
        self
    }

    pub fn latitude(mut self, value: f64) -> Self {
        self.inner.latitude = value;
        self.inner.has_latitude = true;
        self
    }

    pub fn longitude(mut self, value: f64) -> Self {
        self.inner.longitude = value;
        self.inner.has_longitude = true;
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.inner.phone = Some(value.into());
        self
    }

    pub fn url(mut self, value: impl Into<String>) -> Self {
        self.inner.url = Some(value.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: ExtraValue) -> Self {
        self.inner.extras.push((key.into(), value));
        self
    }

    pub fn build(self) -> Location {
        self.inner
    }
}
