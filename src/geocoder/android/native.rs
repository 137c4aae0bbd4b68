//! Android `Geocoder` surface
//!
//! Rust shapes of `android.location.Address` and `android.os.Bundle`, and the
//! trait a JNI binding (or a fake) implements to expose the device geocoder.

use crate::bridge::Completion;
use crate::constants::android::NO_ADDRESS_LINES;
use crate::geocoder::NativeError;
use serde::{Deserialize, Serialize};

/// A value stored in a [`Bundle`]
///
/// Covers the primitive kinds plus the container kinds a real bundle can
/// hold. `Unreadable` stands for an entry whose read throws (for example a
/// parcelable class that cannot be unmarshalled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BundleValue {
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    StringArray(Vec<String>),
    IntArray(Vec<i32>),
    Bundle(Bundle),
    Unreadable(String),
}

impl BundleValue {
    /// Short kind name, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::StringArray(_) => "string_array",
            Self::IntArray(_) => "int_array",
            Self::Bundle(_) => "bundle",
            Self::Unreadable(_) => "unreadable",
        }
    }
}

/// Ordered key/value bag attached to an [`Address`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: Vec<(String, BundleValue)>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`
    pub fn put(&mut self, key: impl Into<String>, value: BundleValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`Bundle::put`]
    pub fn with(mut self, key: impl Into<String>, value: BundleValue) -> Self {
        self.put(key, value);
        self
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Read the value stored under `key`
    ///
    /// `Ok(None)` for a missing key; an error for an entry that cannot be
    /// unmarshalled, as `Bundle.get` throws on Android.
    pub fn get(&self, key: &str) -> Result<Option<&BundleValue>, NativeError> {
        match self.entries.iter().find(|(k, _)| k == key) {
            Some((_, BundleValue::Unreadable(reason))) => Err(NativeError::new(reason.clone())),
            Some((_, value)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A geocoded address as returned by `Geocoder.getFromLocationName`
///
/// Address lines are indexed; an index that was never set reads as `None`,
/// matching `Address.getAddressLine`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub feature_name: Option<String>,
    pub address_lines: Vec<Option<String>>,
    pub admin_area: Option<String>,
    pub sub_admin_area: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub thoroughfare: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub premises: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub extras: Option<Bundle>,
}

impl Address {
    /// Set the line at `index`, growing the line table as needed
    pub fn set_address_line(&mut self, index: usize, line: impl Into<String>) {
        if self.address_lines.len() <= index {
            self.address_lines.resize(index + 1, None);
        }
        self.address_lines[index] = Some(line.into());
    }

    /// The line at `index`, if one was set
    pub fn address_line(&self, index: usize) -> Option<&str> {
        self.address_lines.get(index).and_then(|line| line.as_deref())
    }

    /// Largest line index in use, or `-1` when there are no lines
    pub fn max_address_line_index(&self) -> i32 {
        match self.address_lines.len() {
            0 => NO_ADDRESS_LINES,
            len => i32::try_from(len - 1).unwrap_or(i32::MAX),
        }
    }

    pub fn has_latitude(&self) -> bool {
        self.latitude.is_some()
    }

    pub fn has_longitude(&self) -> bool {
        self.longitude.is_some()
    }
}

/// The device geocoder
///
/// Both lookups ask for at most `max_results` addresses. The listener form
/// exists from API level 33; older devices only offer the blocking form,
/// which must not be called on an async executor thread.
pub trait AndroidGeocoder: Send + Sync + 'static {
    /// `Geocoder.isPresent()`: whether a geocoding backend is installed
    fn is_present(&self) -> bool {
        true
    }

    /// Blocking `getFromLocationName(locationName, maxResults)`
    fn get_from_location_name(
        &self,
        location_name: &str,
        max_results: usize,
    ) -> Result<Vec<Address>, NativeError>;

    /// `getFromLocationName(locationName, maxResults, listener)`
    ///
    /// The listener is `completion`: `onGeocode` maps to
    /// [`Completion::succeed`], `onError` to [`Completion::fail`].
    fn get_from_location_name_with_listener(
        &self,
        location_name: &str,
        max_results: usize,
        completion: Completion<Vec<Address>>,
    ) -> Result<(), NativeError>;
}
