//! Location criteria for finding a delegation.
//!
//! Criteria are tried in a fixed order and the first satisfied one wins:
//! address, then latitude/longitude, then zip. They are never combined.

use std::sync::Arc;

use async_trait::async_trait;

/// What the caller knows about a location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationCriteria {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip: Option<String>,
}

/// The lookup path selected for a set of criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationStrategy<'a> {
    Address(&'a str),
    Point { latitude: f64, longitude: f64 },
    Zip(&'a str),
}

impl LocationCriteria {
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn point(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    pub fn zip(zip: impl Into<String>) -> Self {
        Self {
            zip: Some(zip.into()),
            ..Self::default()
        }
    }

    /// Collect criteria from loose key/value pairs.
    ///
    /// Recognizes `address`, `latitude`, `longitude`, and `zip`. Other keys,
    /// and coordinates that are not finite numbers, are dropped.
    pub fn from_params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "address" => criteria.address = Some(value),
                "latitude" => criteria.latitude = coordinate(&value),
                "longitude" => criteria.longitude = coordinate(&value),
                "zip" => criteria.zip = Some(value),
                _ => {}
            }
        }
        criteria
    }

    /// Pick the lookup path, or `None` when nothing usable was supplied.
    ///
    /// Blank strings count as absent.
    #[must_use]
    pub fn strategy(&self) -> Option<LocationStrategy<'_>> {
        if let Some(address) = non_blank(self.address.as_deref()) {
            return Some(LocationStrategy::Address(address));
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            return Some(LocationStrategy::Point {
                latitude,
                longitude,
            });
        }
        non_blank(self.zip.as_deref()).map(LocationStrategy::Zip)
    }
}

fn coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Turns a street address into coordinates.
///
/// The Sunlight API has no geocoding method, so callers that want
/// address lookups plug in their own provider.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns `(latitude, longitude)`, or `None` if the address is unknown.
    async fn geocode(&self, address: &str) -> Option<(f64, f64)>;
}

#[async_trait]
impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    async fn geocode(&self, address: &str) -> Option<(f64, f64)> {
        (**self).geocode(address).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock geocoder for unit testing.

    use super::Geocoder;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Geocoder that answers every address with a fixed result.
    pub struct MockGeocoder {
        result: Option<(f64, f64)>,
        calls: Mutex<Vec<String>>,
    }

    impl MockGeocoder {
        pub fn new(result: Option<(f64, f64)>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Get all addresses passed to `geocode`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Geocoder for MockGeocoder {
        async fn geocode(&self, address: &str) -> Option<(f64, f64)> {
            self.calls.lock().unwrap().push(address.to_string());
            self.result
        }
    }
}
