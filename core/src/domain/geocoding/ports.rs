use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, geocoding::entities::Coordinates};

/// A single external geocoding backend.
///
/// `Ok(None)` means the backend answered but had no match.
#[cfg_attr(test, mockall::automock)]
pub trait GeocodingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn locate(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, CoreError>> + Send;
}

/// Resolves a one-line address, swallowing every provider failure.
#[cfg_attr(test, mockall::automock)]
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> impl Future<Output = Option<Coordinates>> + Send;
}
