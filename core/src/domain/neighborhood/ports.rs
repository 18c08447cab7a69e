use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    geocoding::entities::Coordinates,
    neighborhood::entities::{BoundingBox, NearbyCustomer},
};

#[cfg_attr(test, mockall::automock)]
pub trait CustomerRepository: Send + Sync {
    fn find_within(
        &self,
        bounds: BoundingBox,
    ) -> impl Future<Output = Result<Vec<NearbyCustomer>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait NeighborhoodService: Send + Sync {
    fn find_nearby_customers(
        &self,
        center: Coordinates,
    ) -> impl Future<Output = Vec<NearbyCustomer>> + Send;
}
