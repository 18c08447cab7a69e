use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    review::{entities::Review, value_objects::ReviewSelection},
};

#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    fn find_by_zip(
        &self,
        zip: &str,
        rating: i32,
    ) -> impl Future<Output = Result<Vec<Review>, CoreError>> + Send;

    fn find_outside_zip(
        &self,
        zip: &str,
        rating: i32,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Review>, CoreError>> + Send;

    fn count_by_rating(&self, rating: i32) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReviewService: Send + Sync {
    fn select_reviews(&self, zip: &str) -> impl Future<Output = ReviewSelection> + Send;
}
