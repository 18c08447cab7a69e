use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::review::entities::Review;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPolicy {
    /// Number of testimonials a page aims to show.
    pub target: usize,
    /// Candidates requested per missing slot, to survive author dedup.
    pub backfill_factor: usize,
    pub rating: i32,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            target: 4,
            backfill_factor: 3,
            rating: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewSelection {
    pub reviews: Vec<Review>,
    /// Every top-rated review on record, shown as a trust figure.
    pub total_top_rated: u64,
}
