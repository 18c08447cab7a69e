use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub author: String,
    pub quote: String,
    pub zip: String,
    pub rating: i32,
}
