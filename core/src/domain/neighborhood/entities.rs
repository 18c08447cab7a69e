use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::geocoding::entities::Coordinates;

/// A previously served household, shown as a map pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbyCustomer {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub install_date: Option<NaiveDate>,
}

/// Latitude/longitude box used as a cheap stand-in for a search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Square box of `radius_miles` around `center`, using a flat miles-per-degree factor.
    pub fn around(center: Coordinates, radius_miles: f64, miles_per_degree: f64) -> Self {
        let delta = radius_miles / miles_per_degree;
        Self {
            min_latitude: center.latitude - delta,
            max_latitude: center.latitude + delta,
            min_longitude: center.longitude - delta,
            max_longitude: center.longitude + delta,
        }
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}
