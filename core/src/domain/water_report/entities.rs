use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    contaminant::entities::ContaminantView, geocoding::entities::Coordinates,
    neighborhood::entities::NearbyCustomer, report::entities::Report,
    review::value_objects::ReviewSelection,
};

/// Everything a report page renders, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WaterReportPage {
    pub report: Report,
    pub map_center: Coordinates,
    pub contaminants: Vec<ContaminantView>,
    /// Contaminants classified exceeds or warning.
    pub flagged_contaminants: usize,
    pub nearby_customers: Vec<NearbyCustomer>,
    pub reviews: ReviewSelection,
}
