use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use waterreport_core::domain::{
    contaminant::entities::ContaminantView,
    geocoding::entities::Coordinates,
    neighborhood::entities::NearbyCustomer,
    review::entities::Review,
    water_report::{entities::WaterReportPage, ports::ReportPageService},
};

use crate::application::http::{
    report::validators::GetReportQuery,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReportPageResponse {
    pub report_id: String,
    pub client_name: String,
    pub first_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub full_address: String,
    pub map_center: Coordinates,
    pub map_token: Option<String>,
    pub contaminants: Vec<ContaminantView>,
    pub flagged_contaminants: usize,
    pub nearby_customers: Vec<NearbyCustomer>,
    pub nearby_customer_count: usize,
    pub reviews: Vec<Review>,
    pub total_five_star_reviews: u64,
}

impl ReportPageResponse {
    fn from_page(page: WaterReportPage, map_token: Option<String>) -> Self {
        let report = page.report;
        Self {
            first_name: report.first_name().to_string(),
            full_address: report.full_address(),
            report_id: report.id,
            client_name: report.client_name,
            address: report.address,
            city: report.city,
            state: report.state,
            zip: report.zip,
            map_center: page.map_center,
            map_token,
            contaminants: page.contaminants,
            flagged_contaminants: page.flagged_contaminants,
            nearby_customer_count: page.nearby_customers.len(),
            nearby_customers: page.nearby_customers,
            reviews: page.reviews.reviews,
            total_five_star_reviews: page.reviews.total_top_rated,
        }
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Report not found".to_string())
}

#[utoipa::path(
    get,
    path = "/report",
    tag = "report",
    summary = "Get report page",
    description = "Loads a report, marks it viewed and gathers contaminants, nearby customers and reviews for display.",
    params(
        ("id" = String, Query, description = "Report ID"),
    ),
    responses(
        (status = 200, body = ReportPageResponse),
        (status = 404, description = "Report not found"),
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<GetReportQuery>,
) -> Result<Response<ReportPageResponse>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(not_found)?;

    let page = state
        .service
        .build_page(id.trim())
        .await
        .map_err(|e| {
            error!(report_id = %id, "failed to load report: {}", e);
            not_found()
        })?
        .ok_or_else(not_found)?;

    Ok(Response::OK(ReportPageResponse::from_page(
        page,
        state.args.server.map_token.clone(),
    )))
}
