use axum::extract::State;
use axum_extra::extract::Host;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use waterreport_core::domain::{geocoding::entities::Coordinates, report::ports::ReportService};

use crate::application::http::{
    report::validators::{CreateReportValidator, report_base, report_url},
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateReportResponse {
    pub success: bool,
    pub report_id: String,
    pub url: String,
    pub geocoded: bool,
    pub coordinates: Option<Coordinates>,
}

#[utoipa::path(
    post,
    path = "/create-report",
    tag = "report",
    summary = "Create report",
    description = "Stores a lead's report, geocoding the address when no coordinates are supplied, and returns the public link.",
    request_body = CreateReportValidator,
    responses(
        (status = 200, body = CreateReportResponse),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Bearer token rejected"),
    )
)]
pub async fn create_report(
    State(state): State<AppState>,
    host: Option<Host>,
    ValidateJson(payload): ValidateJson<CreateReportValidator>,
) -> Result<Response<CreateReportResponse>, ApiError> {
    let input = payload.into_input()?;

    // Resolved before storing so a link failure never leaves an orphaned lead.
    let base = report_base(
        state.args.server.public_base_url.as_deref(),
        host.as_ref().map(|Host(host)| host.as_str()),
    )?;

    let created = state
        .service
        .create_report(input)
        .await
        .map_err(ApiError::from)?;

    let url = report_url(&base, &created.report.id);

    info!(report_id = %created.report.id, "report link issued");

    Ok(Response::OK(CreateReportResponse {
        success: true,
        coordinates: created.report.coordinates(),
        report_id: created.report.id,
        url,
        geocoded: created.geocoded,
    }))
}
