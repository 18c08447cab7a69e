use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::IntoParams;
use waterreport_core::domain::contaminant::{ports::ContaminantService, value_objects::WaterApiDiagnosis};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DebugWaterQuery {
    /// Defaults to Farragut.
    pub city: Option<String>,
    /// Two-letter state code, defaults to TN.
    pub state: Option<String>,
}

#[utoipa::path(
    get,
    path = "/debug-water",
    tag = "diagnostics",
    summary = "Diagnose the water data API",
    description = "Runs the utility lookup and results fetch for a city and reports each step, without exposing the API key.",
    params(DebugWaterQuery),
    responses(
        (status = 200, body = WaterApiDiagnosis)
    )
)]
pub async fn debug_water(
    State(state): State<AppState>,
    Query(query): Query<DebugWaterQuery>,
) -> Result<Response<WaterApiDiagnosis>, ApiError> {
    let city = query.city.unwrap_or_else(|| "Farragut".to_string());
    let region = query.state.unwrap_or_else(|| "TN".to_string());

    let diagnosis = state.service.diagnose_water_api(&city, &region).await;

    Ok(Response::OK(diagnosis))
}
