use super::handlers::{__path_debug_water, debug_water};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(debug_water))]
pub struct DiagnosticsApiDoc;

/// Mounted only when diagnostics are enabled.
pub fn diagnostics_routes(state: AppState) -> Router<AppState> {
    if !state.service.policy().diagnostics {
        return Router::new();
    }

    Router::new().route(
        &format!("{}/api/debug-water", state.args.server.root_path),
        get(debug_water),
    )
}
