use super::handlers::{__path_create_report, create_report, get_report};
use crate::application::{auth::require_ingest_token, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_report))]
pub struct IngestApiDoc;

pub fn report_routes(state: AppState) -> Router<AppState> {
    let ingest = Router::new()
        .route(
            &format!("{}/api/create-report", state.args.server.root_path),
            post(create_report),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_ingest_token,
        ));

    Router::new()
        .route(
            &format!("{}/report", state.args.server.root_path),
            get(get_report),
        )
        .merge(ingest)
}
