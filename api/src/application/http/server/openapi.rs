use crate::application::http::{
    diagnostics::router::DiagnosticsApiDoc,
    health::{__path_health, health},
    report::{
        handlers::{__path_get_report, get_report},
        router::IngestApiDoc,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Water Report API"
    ),
    paths(get_report, health),
    nest(
        (path = "/api", api = IngestApiDoc),
    )
)]
pub struct ApiDoc;

/// Documented routes; the diagnostics endpoint only appears when it is mounted.
pub fn api_doc(diagnostics: bool) -> utoipa::openapi::OpenApi {
    let openapi = ApiDoc::openapi();
    if diagnostics {
        openapi.nest("/api", DiagnosticsApiDoc::openapi())
    } else {
        openapi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_path(diagnostics: bool, path: &str) -> bool {
        api_doc(diagnostics).paths.paths.contains_key(path)
    }

    #[test]
    fn test_debug_water_documented_only_with_diagnostics() {
        assert!(!has_path(false, "/api/debug-water"));
        assert!(has_path(true, "/api/debug-water"));
    }

    #[test]
    fn test_public_routes_always_documented() {
        for diagnostics in [false, true] {
            assert!(has_path(diagnostics, "/api/create-report"));
            assert!(has_path(diagnostics, "/report"));
            assert!(has_path(diagnostics, "/health"));
        }
    }
}
