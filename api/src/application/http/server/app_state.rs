use std::sync::Arc;

use axum::extract::FromRef;
use waterreport_core::application::WaterReportService;

use crate::application::auth::IngestSecret;
use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: WaterReportService,
    pub ingest_secret: IngestSecret,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: WaterReportService) -> Self {
        let ingest_secret = IngestSecret::new(&args.auth.api_secret);
        Self {
            args,
            service,
            ingest_secret,
        }
    }
}

impl FromRef<AppState> for IngestSecret {
    fn from_ref(state: &AppState) -> Self {
        state.ingest_secret.clone()
    }
}
