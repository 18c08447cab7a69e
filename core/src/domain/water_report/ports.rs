use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, water_report::entities::WaterReportPage,
};

#[cfg_attr(test, mockall::automock)]
pub trait ReportPageService: Send + Sync {
    /// `Ok(None)` when no report has this id. Enrichment failures never fail the page.
    fn build_page(
        &self,
        report_id: &str,
    ) -> impl Future<Output = Result<Option<WaterReportPage>, CoreError>> + Send;
}
