use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    report::{
        entities::Report,
        value_objects::{CreateReportInput, CreatedReport},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait ReportRepository: Send + Sync {
    fn create(&self, report: Report) -> impl Future<Output = Result<Report, CoreError>> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<Option<Report>, CoreError>> + Send;

    /// Sets `viewed`; a no-op for reports already viewed.
    fn mark_viewed(&self, id: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReportService: Send + Sync {
    fn create_report(
        &self,
        input: CreateReportInput,
    ) -> impl Future<Output = Result<CreatedReport, CoreError>> + Send;

    /// Loads a report and records the view.
    fn get_report(&self, id: &str) -> impl Future<Output = Result<Option<Report>, CoreError>> + Send;
}
