use tracing::debug;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    contaminant::ports::{ContaminantService, WaterDataClient},
    geocoding::ports::Geocoder,
    neighborhood::ports::{CustomerRepository, NeighborhoodService},
    report::ports::{ReportRepository, ReportService},
    review::ports::{ReviewRepository, ReviewService},
    water_report::{entities::WaterReportPage, ports::ReportPageService},
};

impl<RP, CU, RV, WD, GC> ReportPageService for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    async fn build_page(&self, report_id: &str) -> Result<Option<WaterReportPage>, CoreError> {
        let Some(report) = self.get_report(report_id).await? else {
            return Ok(None);
        };

        let map_center = report
            .coordinates()
            .unwrap_or(self.policy.default_center);

        let (outcome, nearby_customers, reviews) = futures::join!(
            self.contaminants_for(&report.city, &report.state),
            self.find_nearby_customers(map_center),
            self.select_reviews(&report.zip)
        );

        let contaminants = outcome.into_views(self.policy.diagnostics);
        let flagged_contaminants = contaminants
            .iter()
            .filter(|c| c.classification.is_flagged())
            .count();

        debug!(
            report_id,
            contaminants = contaminants.len(),
            customers = nearby_customers.len(),
            reviews = reviews.reviews.len(),
            "report page assembled"
        );

        Ok(Some(WaterReportPage {
            report,
            map_center,
            contaminants,
            flagged_contaminants,
            nearby_customers,
            reviews,
        }))
    }
}
