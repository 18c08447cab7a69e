use std::sync::Arc;

use crate::domain::{
    common::ReportPolicy, contaminant::ports::WaterDataClient, geocoding::ports::Geocoder,
    neighborhood::ports::CustomerRepository, report::ports::ReportRepository,
    review::ports::ReviewRepository,
};

/// Aggregate service over every port the report flows depend on.
pub struct Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    pub(crate) report_repository: Arc<RP>,
    pub(crate) customer_repository: Arc<CU>,
    pub(crate) review_repository: Arc<RV>,
    pub(crate) water_data_client: Arc<WD>,
    pub(crate) geocoder: Arc<GC>,
    pub(crate) policy: Arc<ReportPolicy>,
}

impl<RP, CU, RV, WD, GC> Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    pub fn new(
        report_repository: RP,
        customer_repository: CU,
        review_repository: RV,
        water_data_client: WD,
        geocoder: GC,
        policy: ReportPolicy,
    ) -> Self {
        Self {
            report_repository: Arc::new(report_repository),
            customer_repository: Arc::new(customer_repository),
            review_repository: Arc::new(review_repository),
            water_data_client: Arc::new(water_data_client),
            geocoder: Arc::new(geocoder),
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &ReportPolicy {
        &self.policy
    }
}

impl<RP, CU, RV, WD, GC> Clone for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    fn clone(&self) -> Self {
        Self {
            report_repository: Arc::clone(&self.report_repository),
            customer_repository: Arc::clone(&self.customer_repository),
            review_repository: Arc::clone(&self.review_repository),
            water_data_client: Arc::clone(&self.water_data_client),
            geocoder: Arc::clone(&self.geocoder),
            policy: Arc::clone(&self.policy),
        }
    }
}
