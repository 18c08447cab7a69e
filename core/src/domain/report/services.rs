use tracing::{error, info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    contaminant::ports::WaterDataClient,
    geocoding::ports::Geocoder,
    neighborhood::ports::CustomerRepository,
    report::{
        entities::Report,
        ports::{ReportRepository, ReportService},
        value_objects::{CreateReportInput, CreatedReport},
    },
    review::ports::ReviewRepository,
};

impl<RP, CU, RV, WD, GC> ReportService for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    async fn create_report(&self, input: CreateReportInput) -> Result<CreatedReport, CoreError> {
        let blank = input.lead.blank_fields();
        if !blank.is_empty() {
            warn!(fields = ?blank, "rejecting lead with blank fields");
            return Err(CoreError::Invalid);
        }

        let (coordinates, geocoded) = match input.coordinates {
            Some(coordinates) => (Some(coordinates), false),
            None => {
                let address = input.lead.one_line_address();
                (self.geocoder.geocode(&address).await, true)
            }
        };

        let report = self
            .report_repository
            .create(Report::new(input.lead, coordinates))
            .await
            .map_err(|e| {
                error!("failed to store report: {}", e);
                e
            })?;

        info!(report_id = %report.id, geocoded, located = coordinates.is_some(), "report created");

        Ok(CreatedReport { report, geocoded })
    }

    async fn get_report(&self, id: &str) -> Result<Option<Report>, CoreError> {
        let Some(report) = self.report_repository.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Err(e) = self.report_repository.mark_viewed(id).await {
            warn!(report_id = %id, "failed to mark report viewed: {}", e);
        } else if !report.viewed {
            info!(report_id = %id, "report viewed for the first time");
        }

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::{
        common::{ReportPolicy, services::test_support::Mocks},
        geocoding::entities::Coordinates,
        report::value_objects::LeadDetails,
    };

    fn lead() -> LeadDetails {
        LeadDetails {
            client_name: "Dana Whitfield".to_string(),
            address: "12 Kingston Pike".to_string(),
            city: "Farragut".to_string(),
            state: "TN".to_string(),
            zip: "37934".to_string(),
            phone: Some("865-555-0100".to_string()),
        }
    }

    fn echo_create(mocks: &mut Mocks) {
        mocks
            .reports
            .expect_create()
            .times(1)
            .returning(|report| Box::pin(async move { Ok(report) }));
    }

    #[tokio::test]
    async fn test_supplied_coordinates_skip_geocoding() {
        let mut mocks = Mocks::new();
        mocks.geocoder.expect_geocode().times(0);
        echo_create(&mut mocks);
        let service = mocks.into_service(ReportPolicy::default());

        let created = service
            .create_report(CreateReportInput {
                lead: lead(),
                coordinates: Some(Coordinates::new(35.9, -84.1)),
            })
            .await
            .unwrap();

        assert!(!created.geocoded);
        assert_eq!(created.report.coordinates(), Some(Coordinates::new(35.9, -84.1)));
    }

    #[tokio::test]
    async fn test_missing_coordinates_are_geocoded() {
        let mut mocks = Mocks::new();
        mocks
            .geocoder
            .expect_geocode()
            .withf(|address| address == "12 Kingston Pike, Farragut, TN 37934")
            .times(1)
            .returning(|_| Box::pin(async { Some(Coordinates::new(35.88, -84.16)) }));
        echo_create(&mut mocks);
        let service = mocks.into_service(ReportPolicy::default());

        let created = service
            .create_report(CreateReportInput {
                lead: lead(),
                coordinates: None,
            })
            .await
            .unwrap();

        assert!(created.geocoded);
        assert_eq!(created.report.latitude, Some(35.88));
        assert!(!created.report.viewed);
    }

    #[tokio::test]
    async fn test_failed_geocoding_still_stores_report() {
        let mut mocks = Mocks::new();
        mocks
            .geocoder
            .expect_geocode()
            .returning(|_| Box::pin(async { None }));
        echo_create(&mut mocks);
        let service = mocks.into_service(ReportPolicy::default());

        let created = service
            .create_report(CreateReportInput {
                lead: lead(),
                coordinates: None,
            })
            .await
            .unwrap();

        assert!(created.geocoded);
        assert_eq!(created.report.coordinates(), None);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let mut mocks = Mocks::new();
        mocks.reports.expect_create().times(0);
        let service = mocks.into_service(ReportPolicy::default());

        let result = service
            .create_report(CreateReportInput {
                lead: LeadDetails {
                    zip: " ".to_string(),
                    ..lead()
                },
                coordinates: None,
            })
            .await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut mocks = Mocks::new();
        mocks
            .reports
            .expect_create()
            .returning(|_| Box::pin(async { Err(CoreError::InternalServerError) }));
        let service = mocks.into_service(ReportPolicy::default());

        let result = service
            .create_report(CreateReportInput {
                lead: lead(),
                coordinates: Some(Coordinates::new(35.9, -84.1)),
            })
            .await;

        assert_eq!(result, Err(CoreError::InternalServerError));
    }

    #[tokio::test]
    async fn test_viewing_twice_keeps_viewed_set() {
        let stored = Report::new(lead(), None);
        let id = stored.id.clone();
        let store = Arc::new(Mutex::new(stored));

        let mut mocks = Mocks::new();
        let reader = Arc::clone(&store);
        mocks.reports.expect_get_by_id().times(2).returning(move |_| {
            let report = reader.lock().unwrap().clone();
            Box::pin(async move { Ok(Some(report)) })
        });
        let writer = Arc::clone(&store);
        mocks.reports.expect_mark_viewed().times(2).returning(move |_| {
            writer.lock().unwrap().viewed = true;
            Box::pin(async { Ok(()) })
        });
        let service = mocks.into_service(ReportPolicy::default());

        let first = service.get_report(&id).await.unwrap().unwrap();
        assert!(!first.viewed);
        assert!(store.lock().unwrap().viewed);

        let second = service.get_report(&id).await.unwrap().unwrap();
        assert!(second.viewed);
        assert!(store.lock().unwrap().viewed);
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_marked() {
        let mut mocks = Mocks::new();
        mocks
            .reports
            .expect_get_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        mocks.reports.expect_mark_viewed().times(0);
        let service = mocks.into_service(ReportPolicy::default());

        assert_eq!(service.get_report("deadbeef0000").await, Ok(None));
    }

    #[tokio::test]
    async fn test_mark_failure_does_not_hide_report() {
        let mut mocks = Mocks::new();
        mocks.reports.expect_get_by_id().returning(|_| {
            let report = Report::new(lead(), None);
            Box::pin(async move { Ok(Some(report)) })
        });
        mocks
            .reports
            .expect_mark_viewed()
            .returning(|_| Box::pin(async { Err(CoreError::InternalServerError) }));
        let service = mocks.into_service(ReportPolicy::default());

        assert!(service.get_report("abc").await.unwrap().is_some());
    }
}
