use tracing::{debug, error};

use crate::domain::{
    common::services::Service,
    contaminant::ports::WaterDataClient,
    geocoding::{entities::Coordinates, ports::Geocoder},
    neighborhood::{
        entities::{BoundingBox, NearbyCustomer},
        ports::{CustomerRepository, NeighborhoodService},
    },
    report::ports::ReportRepository,
    review::ports::ReviewRepository,
};

impl<RP, CU, RV, WD, GC> NeighborhoodService for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    async fn find_nearby_customers(&self, center: Coordinates) -> Vec<NearbyCustomer> {
        let policy = &self.policy.neighborhood;
        let mut widest = Vec::new();

        for radius in &policy.radius_tiers_miles {
            let bounds = BoundingBox::around(center, *radius, policy.miles_per_degree);

            match self.customer_repository.find_within(bounds).await {
                Ok(customers) if customers.len() >= policy.quorum => {
                    debug!(radius, found = customers.len(), "customer quorum reached");
                    return customers;
                }
                Ok(customers) => {
                    debug!(radius, found = customers.len(), "below quorum, widening");
                    widest = customers;
                }
                Err(e) => {
                    error!(radius, "failed to fetch nearby customers: {}", e);
                    widest = Vec::new();
                }
            }
        }

        widest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{ReportPolicy, entities::app_errors::CoreError, services::test_support::Mocks},
        neighborhood::value_objects::NeighborhoodPolicy,
    };

    const CENTER: Coordinates = Coordinates {
        latitude: 35.8868,
        longitude: -84.153,
    };

    /// Customers spread along a line east of the center, one every half mile.
    fn customers_east(count: usize) -> Vec<NearbyCustomer> {
        (1..=count)
            .map(|i| NearbyCustomer {
                latitude: CENTER.latitude,
                longitude: CENTER.longitude + (i as f64 * 0.5) / 69.0,
                install_date: None,
            })
            .collect()
    }

    fn backed_by(customers: Vec<NearbyCustomer>) -> Mocks {
        let mut mocks = Mocks::new();
        mocks
            .customers
            .expect_find_within()
            .returning(move |bounds| {
                let inside: Vec<NearbyCustomer> = customers
                    .iter()
                    .filter(|c| bounds.contains(Coordinates::new(c.latitude, c.longitude)))
                    .cloned()
                    .collect();
                Box::pin(async move { Ok(inside) })
            });
        mocks
    }

    #[tokio::test]
    async fn test_stops_at_first_tier_reaching_quorum() {
        // 5 customers within 3 miles, 25 within 10 miles
        let mut customers = customers_east(5);
        customers.extend((0..20).map(|i| NearbyCustomer {
            latitude: CENTER.latitude + (5.0 + i as f64 * 0.2) / 69.0,
            longitude: CENTER.longitude,
            install_date: None,
        }));
        customers.push(NearbyCustomer {
            latitude: CENTER.latitude + 20.0 / 69.0,
            longitude: CENTER.longitude,
            install_date: None,
        });
        let service = backed_by(customers).into_service(ReportPolicy::default());

        let found = service.find_nearby_customers(CENTER).await;

        assert_eq!(found.len(), 25);
    }

    #[tokio::test]
    async fn test_small_radius_enough_when_dense() {
        let service = backed_by(customers_east(5)).into_service(ReportPolicy {
            neighborhood: NeighborhoodPolicy {
                quorum: 3,
                ..NeighborhoodPolicy::default()
            },
            ..ReportPolicy::default()
        });

        // 3-mile box holds the first 5 half-mile steps
        assert_eq!(service.find_nearby_customers(CENTER).await.len(), 5);
    }

    #[tokio::test]
    async fn test_largest_tier_returned_below_quorum() {
        let service = backed_by(customers_east(12)).into_service(ReportPolicy::default());

        let found = service.find_nearby_customers(CENTER).await;

        assert_eq!(found.len(), 12);
    }

    #[tokio::test]
    async fn test_failing_widest_query_yields_empty() {
        let mut mocks = Mocks::new();
        let mut calls = 0;
        mocks.customers.expect_find_within().times(4).returning(move |_| {
            calls += 1;
            let last = calls == 4;
            Box::pin(async move {
                if last {
                    Err(CoreError::InternalServerError)
                } else {
                    Ok(vec![NearbyCustomer {
                        latitude: CENTER.latitude,
                        longitude: CENTER.longitude,
                        install_date: None,
                    }])
                }
            })
        });
        let service = mocks.into_service(ReportPolicy::default());

        assert!(service.find_nearby_customers(CENTER).await.is_empty());
    }

    #[tokio::test]
    async fn test_intermediate_failure_keeps_widening() {
        let mut mocks = Mocks::new();
        let mut calls = 0;
        mocks.customers.expect_find_within().returning(move |_| {
            calls += 1;
            let first = calls == 1;
            Box::pin(async move {
                if first {
                    Err(CoreError::InternalServerError)
                } else {
                    Ok(customers_east(20))
                }
            })
        });
        let service = mocks.into_service(ReportPolicy::default());

        assert_eq!(service.find_nearby_customers(CENTER).await.len(), 20);
    }
}
