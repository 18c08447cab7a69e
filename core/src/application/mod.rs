use crate::{
    domain::{
        common::{WaterReportConfig, services::Service},
        geocoding::services::GeocoderChain,
    },
    infrastructure::{
        customer::PostgresCustomerRepository,
        db::postgres::{Postgres, PostgresConfig},
        geocoding::{HttpGeocoder, build_geocoder},
        report::PostgresReportRepository,
        review::PostgresReviewRepository,
        water_data::SimpleLabClient,
    },
};

pub type WaterReportService = Service<
    PostgresReportRepository,
    PostgresCustomerRepository,
    PostgresReviewRepository,
    SimpleLabClient,
    GeocoderChain<HttpGeocoder>,
>;

pub async fn create_service(config: WaterReportConfig) -> Result<WaterReportService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url()?,
    })
    .await?;

    let geocoder = build_geocoder(&config.geocoding)?;
    let water_data_client =
        SimpleLabClient::new(config.water_api.api_key, config.water_api.base_url);

    Ok(Service::new(
        PostgresReportRepository::new(postgres.get_db()),
        PostgresCustomerRepository::new(postgres.get_db()),
        PostgresReviewRepository::new(postgres.get_db()),
        water_data_client,
        geocoder,
        config.policy,
    ))
}
