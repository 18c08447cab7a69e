use std::time::Duration;

use reqwest::Client;

use crate::domain::{
    common::{GeocodingConfig, entities::app_errors::CoreError},
    geocoding::{entities::Coordinates, ports::GeocodingProvider, services::GeocoderChain},
};

pub mod census;
pub mod nominatim;

pub use census::CensusGeocoder;
pub use nominatim::NominatimGeocoder;

/// The HTTP geocoding backends, dispatched statically.
#[derive(Debug, Clone)]
pub enum HttpGeocoder {
    Census(CensusGeocoder),
    Nominatim(NominatimGeocoder),
}

impl GeocodingProvider for HttpGeocoder {
    fn name(&self) -> &'static str {
        match self {
            HttpGeocoder::Census(_) => "census",
            HttpGeocoder::Nominatim(_) => "nominatim",
        }
    }

    async fn locate(&self, address: &str) -> Result<Option<Coordinates>, CoreError> {
        match self {
            HttpGeocoder::Census(geocoder) => geocoder.locate(address).await,
            HttpGeocoder::Nominatim(geocoder) => geocoder.locate(address).await,
        }
    }
}

/// Census first, then Nominatim, each bounded by the configured timeout.
pub fn build_geocoder(config: &GeocodingConfig) -> Result<GeocoderChain<HttpGeocoder>, anyhow::Error> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    Ok(GeocoderChain::new(vec![
        HttpGeocoder::Census(CensusGeocoder::new(client.clone(), config.census_url.clone())),
        HttpGeocoder::Nominatim(NominatimGeocoder::new(
            client,
            config.nominatim_url.clone(),
            config.user_agent.clone(),
        )),
    ]))
}
