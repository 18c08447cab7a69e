use reqwest::Client;
use serde::Deserialize;

use crate::domain::{common::entities::app_errors::CoreError, geocoding::entities::Coordinates};

#[derive(Debug, Clone)]
pub struct CensusGeocoder {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct CensusResponse {
    result: CensusResult,
}

#[derive(Debug, Deserialize)]
struct CensusResult {
    #[serde(rename = "addressMatches", default)]
    address_matches: Vec<AddressMatch>,
}

#[derive(Debug, Deserialize)]
struct AddressMatch {
    coordinates: Option<MatchCoordinates>,
}

/// `x` is longitude, `y` latitude.
#[derive(Debug, Deserialize)]
struct MatchCoordinates {
    x: f64,
    y: f64,
}

impl CensusGeocoder {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }

    pub async fn locate(&self, address: &str) -> Result<Option<Coordinates>, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("address", address),
                ("benchmark", "Public_AR_Current"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("census request: {}", e)))?;

        let body: CensusResponse = response
            .json()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("census payload: {}", e)))?;

        Ok(first_match(body))
    }
}

fn first_match(body: CensusResponse) -> Option<Coordinates> {
    body.result
        .address_matches
        .into_iter()
        .next()
        .and_then(|m| m.coordinates)
        .map(|c| Coordinates::new(c.y, c.x))
}
