use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;

use crate::domain::{common::entities::app_errors::CoreError, geocoding::entities::Coordinates};

/// OpenStreetMap search; requires an identifying user agent.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, url: String, user_agent: String) -> Self {
        Self {
            client,
            url,
            user_agent,
        }
    }

    pub async fn locate(&self, address: &str) -> Result<Option<Coordinates>, CoreError> {
        let places: Vec<Place> = self
            .client
            .get(&self.url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("nominatim request: {}", e)))?
            .json()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("nominatim payload: {}", e)))?;

        Ok(first_place(places))
    }
}

fn first_place(places: Vec<Place>) -> Option<Coordinates> {
    let place = places.into_iter().next()?;
    let latitude = place.lat.trim().parse::<f64>().ok()?;
    let longitude = place.lon.trim().parse::<f64>().ok()?;
    Some(Coordinates::new(latitude, longitude))
}
