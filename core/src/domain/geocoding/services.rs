use tracing::{debug, error, warn};

use crate::domain::geocoding::{
    entities::Coordinates,
    ports::{Geocoder, GeocodingProvider},
};

/// Tries providers strictly in order and returns the first match.
#[derive(Debug, Clone)]
pub struct GeocoderChain<P: GeocodingProvider> {
    providers: Vec<P>,
}

impl<P: GeocodingProvider> GeocoderChain<P> {
    pub fn new(providers: Vec<P>) -> Self {
        Self { providers }
    }
}

impl<P: GeocodingProvider> Geocoder for GeocoderChain<P> {
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        for provider in &self.providers {
            match provider.locate(address).await {
                Ok(Some(coordinates)) => {
                    debug!(provider = provider.name(), "address geocoded");
                    return Some(coordinates);
                }
                Ok(None) => {
                    debug!(provider = provider.name(), "no geocoding match");
                }
                Err(e) => {
                    error!(provider = provider.name(), "geocoder failed: {}", e);
                }
            }
        }

        warn!("all geocoders failed for address");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError, geocoding::ports::MockGeocodingProvider,
    };

    fn provider(
        name: &'static str,
        answer: Result<Option<Coordinates>, CoreError>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    ) -> MockGeocodingProvider {
        let mut mock = MockGeocodingProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_locate().returning(move |_| {
            calls.lock().unwrap().push(name);
            let answer = answer.clone();
            Box::pin(async move { answer })
        });
        mock
    }

    #[tokio::test]
    async fn test_primary_match_skips_fallback() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = GeocoderChain::new(vec![
            provider("census", Ok(Some(Coordinates::new(35.9, -84.1))), calls.clone()),
            provider("nominatim", Ok(Some(Coordinates::new(1.0, 1.0))), calls.clone()),
        ]);

        let found = chain.geocode("1 Main St, Farragut, TN 37934").await;

        assert_eq!(found, Some(Coordinates::new(35.9, -84.1)));
        assert_eq!(*calls.lock().unwrap(), vec!["census"]);
    }

    #[tokio::test]
    async fn test_empty_primary_falls_back_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = GeocoderChain::new(vec![
            provider("census", Ok(None), calls.clone()),
            provider("nominatim", Ok(Some(Coordinates::new(36.0, -84.0))), calls.clone()),
        ]);

        let found = chain.geocode("1 Main St").await;

        assert_eq!(found, Some(Coordinates::new(36.0, -84.0)));
        assert_eq!(*calls.lock().unwrap(), vec!["census", "nominatim"]);
    }

    #[tokio::test]
    async fn test_failing_primary_falls_back() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = GeocoderChain::new(vec![
            provider(
                "census",
                Err(CoreError::ExternalServiceError("timeout".to_string())),
                calls.clone(),
            ),
            provider("nominatim", Ok(Some(Coordinates::new(36.0, -84.0))), calls.clone()),
        ]);

        assert_eq!(
            chain.geocode("1 Main St").await,
            Some(Coordinates::new(36.0, -84.0))
        );
    }

    #[tokio::test]
    async fn test_all_providers_failing_yields_none() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = GeocoderChain::new(vec![
            provider("census", Ok(None), calls.clone()),
            provider(
                "nominatim",
                Err(CoreError::ExternalServiceError("status 503".to_string())),
                calls.clone(),
            ),
        ]);

        assert_eq!(chain.geocode("nowhere").await, None);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }
}
