use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use url::Url;
use utoipa::ToSchema;
use validator::Validate;
use waterreport_core::domain::{
    geocoding::entities::Coordinates,
    report::value_objects::{CreateReportInput, LeadDetails},
};

use crate::application::http::server::api_entities::api_error::ApiError;

/// CRM text field: strings pass through, numbers are rendered, anything else counts as missing.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl LooseText {
    fn into_text(self) -> Option<String> {
        match self {
            LooseText::Text(text) => Some(text),
            LooseText::Integer(n) => Some(n.to_string()),
            LooseText::Float(n) => Some(n.to_string()),
            LooseText::Other(_) => None,
        }
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseText>::deserialize(deserializer)?.and_then(LooseText::into_text))
}

/// Lead payload sent by the CRM. Required fields are optional here so every
/// missing one can be reported at once.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportValidator {
    #[serde(default, deserialize_with = "loose_text")]
    pub client_name: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub state: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub zip: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "lng must be between -180 and 180"))]
    pub lng: Option<f64>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl CreateReportValidator {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("client_name", &self.client_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| !present(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Caller coordinates, only when both are given and non-zero.
    fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.lat.filter(|v| *v != 0.0)?;
        let lng = self.lng.filter(|v| *v != 0.0)?;
        Some(Coordinates::new(lat, lng))
    }

    pub fn into_input(self) -> Result<CreateReportInput, ApiError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let coordinates = self.coordinates();
        Ok(CreateReportInput {
            lead: LeadDetails {
                client_name: self.client_name.unwrap_or_default().trim().to_string(),
                address: self.address.unwrap_or_default().trim().to_string(),
                city: self.city.unwrap_or_default().trim().to_string(),
                state: self.state.unwrap_or_default().trim().to_string(),
                zip: self.zip.unwrap_or_default().trim().to_string(),
                phone: self.phone.filter(|p| !p.trim().is_empty()),
            },
            coordinates,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GetReportQuery {
    pub id: Option<String>,
}

/// `{base}/report`, where base falls back to `https://{host}`.
pub fn report_base(public_base_url: Option<&str>, host: Option<&str>) -> Result<Url, ApiError> {
    let base = match (public_base_url.filter(|b| !b.is_empty()), host) {
        (Some(base), _) => base.trim_end_matches('/').to_string(),
        (None, Some(host)) => format!("https://{}", host),
        (None, None) => {
            return Err(ApiError::BadRequest("Missing Host header".to_string()));
        }
    };

    Url::parse(&format!("{}/report", base))
        .map_err(|e| ApiError::InternalServerError(format!("invalid report base url: {}", e)))
}

pub fn report_url(base: &Url, report_id: &str) -> String {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("id", report_id);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::application::http::server::api_entities::api_error::ValidateJson;

    fn complete() -> CreateReportValidator {
        CreateReportValidator {
            client_name: Some("Dana Whitfield".to_string()),
            address: Some("12 Kingston Pike".to_string()),
            city: Some("Farragut".to_string()),
            state: Some("TN".to_string()),
            zip: Some("37934".to_string()),
            ..CreateReportValidator::default()
        }
    }

    #[test]
    fn test_missing_zip_named() {
        let payload = CreateReportValidator {
            zip: None,
            ..complete()
        };
        assert_eq!(
            payload.into_input(),
            Err(ApiError::BadRequest(
                "Missing required fields: zip".to_string()
            ))
        );
    }

    #[test]
    fn test_every_missing_field_listed() {
        let payload = CreateReportValidator {
            city: Some("  ".to_string()),
            ..CreateReportValidator::default()
        };
        assert_eq!(
            payload.missing_fields(),
            vec!["client_name", "address", "city", "state", "zip"]
        );
    }

    #[test]
    fn test_coordinates_need_both_values() {
        let only_lat = CreateReportValidator {
            lat: Some(35.9),
            ..complete()
        };
        assert_eq!(only_lat.into_input().unwrap().coordinates, None);

        let both = CreateReportValidator {
            lat: Some(35.9),
            lng: Some(-84.1),
            ..complete()
        };
        assert_eq!(
            both.into_input().unwrap().coordinates,
            Some(Coordinates::new(35.9, -84.1))
        );
    }

    #[test]
    fn test_report_url_prefers_public_base() {
        let base = report_base(Some("https://reports.example.com/"), Some("internal:3333")).unwrap();
        assert_eq!(
            report_url(&base, "a1b2c3d4e5f6"),
            "https://reports.example.com/report?id=a1b2c3d4e5f6"
        );

        let base = report_base(None, Some("water.example.com")).unwrap();
        assert_eq!(
            report_url(&base, "a1b2c3d4e5f6"),
            "https://water.example.com/report?id=a1b2c3d4e5f6"
        );

        assert_eq!(
            report_base(None, None),
            Err(ApiError::BadRequest("Missing Host header".to_string()))
        );
    }

    #[test]
    fn test_numeric_fields_read_as_text() {
        let payload: CreateReportValidator = serde_json::from_value(json!({
            "client_name": "Dana Whitfield",
            "address": 12,
            "city": "Farragut",
            "state": "TN",
            "zip": 37934,
            "phone": false
        }))
        .unwrap();

        assert_eq!(payload.zip.as_deref(), Some("37934"));
        assert_eq!(payload.address.as_deref(), Some("12"));
        assert_eq!(payload.phone, None);
    }

    #[tokio::test]
    async fn test_missing_zip_is_bad_request() {
        let app = Router::new().route(
            "/api/create-report",
            post(|ValidateJson(payload): ValidateJson<CreateReportValidator>| async move {
                payload.into_input().map(|input| input.lead.zip)
            }),
        );
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/create-report")
            .json(&json!({
                "client_name": "Dana Whitfield",
                "address": "12 Kingston Pike",
                "city": "Farragut",
                "state": "TN"
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], 400);
        assert!(body["message"].as_str().unwrap().contains("zip"));
    }

    #[tokio::test]
    async fn test_numeric_zip_accepted() {
        let app = Router::new().route(
            "/api/create-report",
            post(|ValidateJson(payload): ValidateJson<CreateReportValidator>| async move {
                payload.into_input().map(|input| input.lead.zip)
            }),
        );
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/create-report")
            .json(&json!({
                "client_name": "Dana Whitfield",
                "address": "12 Kingston Pike",
                "city": "Farragut",
                "state": "TN",
                "zip": 37934
            }))
            .await;

        response.assert_status_ok();
        response.assert_text("37934");
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_rejected() {
        let app = Router::new().route(
            "/api/create-report",
            post(|ValidateJson(payload): ValidateJson<CreateReportValidator>| async move {
                payload.into_input().map(|input| input.lead.zip)
            }),
        );
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/create-report")
            .json(&json!({ "lat": 123.0, "lng": 10.0 }))
            .await
            .assert_status_bad_request();
    }
}
