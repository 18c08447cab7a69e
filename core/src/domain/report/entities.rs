use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::generate_report_id, geocoding::entities::Coordinates,
    report::value_objects::LeadDetails,
};

/// A lead's personalized report. The id is fixed at creation; `viewed` only ever goes false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: String,
    pub client_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub viewed: bool,
}

impl Report {
    pub fn new(lead: LeadDetails, coordinates: Option<Coordinates>) -> Self {
        Self {
            id: generate_report_id(),
            client_name: lead.client_name,
            address: lead.address,
            city: lead.city,
            state: lead.state,
            zip: lead.zip,
            phone: lead.phone,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            created_at: Utc::now(),
            viewed: false,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn first_name(&self) -> &str {
        self.client_name.split_whitespace().next().unwrap_or("")
    }

    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }
}
