use crate::domain::{geocoding::entities::Coordinates, report::entities::Report};

/// Contact and address fields captured by the CRM.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDetails {
    pub client_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: Option<String>,
}

impl LeadDetails {
    pub fn one_line_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }

    /// Names of required fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("client_name", &self.client_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReportInput {
    pub lead: LeadDetails,
    /// Supplied by the caller; geocoding is skipped when present.
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedReport {
    pub report: Report,
    /// Whether the address had to be geocoded.
    pub geocoded: bool,
}
