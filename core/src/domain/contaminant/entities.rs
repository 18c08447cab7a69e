use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A numeric field from the results API that may be missing, null, zero or a string.
///
/// Only a finite value strictly above zero is ever usable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement(Option<f64>);

impl Measurement {
    pub fn new(value: Option<f64>) -> Self {
        Self(value)
    }

    pub fn usable(self) -> Option<f64> {
        self.0.filter(|v| v.is_finite() && *v > 0.0)
    }

    pub fn raw(self) -> Option<f64> {
        self.0
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self(Some(value))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    fn into_number(self, strip_percent: bool) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(n),
            LooseNumber::Text(text) => {
                let text = text.trim();
                let text = if strip_percent {
                    text.trim_end_matches('%').trim_end()
                } else {
                    text
                };
                text.parse::<f64>().ok().filter(|v| !v.is_nan())
            }
            LooseNumber::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(LooseNumber::deserialize(deserializer)?.into_number(false)))
    }
}

/// Percentage of samples in which the analyte was found.
///
/// Arrives as a number or as text like `"85%"`; anything unreadable counts as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetectionRate(Option<f64>);

impl DetectionRate {
    pub fn new(percent: Option<f64>) -> Self {
        Self(percent)
    }

    pub fn percent(self) -> Option<f64> {
        self.0
    }

    /// Absent rates place no constraint on a record.
    pub fn rules_out(self) -> bool {
        matches!(self.0, Some(p) if p <= 0.0)
    }
}

impl<'de> Deserialize<'de> for DetectionRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(LooseNumber::deserialize(deserializer)?.into_number(true)))
    }
}

fn body_effects<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_body_effects(&value))
}

pub fn normalize_body_effects(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        serde_json::Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// One analyte's aggregated statistics for a utility, as published by the results API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContaminantRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub unit: Option<String>,
    pub median: Measurement,
    pub max: Measurement,
    #[serde(alias = "pct_detected")]
    pub detection_rate: DetectionRate,
    /// State-level health guideline.
    pub slr: Measurement,
    /// Federal legal limit.
    pub fed_mcl: Measurement,
    pub health_effects: Option<String>,
    pub sources: Option<String>,
    #[serde(deserialize_with = "body_effects")]
    pub body_effects: Vec<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Exceeds,
    Warning,
    Ok,
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Classification::Exceeds => "exceeds",
            Classification::Warning => "warning",
            Classification::Ok => "ok",
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Classification::Exceeds | Classification::Warning)
    }
}

/// A contaminant selected for display on a report page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContaminantView {
    pub name: String,
    pub description: String,
    pub detected_level: f64,
    pub unit: String,
    #[serde(rename = "ewg_guideline")]
    pub guideline: f64,
    #[serde(rename = "epa_limit")]
    pub federal_limit: f64,
    pub times_above_guideline: i64,
    #[serde(rename = "status")]
    pub classification: Classification,
    pub health_effects: String,
    pub sources: String,
    pub body_effects: Vec<String>,
}

impl ContaminantView {
    /// Stand-in entry that surfaces a pipeline failure to operators.
    pub fn placeholder(reason: impl Into<String>) -> Self {
        Self {
            name: reason.into(),
            description: "debug".to_string(),
            detected_level: 0.0,
            unit: String::new(),
            guideline: 0.0,
            federal_limit: 0.0,
            times_above_guideline: 0,
            classification: Classification::Warning,
            health_effects: String::new(),
            sources: String::new(),
            body_effects: Vec::new(),
        }
    }
}

/// A public water system returned by the utility directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utility {
    pub pwsid: String,
    pub name: Option<String>,
}
