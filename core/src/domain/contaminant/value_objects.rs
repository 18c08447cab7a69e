use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::contaminant::entities::ContaminantView;

#[derive(Debug, Clone, PartialEq)]
pub struct ContaminantPolicy {
    /// Maximum number of contaminants shown on a page.
    pub limit: usize,
    /// Smallest rounded ratio worth reporting.
    pub warning_ratio: i64,
    /// Ratio at or above which a contaminant "exceeds".
    pub exceeds_ratio: i64,
    pub description_limit: usize,
    pub default_unit: String,
}

impl Default for ContaminantPolicy {
    fn default() -> Self {
        Self {
            limit: 8,
            warning_ratio: 2,
            exceeds_ratio: 10,
            description_limit: 120,
            default_unit: "PPB".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    UtilityLookup,
    ResultsFetch,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStep::UtilityLookup => write!(f, "utility lookup"),
            PipelineStep::ResultsFetch => write!(f, "results fetch"),
        }
    }
}

/// Why a report has no contaminant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineFailure {
    MissingApiKey,
    Transport { step: PipelineStep, message: String },
    Status { step: PipelineStep, status: u16 },
    Unreadable { step: PipelineStep, length: usize },
    ResultCode { step: PipelineStep, code: String },
    NoUtility { city: String, state: String },
    MalformedUtility,
    NoResultsData,
    NoneQualified { examined: usize },
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineFailure::MissingApiKey => write!(f, "no water API key configured"),
            PipelineFailure::Transport { step, message } => {
                write!(f, "{step} request failed: {message}")
            }
            PipelineFailure::Status { step, status } => {
                write!(f, "{step} returned status {status}")
            }
            PipelineFailure::Unreadable { step, length } => {
                write!(f, "{step} payload unreadable (len={length})")
            }
            PipelineFailure::ResultCode { step, code } => {
                write!(f, "{step} returned result code {code}")
            }
            PipelineFailure::NoUtility { city, state } => {
                write!(f, "no utilities for {city}, {state}")
            }
            PipelineFailure::MalformedUtility => {
                write!(f, "first utility has no usable pwsid")
            }
            PipelineFailure::NoResultsData => write!(f, "results payload has no data"),
            PipelineFailure::NoneQualified { examined } => {
                write!(f, "0 passed filter of {examined}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContaminantOutcome {
    Listed(Vec<ContaminantView>),
    Unavailable(PipelineFailure),
}

impl ContaminantOutcome {
    /// Views to render. With diagnostics on, a failure becomes one placeholder entry.
    pub fn into_views(self, diagnostics: bool) -> Vec<ContaminantView> {
        match self {
            ContaminantOutcome::Listed(views) => views,
            ContaminantOutcome::Unavailable(failure) if diagnostics => {
                vec![ContaminantView::placeholder(format!("DEBUG: {failure}"))]
            }
            ContaminantOutcome::Unavailable(_) => Vec::new(),
        }
    }
}

/// Whether the water API key is set, without revealing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CredentialSummary {
    pub has_api_key: bool,
    pub key_length: usize,
    pub key_preview: String,
}

impl CredentialSummary {
    pub fn from_key(key: Option<&str>) -> Self {
        match key.filter(|k| !k.is_empty()) {
            Some(key) => Self {
                has_api_key: true,
                key_length: key.chars().count(),
                key_preview: format!("{}...", key.chars().take(5).collect::<String>()),
            },
            None => Self {
                has_api_key: false,
                key_length: 0,
                key_preview: "MISSING".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ContaminantSample {
    pub name: Option<String>,
    pub median: Option<f64>,
    pub unit: Option<String>,
    pub fed_mcl: Option<f64>,
    pub slr: Option<f64>,
}

/// Step-by-step account of a live call against the water data API.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WaterApiDiagnosis {
    #[serde(flatten)]
    pub credentials: CredentialSummary,
    pub utility_count: Option<usize>,
    pub pwsid: Option<String>,
    pub contaminant_count: Option<usize>,
    pub sample_contaminants: Vec<ContaminantSample>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_hidden_without_diagnostics() {
        let outcome = ContaminantOutcome::Unavailable(PipelineFailure::NoResultsData);
        assert!(outcome.into_views(false).is_empty());
    }

    #[test]
    fn test_failure_rendered_as_placeholder_with_diagnostics() {
        let outcome = ContaminantOutcome::Unavailable(PipelineFailure::Status {
            step: PipelineStep::UtilityLookup,
            status: 503,
        });
        let views = outcome.into_views(true);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "DEBUG: utility lookup returned status 503");
        assert_eq!(views[0].times_above_guideline, 0);
    }

    #[test]
    fn test_credential_summary_masks_key() {
        let summary = CredentialSummary::from_key(Some("sk_live_abcdef"));
        assert!(summary.has_api_key);
        assert_eq!(summary.key_length, 14);
        assert_eq!(summary.key_preview, "sk_li...");

        let missing = CredentialSummary::from_key(Some(""));
        assert!(!missing.has_api_key);
        assert_eq!(missing.key_preview, "MISSING");
    }
}
