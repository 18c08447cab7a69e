use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::contaminant::{
    entities::{ContaminantRecord, Utility},
    ports::WaterDataClient,
    value_objects::{CredentialSummary, PipelineFailure, PipelineStep},
};

/// Client for the SimpleLab utility directory and results API.
#[derive(Debug, Clone)]
pub struct SimpleLabClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

/// `{ result, data }` wrapper shared by both endpoints.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Directory ids arrive as strings or bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseId {
    Text(String),
    Integer(u64),
    Other(Value),
}

impl LooseId {
    fn into_id(self) -> Option<String> {
        match self {
            LooseId::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            LooseId::Integer(n) => Some(n.to_string()),
            LooseId::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UtilityEntry {
    #[serde(default)]
    pwsid: Option<LooseId>,
    #[serde(default)]
    name: Option<Value>,
}

fn to_utility(entry: Value) -> Option<Utility> {
    let entry: UtilityEntry = serde_json::from_value(entry).ok()?;
    Some(Utility {
        pwsid: entry.pwsid?.into_id()?,
        name: entry.name.and_then(|n| n.as_str().map(str::to_string)),
    })
}

impl SimpleLabClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, PipelineFailure> {
        let key = self.api_key.as_deref().ok_or(PipelineFailure::MissingApiKey)?;
        Ok(request
            .bearer_auth(key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json"))
    }

    async fn get_body(
        &self,
        step: PipelineStep,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, PipelineFailure> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorized(self.client.get(&url).query(query))?
            .send()
            .await
            .map_err(|e| {
                error!(%step, "water API request failed: {}", e);
                PipelineFailure::Transport {
                    step,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%step, status = status.as_u16(), "water API returned an error status");
            return Err(PipelineFailure::Status {
                step,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            error!(%step, "failed to read water API body: {}", e);
            PipelineFailure::Transport {
                step,
                message: e.to_string(),
            }
        })
    }
}

fn parse_envelope(step: PipelineStep, body: &str) -> Result<Envelope, PipelineFailure> {
    serde_json::from_str(body).map_err(|e| {
        error!(%step, length = body.len(), "unreadable water API payload: {}", e);
        PipelineFailure::Unreadable {
            step,
            length: body.len(),
        }
    })
}

/// Utilities from a directory payload. Only an `OK` result code is trusted.
///
/// The first entry must carry a usable id; it is never replaced by a later one.
pub(crate) fn parse_utilities(body: &str) -> Result<Vec<Utility>, PipelineFailure> {
    let step = PipelineStep::UtilityLookup;
    let envelope = parse_envelope(step, body)?;

    let code = envelope.result.unwrap_or_default();
    if code != "OK" {
        return Err(PipelineFailure::ResultCode { step, code });
    }

    let mut entries = envelope.data.unwrap_or_default().into_iter();
    let Some(first) = entries.next() else {
        return Ok(Vec::new());
    };
    let first = to_utility(first).ok_or_else(|| {
        error!(%step, "first directory entry has no usable pwsid");
        PipelineFailure::MalformedUtility
    })?;

    Ok(std::iter::once(first)
        .chain(entries.filter_map(to_utility))
        .collect())
}

/// Raw records from a results payload; entries that are not objects are skipped.
pub(crate) fn parse_results(body: &str) -> Result<Vec<ContaminantRecord>, PipelineFailure> {
    let envelope = parse_envelope(PipelineStep::ResultsFetch, body)?;
    let data = envelope.data.ok_or(PipelineFailure::NoResultsData)?;

    let total = data.len();
    let records: Vec<ContaminantRecord> = data
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), "skipped malformed contaminant records");
    }

    Ok(records)
}

impl WaterDataClient for SimpleLabClient {
    fn credentials(&self) -> CredentialSummary {
        CredentialSummary::from_key(self.api_key.as_deref())
    }

    async fn list_utilities(&self, city: &str, state: &str) -> Result<Vec<Utility>, PipelineFailure> {
        let body = self
            .get_body(
                PipelineStep::UtilityLookup,
                "/api/utilities/list",
                &[("city", city), ("state_code", state)],
            )
            .await?;

        parse_utilities(&body)
    }

    async fn fetch_results(&self, pwsid: &str) -> Result<Vec<ContaminantRecord>, PipelineFailure> {
        let body = self
            .get_body(
                PipelineStep::ResultsFetch,
                "/api/utilities/results",
                &[("pws_id", pwsid), ("result_type", "pws")],
            )
            .await?;

        parse_results(&body)
    }
}
