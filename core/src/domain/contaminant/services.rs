use tracing::{debug, error, warn};

use crate::domain::{
    common::services::Service,
    contaminant::{
        entities::{Classification, ContaminantRecord, ContaminantView},
        ports::{ContaminantService, WaterDataClient},
        value_objects::{
            ContaminantOutcome, ContaminantPolicy, ContaminantSample, PipelineFailure,
            WaterApiDiagnosis,
        },
    },
    geocoding::ports::Geocoder,
    neighborhood::ports::CustomerRepository,
    report::ports::ReportRepository,
    review::ports::ReviewRepository,
};

/// Turns one raw record into a display entry, or drops it.
///
/// A record survives only when it was detected, has a usable guideline and
/// sits at least `warning_ratio` times above that guideline.
pub fn evaluate_record(
    record: &ContaminantRecord,
    policy: &ContaminantPolicy,
) -> Option<ContaminantView> {
    let detected = record.max.usable().or_else(|| record.median.usable())?;

    if record.detection_rate.rules_out() {
        return None;
    }

    let guideline = record.slr.usable().or_else(|| record.fed_mcl.usable())?;

    let times_above = (detected / guideline).round() as i64;
    if times_above < policy.warning_ratio {
        return None;
    }

    let classification = if times_above >= policy.exceeds_ratio {
        Classification::Exceeds
    } else {
        Classification::Warning
    };

    Some(ContaminantView {
        name: record.name.clone().unwrap_or_default(),
        description: describe(record, policy.description_limit),
        detected_level: detected,
        unit: record
            .unit
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| policy.default_unit.clone()),
        guideline,
        federal_limit: record.fed_mcl.usable().unwrap_or(0.0),
        times_above_guideline: times_above,
        classification,
        health_effects: record.health_effects.clone().unwrap_or_default(),
        sources: record.sources.clone().unwrap_or_default(),
        body_effects: record.body_effects.clone(),
    })
}

/// Filters, orders and bounds a utility's raw results for display.
pub fn rank_contaminants(
    records: &[ContaminantRecord],
    policy: &ContaminantPolicy,
) -> Vec<ContaminantView> {
    let mut views: Vec<ContaminantView> = records
        .iter()
        .filter_map(|record| evaluate_record(record, policy))
        .collect();

    views.sort_by(|a, b| {
        a.classification
            .cmp(&b.classification)
            .then_with(|| b.times_above_guideline.cmp(&a.times_above_guideline))
    });
    views.truncate(policy.limit);
    views
}

fn describe(record: &ContaminantRecord, limit: usize) -> String {
    let text = [&record.health_effects, &record.sources]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty());

    match text {
        Some(text) => summarize(first_sentence(text), limit),
        None => format!(
            "{} detected in your water",
            record
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or("Contaminant")
        ),
    }
}

fn first_sentence(text: &str) -> &str {
    text.split(". ").next().unwrap_or(text)
}

/// Cuts text to `limit` characters, ending in "..." when shortened.
pub fn summarize(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(3);
    let mut short: String = text.chars().take(keep).collect();
    short.push_str("...");
    short
}

impl<RP, CU, RV, WD, GC> ContaminantService for Service<RP, CU, RV, WD, GC>
where
    RP: ReportRepository,
    CU: CustomerRepository,
    RV: ReviewRepository,
    WD: WaterDataClient,
    GC: Geocoder,
{
    async fn contaminants_for(&self, city: &str, state: &str) -> ContaminantOutcome {
        if !self.water_data_client.credentials().has_api_key {
            warn!("no water API key set, skipping contaminant lookup");
            return ContaminantOutcome::Unavailable(PipelineFailure::MissingApiKey);
        }

        let utilities = match self.water_data_client.list_utilities(city, state).await {
            Ok(utilities) => utilities,
            Err(failure) => {
                error!(step = "utility_lookup", %city, %state, "{}", failure);
                return ContaminantOutcome::Unavailable(failure);
            }
        };

        // Provider order decides when a city maps to several utilities.
        let Some(utility) = utilities.into_iter().next() else {
            warn!(%city, %state, "no utilities found");
            return ContaminantOutcome::Unavailable(PipelineFailure::NoUtility {
                city: city.to_string(),
                state: state.to_string(),
            });
        };

        let records = match self.water_data_client.fetch_results(&utility.pwsid).await {
            Ok(records) => records,
            Err(failure) => {
                error!(step = "results_fetch", pwsid = %utility.pwsid, "{}", failure);
                return ContaminantOutcome::Unavailable(failure);
            }
        };

        let views = rank_contaminants(&records, &self.policy.contaminants);
        debug!(
            pwsid = %utility.pwsid,
            examined = records.len(),
            kept = views.len(),
            "contaminants ranked"
        );

        if views.is_empty() {
            warn!(pwsid = %utility.pwsid, "no contaminant above guideline");
            return ContaminantOutcome::Unavailable(PipelineFailure::NoneQualified {
                examined: records.len(),
            });
        }

        ContaminantOutcome::Listed(views)
    }

    async fn diagnose_water_api(&self, city: &str, state: &str) -> WaterApiDiagnosis {
        let mut diagnosis = WaterApiDiagnosis {
            credentials: self.water_data_client.credentials(),
            utility_count: None,
            pwsid: None,
            contaminant_count: None,
            sample_contaminants: Vec::new(),
            error: None,
        };

        let utilities = match self.water_data_client.list_utilities(city, state).await {
            Ok(utilities) => utilities,
            Err(failure) => {
                diagnosis.error = Some(failure.to_string());
                return diagnosis;
            }
        };
        diagnosis.utility_count = Some(utilities.len());

        let Some(utility) = utilities.into_iter().next() else {
            return diagnosis;
        };
        diagnosis.pwsid = Some(utility.pwsid.clone());

        match self.water_data_client.fetch_results(&utility.pwsid).await {
            Ok(records) => {
                diagnosis.contaminant_count = Some(records.len());
                diagnosis.sample_contaminants = records
                    .iter()
                    .take(3)
                    .map(|record| ContaminantSample {
                        name: record.name.clone(),
                        median: record.median.raw(),
                        unit: record.unit.clone(),
                        fed_mcl: record.fed_mcl.raw(),
                        slr: record.slr.raw(),
                    })
                    .collect();
            }
            Err(failure) => diagnosis.error = Some(failure.to_string()),
        }

        diagnosis
    }
}
