use std::future::Future;

use crate::domain::contaminant::{
    entities::{ContaminantRecord, Utility},
    value_objects::{ContaminantOutcome, CredentialSummary, PipelineFailure, WaterApiDiagnosis},
};

/// Client for the utility directory and utility results endpoints.
///
/// Implementations validate payloads at the boundary and report every
/// unavailability as a [`PipelineFailure`] naming the step.
#[cfg_attr(test, mockall::automock)]
pub trait WaterDataClient: Send + Sync {
    fn credentials(&self) -> CredentialSummary;

    /// Utilities serving a city, in provider order. An empty list is not a failure.
    fn list_utilities(
        &self,
        city: &str,
        state: &str,
    ) -> impl Future<Output = Result<Vec<Utility>, PipelineFailure>> + Send;

    fn fetch_results(
        &self,
        pwsid: &str,
    ) -> impl Future<Output = Result<Vec<ContaminantRecord>, PipelineFailure>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ContaminantService: Send + Sync {
    /// Ranked contaminants above guideline for the utility serving a city.
    fn contaminants_for(
        &self,
        city: &str,
        state: &str,
    ) -> impl Future<Output = ContaminantOutcome> + Send;

    fn diagnose_water_api(
        &self,
        city: &str,
        state: &str,
    ) -> impl Future<Output = WaterApiDiagnosis> + Send;
}
