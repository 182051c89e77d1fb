use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::PatientId,
    error::ApiError,
    protocol::{NewPatient, PatientRecord},
};
use tracing::{debug, info};

pub mod controller;
pub mod error;
pub mod filter;
pub mod mutation;
pub mod refresh;
pub mod routes;
pub mod settings;
pub mod view;

pub use controller::{LoadState, PatientListController, RefreshOutcome, RefreshToken};
pub use error::{ClientError, FetchFailure};
pub use mutation::{apply_mutation, PatientMutation};
pub use refresh::{RefreshHandle, RefreshRequests};
pub use routes::{Route, RouteError};
pub use settings::{load_settings, ClientSettings, SettingsError};

const PATIENTS_PATH: &str = "/api/patients";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Backend operations used by the patient list and its mutation dialogs.
#[async_trait]
pub trait PatientsApi: Send + Sync {
    async fn list_patients(&self) -> Result<Vec<PatientRecord>, FetchFailure>;
    async fn create_patient(&self, patient: &NewPatient) -> Result<(), ClientError>;
    async fn delete_patient(&self, patient_id: PatientId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct PatientsClient {
    http: Client,
    server_url: String,
}

impl PatientsClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self::with_http_client(http, settings.server_url.clone()))
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn patients_url(&self) -> String {
        format!("{}{PATIENTS_PATH}", self.server_url)
    }

    fn patient_url(&self, patient_id: PatientId) -> String {
        format!("{}{PATIENTS_PATH}/{}", self.server_url, patient_id.0)
    }
}

#[async_trait]
impl PatientsApi for PatientsClient {
    async fn list_patients(&self) -> Result<Vec<PatientRecord>, FetchFailure> {
        let res = self.http.get(self.patients_url()).send().await?;
        let res = ensure_success(res).await?;
        let body = res.bytes().await?;
        let records = decode_patient_list(&body)?;
        debug!(count = records.len(), "fetched patient list");
        Ok(records)
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<(), ClientError> {
        let res = self
            .http
            .post(self.patients_url())
            .json(patient)
            .send()
            .await?;
        ensure_success(res).await?;
        info!(patient_name = %patient.patient_name, "created patient");
        Ok(())
    }

    async fn delete_patient(&self, patient_id: PatientId) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.patient_url(patient_id))
            .send()
            .await?;
        ensure_success(res).await?;
        info!(patient_id = patient_id.0, "deleted patient");
        Ok(())
    }
}

async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => (Some(api_error.code), api_error.message),
        Err(_) if body.trim().is_empty() => (
            None,
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        ),
        Err(_) => (None, body.chars().take(MAX_ERROR_BODY_CHARS).collect()),
    };

    Err(ClientError::Status {
        status: status.as_u16(),
        code,
        message,
    })
}

/// Decodes a patient list body and rejects records that break the list invariants.
pub fn decode_patient_list(body: &[u8]) -> Result<Vec<PatientRecord>, FetchFailure> {
    let records: Vec<PatientRecord> = serde_json::from_slice(body)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        record
            .check_invariants()
            .map_err(|err| ClientError::Decode(err.message))?;
        if !seen.insert(record.patient_id) {
            return Err(ClientError::Decode(format!(
                "duplicate patient_id {} in patient list",
                record.patient_id
            )));
        }
    }

    Ok(records)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
