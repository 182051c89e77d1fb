use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{BedId, PatientId},
    error::ApiException,
};

/// One patient as served by `GET /api/patients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
    /// ISO-8601 date or timestamp, kept verbatim.
    pub admission_date: String,
    #[serde(default)]
    pub bed_id: Option<BedId>,
}

impl PatientRecord {
    pub fn admission_date(&self) -> Option<NaiveDate> {
        parse_admission_date(&self.admission_date)
    }

    pub fn check_invariants(&self) -> Result<(), ApiException> {
        if !self.patient_id.is_valid() {
            return Err(ApiException::validation(format!(
                "patient_id must be positive, got {}",
                self.patient_id
            )));
        }
        if self.patient_name.trim().is_empty() {
            return Err(ApiException::validation(format!(
                "patient {} has an empty patient_name",
                self.patient_id
            )));
        }
        Ok(())
    }
}

/// Request body for `POST /api/patients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
    pub admission_date: String,
    pub bed_id: Option<BedId>,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), ApiException> {
        if self.patient_name.trim().is_empty() {
            return Err(ApiException::validation("patient name must not be empty"));
        }
        if NaiveDate::parse_from_str(self.admission_date.trim(), "%Y-%m-%d").is_err() {
            return Err(ApiException::validation(format!(
                "admission date '{}' is not a YYYY-MM-DD date",
                self.admission_date
            )));
        }
        if let Some(bed_id) = self.bed_id {
            if !bed_id.is_valid() {
                return Err(ApiException::validation(format!(
                    "bed id must be positive, got {bed_id}"
                )));
            }
        }
        Ok(())
    }

    /// Trims free-text fields the way the backend stores them.
    pub fn normalized(mut self) -> Self {
        self.patient_name = self.patient_name.trim().to_string();
        self.gender = self.gender.trim().to_string();
        self.diagnosis = self.diagnosis.trim().to_string();
        self.admission_date = self.admission_date.trim().to_string();
        self
    }
}

/// Accepts a bare calendar date, an RFC 3339 timestamp, or a naive timestamp.
pub fn parse_admission_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}
