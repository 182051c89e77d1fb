use std::{fmt, str::FromStr};

use shared::domain::PatientId;
use thiserror::Error;
use url::Url;

const ROUTE_BASE: &str = "http://localhost/";
const PATIENT_ID_PARAM: &str = "patientId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    PatientRecords,
    Dashboard {
        patient_id: PatientId,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route '{0}'")]
    Malformed(String),
    #[error("unknown route '{0}'")]
    UnknownPath(String),
    #[error("dashboard route requires a patientId parameter")]
    MissingPatientId,
    #[error("invalid patientId '{0}'")]
    InvalidPatientId(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::PatientRecords => "/patients".to_string(),
            Self::Dashboard { patient_id } => {
                format!("/dashboard?{PATIENT_ID_PARAM}={}", patient_id.0)
            }
        }
    }

    pub fn dashboard(patient_id: PatientId) -> Self {
        Self::Dashboard { patient_id }
    }

    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let base = Url::parse(ROUTE_BASE).map_err(|_| RouteError::Malformed(raw.to_string()))?;
        let url = base
            .join(raw.trim())
            .map_err(|_| RouteError::Malformed(raw.to_string()))?;

        match url.path().trim_end_matches('/') {
            "" => Ok(Self::Landing),
            "/patients" => Ok(Self::PatientRecords),
            "/dashboard" => {
                let value = url
                    .query_pairs()
                    .find(|(key, _)| key == PATIENT_ID_PARAM)
                    .map(|(_, value)| value.into_owned())
                    .ok_or(RouteError::MissingPatientId)?;
                let patient_id = value
                    .parse::<i64>()
                    .ok()
                    .map(PatientId)
                    .filter(|patient_id| patient_id.is_valid())
                    .ok_or(RouteError::InvalidPatientId(value))?;
                Ok(Self::Dashboard { patient_id })
            }
            other => Err(RouteError::UnknownPath(other.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
