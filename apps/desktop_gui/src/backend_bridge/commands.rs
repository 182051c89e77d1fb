//! Backend commands queued from UI to backend worker.

use client_core::{RefreshHandle, RefreshToken};
use shared::{domain::PatientId, protocol::NewPatient};

use crate::controller::events::ViewId;

pub enum BackendCommand {
    FetchPatients {
        view: ViewId,
        token: RefreshToken,
    },
    CreatePatient {
        patient: NewPatient,
        on_complete: RefreshHandle,
    },
    DeletePatient {
        patient_id: PatientId,
        patient_name: String,
        on_complete: RefreshHandle,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchPatients { .. } => "fetch_patients",
            Self::CreatePatient { .. } => "create_patient",
            Self::DeletePatient { .. } => "delete_patient",
        }
    }
}
