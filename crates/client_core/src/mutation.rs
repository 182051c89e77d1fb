//! Create and delete requests issued by the add/delete dialogs.

use shared::{domain::PatientId, protocol::NewPatient};
use tracing::{info, warn};

use crate::{error::ClientError, refresh::RefreshHandle, PatientsApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientMutation {
    Create(NewPatient),
    Delete { patient_id: PatientId },
}

impl PatientMutation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create(_) => "create_patient",
            Self::Delete { .. } => "delete_patient",
        }
    }
}

/// Runs `mutation` and, only if it succeeds, requests exactly one list refresh.
pub async fn apply_mutation<A: PatientsApi + ?Sized>(
    api: &A,
    mutation: &PatientMutation,
    on_complete: &RefreshHandle,
) -> Result<(), ClientError> {
    match mutation {
        PatientMutation::Create(patient) => {
            let patient = patient.clone().normalized();
            patient.validate()?;
            api.create_patient(&patient).await?;
        }
        PatientMutation::Delete { patient_id } => {
            api.delete_patient(*patient_id).await?;
        }
    }

    info!(mutation = mutation.label(), "patient mutation completed");
    if !on_complete.request() {
        warn!(
            mutation = mutation.label(),
            "patient list closed before refresh could be requested"
        );
    }
    Ok(())
}
