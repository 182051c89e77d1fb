//! Backend-to-UI events and error modeling for the desktop GUI.

use client_core::{ClientError, RefreshToken};
use shared::{domain::PatientId, error::ErrorCode, protocol::PatientRecord};

/// Identifies one mounted view; results for an unmounted view are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

pub enum UiEvent {
    Info(String),
    PatientsFetched {
        view: ViewId,
        token: RefreshToken,
        result: Result<Vec<PatientRecord>, String>,
    },
    PatientCreated {
        patient_name: String,
    },
    PatientDeleted {
        patient_id: PatientId,
        patient_name: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    NotFound,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    AddPatient,
    DeletePatient,
    General,
}

pub fn classify_fetch_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("error sending request")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Patients backend unreachable; showing last known records.".to_string()
    } else if lower.contains("malformed") {
        "Patients backend sent an unreadable response; showing last known records.".to_string()
    } else {
        format!("Could not refresh patients: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    /// Categorizes a failed create or delete from the typed client error.
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::InvalidInput(_) => UiErrorCategory::Validation,
            ClientError::Transport(_) => UiErrorCategory::Transport,
            _ if err.is_not_found() => UiErrorCategory::NotFound,
            ClientError::Status {
                code: Some(ErrorCode::Validation | ErrorCode::Conflict),
                ..
            } => UiErrorCategory::Validation,
            ClientError::Status {
                code: Some(ErrorCode::Internal),
                ..
            } => UiErrorCategory::Server,
            _ => match err.status() {
                Some(400 | 409 | 422) => UiErrorCategory::Validation,
                Some(status) if status >= 500 => UiErrorCategory::Server,
                _ => UiErrorCategory::Unknown,
            },
        };

        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// For worker-side failures that never reached the backend (queue, startup).
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> String {
        let prefix = match self.category {
            UiErrorCategory::Transport => "Backend unreachable",
            UiErrorCategory::Validation => "Check the form",
            UiErrorCategory::NotFound => "Patient no longer exists",
            UiErrorCategory::Server => "Backend error",
            UiErrorCategory::Unknown => "Unexpected error",
        };
        format!("{prefix}: {}", self.message)
    }
}
