use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to patients backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("patients backend returned status {status}: {message}")]
    Status {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },
    #[error("malformed patients response: {0}")]
    Decode(String),
    #[error("invalid patient input: {0}")]
    InvalidInput(#[from] ApiException),
}

/// Any failure on the `GET /api/patients` read path.
pub type FetchFailure = ClientError;

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
            || matches!(
                self,
                Self::Status {
                    code: Some(ErrorCode::NotFound),
                    ..
                }
            )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
