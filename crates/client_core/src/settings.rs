//! Client settings: defaults, optional `patient_records.toml`, then `APP__*` environment.

use std::{path::Path, time::Duration};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "patient_records";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load client settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies a command-line server url on top of the loaded settings.
    pub fn with_server_url(mut self, server_url: Option<String>) -> Result<Self, SettingsError> {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        self.validated()
    }

    pub fn validated(mut self) -> Result<Self, SettingsError> {
        let trimmed = self.server_url.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&trimmed).map_err(|err| SettingsError::InvalidServerUrl {
            url: self.server_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidServerUrl {
                url: self.server_url,
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        self.server_url = trimmed;
        Ok(self)
    }
}

/// Loads settings from `file` (required when given) or the optional default file,
/// with `APP__SERVER_URL` / `APP__REQUEST_TIMEOUT_SECS` taking precedence.
pub fn load_settings(file: Option<&Path>) -> Result<ClientSettings, SettingsError> {
    let defaults = ClientSettings::default();
    let builder = Config::builder()
        .set_default("server_url", defaults.server_url)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?;

    let builder = match file {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name(DEFAULT_SETTINGS_FILE).required(false)),
    };

    let settings: ClientSettings = builder
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    settings.validated()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
