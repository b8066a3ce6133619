use std::path::Path;

use serde::Deserialize;

use super::{UploadError, UploadResult};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service-account JSON key that the uploader needs.
/// Passed explicitly to the client; nothing is read from the environment.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountCredentials {
    pub fn from_json_str(raw: &str) -> UploadResult<Self> {
        let creds: Self =
            serde_json::from_str(raw).map_err(|e| UploadError::Credentials(e.to_string()))?;
        if let Some(kind) = &creds.key_type {
            if kind != "service_account" {
                return Err(UploadError::Credentials(format!(
                    "expected a service_account key, got {}",
                    kind
                )));
            }
        }
        if creds.client_email.is_empty() || creds.private_key.is_empty() {
            return Err(UploadError::Credentials(
                "client_email and private_key must be set".to_string(),
            ));
        }
        Ok(creds)
    }

    pub fn from_file(path: &Path) -> UploadResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            UploadError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }
}
