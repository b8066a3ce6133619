//! Object-storage upload: explicit service-account credentials, a blocking
//! Google Cloud Storage client, and the `upload_image` flow that turns an image
//! into a publicly readable object URL.
use std::path::Path;

use thiserror::Error;

pub mod credentials;
pub mod gcs;
pub mod upload;

pub use credentials::ServiceAccountCredentials;
pub use gcs::{GcsConfig, GcsConnector, GcsStore};
pub use upload::{UploadOutcome, upload_image};

pub type UploadResult<T> = std::result::Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::Http(e.to_string())
    }
}

/// A bucket that can receive objects and expose them publicly.
pub trait ObjectStore {
    /// Store `data` under `name`, replacing any existing object.
    fn upload(&self, name: &str, data: &[u8], content_type: &str) -> UploadResult<()>;

    /// Grant anonymous read access to `name`.
    fn make_public(&self, name: &str) -> UploadResult<()>;

    /// Public URL of `name`. Only meaningful after `make_public`.
    fn public_url(&self, name: &str) -> String;
}

/// Builds an `ObjectStore` for one bucket from a credentials file.
pub trait StoreConnector {
    fn connect(&self, credentials_path: &Path, bucket: &str) -> UploadResult<Box<dyn ObjectStore>>;
}

/// Validate an object key. Keys must be non-empty, relative and free of `..`.
pub fn validate_key(name: &str) -> UploadResult<&str> {
    if name.is_empty() {
        return Err(UploadError::InvalidKey("Empty key".to_string()));
    }
    if name.starts_with('/') {
        return Err(UploadError::InvalidKey(format!(
            "Key must not start with '/': {}",
            name
        )));
    }
    if name.contains("..") {
        return Err(UploadError::InvalidKey(format!(
            "Key contains invalid sequences: {}",
            name
        )));
    }
    Ok(name)
}
