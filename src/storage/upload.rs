use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{StoreConnector, UploadError, UploadResult};
use crate::core::image::Image;
use crate::io::writers::png::encode_png;

/// Prefix of the string returned in place of a URL when an upload fails.
pub const LEGACY_ERROR_PREFIX: &str = "Error uploading to GCS: ";

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded { url: String, object_name: String },
    Failed { reason: String },
}

impl UploadOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded { url, .. } => Some(url),
            UploadOutcome::Failed { .. } => None,
        }
    }

    /// Single-string form expected by node hosts: the URL on success, otherwise
    /// the failure reason behind `LEGACY_ERROR_PREFIX`.
    pub fn into_legacy_string(self) -> String {
        match self {
            UploadOutcome::Uploaded { url, .. } => url,
            UploadOutcome::Failed { reason } => format!("{}{}", LEGACY_ERROR_PREFIX, reason),
        }
    }
}

/// Random object name, `{uuid-v4}.png`.
pub fn random_object_name() -> String {
    format!("{}.png", Uuid::new_v4())
}

/// Encode `img` as PNG into a temp file named after the object.
/// The file is deleted when the returned handle is closed or dropped.
fn write_temp_png(img: &Image, object_name: &str) -> UploadResult<NamedTempFile> {
    let stem = object_name.trim_end_matches(".png");
    let bytes = encode_png(img).map_err(|e| UploadError::Encode(e.to_string()))?;
    let mut file = tempfile::Builder::new()
        .prefix(stem)
        .suffix(".png")
        .rand_bytes(0)
        .tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;
    debug!("Wrote {} bytes to {:?}", bytes.len(), file.path());
    Ok(file)
}

fn upload_from_temp(
    temp: &NamedTempFile,
    object_name: &str,
    connector: &dyn StoreConnector,
    bucket: &str,
    credentials_path: &Path,
) -> UploadResult<String> {
    let store = connector.connect(credentials_path, bucket)?;
    let data = std::fs::read(temp.path())?;
    store.upload(object_name, &data, "image/png")?;
    store.make_public(object_name)?;
    Ok(store.public_url(object_name))
}

/// Upload `img` as a new public PNG object in `bucket` and return its URL.
///
/// Every failure (encoding, credentials, network, permissions) becomes
/// `UploadOutcome::Failed`. The local temp file is removed on both paths; a
/// failure to remove it is only logged.
pub fn upload_image(
    img: &Image,
    connector: &dyn StoreConnector,
    bucket: &str,
    credentials_path: &Path,
) -> UploadOutcome {
    let object_name = random_object_name();

    let result = write_temp_png(img, &object_name).and_then(|temp| {
        let uploaded = upload_from_temp(&temp, &object_name, connector, bucket, credentials_path);
        let temp_path = temp.path().to_path_buf();
        if let Err(e) = temp.close() {
            warn!("Failed to remove temp file {:?}: {}", temp_path, e);
        }
        uploaded
    });

    match result {
        Ok(url) => {
            info!("Uploaded {}x{} image to {}", img.width(), img.height(), url);
            UploadOutcome::Uploaded { url, object_name }
        }
        Err(e) => {
            error!("{}{}", LEGACY_ERROR_PREFIX, e);
            UploadOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_string_conflates_both_channels() {
        let ok = UploadOutcome::Uploaded {
            url: "https://storage.googleapis.com/b/x.png".to_string(),
            object_name: "x.png".to_string(),
        };
        assert!(ok.is_uploaded());
        assert_eq!(ok.url(), Some("https://storage.googleapis.com/b/x.png"));
        assert_eq!(ok.into_legacy_string(), "https://storage.googleapis.com/b/x.png");

        let failed = UploadOutcome::Failed {
            reason: "boom".to_string(),
        };
        assert_eq!(failed.url(), None);
        assert_eq!(failed.into_legacy_string(), "Error uploading to GCS: boom");
    }

    #[test]
    fn object_names_are_unique_pngs() {
        let a = random_object_name();
        let b = random_object_name();
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), 36 + 4);
    }

    #[test]
    fn temp_file_is_named_after_object_and_removed_on_close() {
        let img = Image::filled(3, 2, [9, 9, 9]).unwrap();
        let name = random_object_name();
        let temp = write_temp_png(&img, &name).unwrap();
        let path = temp.path().to_path_buf();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), name);
        assert!(path.exists());
        temp.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let failed = UploadOutcome::Failed {
            reason: "nope".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"status": "failed", "reason": "nope"})
        );
    }
}
