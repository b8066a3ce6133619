use std::path::Path;
use std::sync::Arc;

use super::{Node, NodeInputs, NodeValue, OutputKind, OutputSpec, ParamKind, ParamSpec};
use super::{get_image, get_str};
use crate::core::batch::image_from_view;
use crate::core::image::Image;
use crate::error::{Error, Result};
use crate::storage::{GcsConnector, StoreConnector, UploadOutcome, upload_image};

use ndarray::Axis;

/// Uploads the first image of a batch to a GCS bucket and outputs its public URL.
///
/// The output is a single string: the URL, or an `Error uploading to GCS: ...`
/// message when the upload fails. Use [`UploadImageNode::upload`] for the
/// tagged outcome.
#[derive(Clone)]
pub struct UploadImageNode {
    connector: Arc<dyn StoreConnector + Send + Sync>,
}

impl Default for UploadImageNode {
    fn default() -> Self {
        Self::new(Arc::new(GcsConnector::default()))
    }
}

impl UploadImageNode {
    pub fn new(connector: Arc<dyn StoreConnector + Send + Sync>) -> Self {
        Self { connector }
    }

    pub fn upload(&self, img: &Image, bucket: &str, credentials_path: &Path) -> UploadOutcome {
        upload_image(img, self.connector.as_ref(), bucket, credentials_path)
    }
}

impl Node for UploadImageNode {
    fn name(&self) -> &'static str {
        "UploadImageToGCS"
    }

    fn display_name(&self) -> &'static str {
        "Upload Image to GCS"
    }

    fn category(&self) -> &'static str {
        "🍿PapcornsNodes/gcs"
    }

    fn inputs(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("image", ParamKind::Image),
            ParamSpec::new(
                "bucket_name",
                ParamKind::String {
                    default: "my-bucket".to_string(),
                },
            ),
            ParamSpec::new(
                "service_account_path",
                ParamKind::String {
                    default: "service-account.json".to_string(),
                },
            ),
        ]
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![OutputSpec::new("public_url", OutputKind::String)]
    }

    fn run(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>> {
        let batch = get_image(inputs, "image")?;
        let bucket = get_str(inputs, "bucket_name")?;
        let credentials_path = get_str(inputs, "service_account_path")?;

        // Only the first image of the batch is uploaded.
        if batch.len_of(Axis(0)) == 0 {
            return Err(Error::Processing("image batch is empty".to_string()));
        }
        let first = image_from_view(batch.index_axis(Axis(0), 0))?;

        let outcome = self.upload(&first, bucket, Path::new(credentials_path));
        Ok(vec![NodeValue::String(outcome.into_legacy_string())])
    }
}
