//! High-level, ergonomic library API: resize image files or whole directories,
//! resize in-memory batches, and upload a file to object storage. Prefer these
//! entrypoints over the low-level processing modules when embedding aspectpipe.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::image::Image;
use crate::core::params::TargetSpec;
use crate::core::processing::resize::{aspect_resize, aspect_resize_batch};
use crate::error::{Error, Result};
use crate::io::{load_image, save_image};
use crate::storage::{GcsConfig, GcsConnector, UploadOutcome, upload_image};
use crate::types::OutputFormat;

/// File extensions picked up by directory processing.
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Summary of a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Resize a batch of images in memory; order and count are preserved.
pub fn resize_batch(images: &[Image], spec: &TargetSpec) -> Result<Vec<Image>> {
    aspect_resize_batch(images, spec)
}

/// Load `input`, resize it per `spec` and write it to `output`.
/// The output format comes from `format`, or from the output extension when `None`.
pub fn resize_file_to_path(
    input: &Path,
    output: &Path,
    spec: &TargetSpec,
    format: Option<OutputFormat>,
) -> Result<()> {
    let img = load_image(input)?;
    let resized = aspect_resize(&img, spec)?;
    save_image(output, &resized, format)
}

fn is_input_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Output path for `input` inside `output_dir`: same stem, extension of `format`.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| Error::invalid_argument("input", input.display()))?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    Ok(output_dir.join(name))
}

/// Resize every image file directly inside `input_dir` into `output_dir`.
///
/// Non-image entries and subdirectories are skipped, as is any file whose
/// output path was already claimed by an earlier file (`a.jpg` and `a.png`
/// both map to `a.png`; the first in sorted order wins). With `continue_on_error`
/// a failing file is counted and logged; otherwise the first failure is returned.
pub fn resize_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    spec: &TargetSpec,
    format: OutputFormat,
    continue_on_error: bool,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    info!("Starting batch processing from directory: {:?}", input_dir);
    info!("Output directory: {:?}", output_dir);

    let mut report = BatchReport::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    for path in entries {
        if !path.is_file() || !is_input_image(&path) {
            info!("Skipping: {:?}", path);
            report.skipped += 1;
            continue;
        }
        let output_path = output_path_for(&path, output_dir, format)?;
        if !claimed.insert(output_path.clone()) {
            warn!(
                "Skipping {:?}: output {:?} already written by another input",
                path, output_path
            );
            report.skipped += 1;
            continue;
        }
        info!("Processing: {:?} -> {:?}", path, output_path);

        match resize_file_to_path(&path, &output_path, spec, Some(format)) {
            Ok(()) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Batch processing complete! processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Upload an image file to `bucket` as a new public PNG object.
///
/// Fails only if the file cannot be decoded; upload failures are reported in
/// the returned outcome.
pub fn upload_file(
    input: &Path,
    bucket: &str,
    credentials_path: &Path,
    config: GcsConfig,
) -> Result<UploadOutcome> {
    let img = load_image(input)?;
    let connector = GcsConnector::new(config);
    Ok(upload_image(&img, &connector, bucket, credentials_path))
}
