use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use aspectpipe::api::{resize_directory_to_path, resize_file_to_path, upload_file};
use aspectpipe::node::NodeRegistry;
use aspectpipe::storage::GcsConfig;
use aspectpipe::{OutputFormat, TargetSpec, UploadOutcome};

use super::args::{CliArgs, Command, ResizeArgs, UploadArgs};
use super::errors::AppError;

fn init_logging(enabled: bool) {
    let default_level = if enabled { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file first, then any explicit flags on top.
fn build_spec(args: &ResizeArgs) -> Result<TargetSpec, AppError> {
    let mut spec = match &args.config {
        Some(path) => TargetSpec::from_json_file(path)?,
        None => TargetSpec::default(),
    };
    if let Some(w) = args.width {
        spec.target_width = w;
    }
    if let Some(h) = args.height {
        spec.target_height = h;
    }
    if let Some(mode) = args.mode {
        spec.mode = mode;
    }
    if let Some(color) = args.padding_color {
        spec.pad_color = color;
    }
    spec.validate_for_host()?;
    Ok(spec)
}

fn run_resize(args: ResizeArgs) -> Result<(), AppError> {
    let spec = build_spec(&args)?;
    info!(
        "Target {}x{} mode={} padding_color={}",
        spec.target_width, spec.target_height, spec.mode, spec.pad_color
    );

    if let Some(input_dir) = &args.input_dir {
        let output_dir = args.output_dir.as_ref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;
        let report = resize_directory_to_path(
            input_dir,
            output_dir,
            &spec,
            args.format.unwrap_or(OutputFormat::Png),
            args.continue_on_error,
        )?;
        println!(
            "processed={} skipped={} errors={}",
            report.processed, report.skipped, report.errors
        );
    } else {
        let input = args.input.as_ref().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.as_ref().ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;
        resize_file_to_path(input, output, &spec, args.format)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }
    Ok(())
}

fn load_gcs_config(path: Option<&Path>) -> Result<GcsConfig, AppError> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            Ok(serde_json::from_str(&raw).map_err(aspectpipe::Error::from)?)
        }
        None => Ok(GcsConfig::default()),
    }
}

fn run_upload(args: UploadArgs) -> Result<(), AppError> {
    let config = load_gcs_config(args.gcs_config.as_deref())?;
    let outcome = upload_file(
        &args.input,
        &args.bucket_name,
        &args.service_account_path,
        config,
    )?;

    if args.json {
        let rendered = serde_json::to_string(&outcome).map_err(aspectpipe::Error::from)?;
        println!("{}", rendered);
    }
    match outcome {
        UploadOutcome::Uploaded { url, .. } => {
            if !args.json {
                println!("{}", url);
            }
            Ok(())
        }
        UploadOutcome::Failed { reason } => Err(AppError::UploadFailed { reason }),
    }
}

fn run_nodes() -> Result<(), AppError> {
    let registry = NodeRegistry::with_builtin_nodes();
    println!("{}", registry.schemas_json()?);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    match args.command {
        Command::Resize(resize) => run_resize(resize)?,
        Command::Upload(upload) => run_upload(upload)?,
        Command::Nodes => run_nodes()?,
    }
    Ok(())
}
