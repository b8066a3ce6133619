use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use aspectpipe::{OutputFormat, PadColor, ResizeMode};

#[derive(Parser)]
#[command(name = "aspectpipe", version, about = "aspectpipe CLI")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resize images to an exact size with aspect fill or aspect fit
    Resize(ResizeArgs),
    /// Upload an image to a GCS bucket and print its public URL
    Upload(UploadArgs),
    /// Print the node schemas as JSON
    Nodes,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file with resize parameters; explicit flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target width (64-8192, step 8)
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Target height (64-8192, step 8)
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Resize mode (aspect_fill or aspect_fit)
    #[arg(short, long, value_enum)]
    pub mode: Option<ResizeMode>,

    /// Padding color for aspect_fit (black or white)
    #[arg(long, value_enum)]
    pub padding_color: Option<PadColor>,

    /// Output format (png or jpeg); inferred from the output extension in single file mode
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Batch mode: continue processing other files when one fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Image to upload
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination bucket
    #[arg(long, default_value = "my-bucket")]
    pub bucket_name: String,

    /// Service account JSON key file
    #[arg(long, default_value = "service-account.json")]
    pub service_account_path: PathBuf,

    /// Optional JSON file with GCS endpoint settings
    #[arg(long)]
    pub gcs_config: Option<PathBuf>,

    /// Print the result as JSON instead of a bare URL
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
