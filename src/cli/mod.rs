//! Command Line Interface (CLI) layer for aspectpipe.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for resizing single files or
//! directories, uploading to GCS, and dumping node schemas. It wires
//! user-provided options to the library functionality exposed via `aspectpipe::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
