//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec, JSON and upload errors, and provides semantic
//! variants for dimension and argument validation.
use thiserror::Error;

use crate::storage::UploadError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid source dimensions: {width}x{height} (both must be at least 1)")]
    InvalidSourceDimensions { width: u32, height: u32 },

    #[error("Invalid target dimensions: {width}x{height} (both must be at least 1)")]
    InvalidTargetDimensions { width: u32, height: u32 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: String, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub fn invalid_argument(arg: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Error::InvalidArgument {
            arg: arg.into(),
            value: value.to_string(),
        }
    }
}
