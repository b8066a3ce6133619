//! Shared types and enums used across aspectpipe.
//! Includes `ResizeMode`, `PadColor` and `OutputFormat`; their string spellings
//! match the ones the hosting node editor uses.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the source is mapped onto the target rectangle.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Zoom until the target is covered, then center-crop.
    #[default]
    #[value(name = "aspect_fill", alias = "fill")]
    AspectFill,
    /// Scale until the source fits, then center on a padded canvas.
    #[value(name = "aspect_fit", alias = "fit")]
    AspectFit,
}

impl ResizeMode {
    pub const ALL: [ResizeMode; 2] = [ResizeMode::AspectFill, ResizeMode::AspectFit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeMode::AspectFill => "aspect_fill",
            ResizeMode::AspectFit => "aspect_fit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Solid background used for the borders introduced by `AspectFit`.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PadColor {
    #[default]
    Black,
    White,
}

impl PadColor {
    pub const ALL: [PadColor; 2] = [PadColor::Black, PadColor::White];

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PadColor::Black => [0, 0, 0],
            PadColor::White => [255, 255, 255],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PadColor::Black => "black",
            PadColor::White => "white",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for PadColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[value(name = "png")]
    Png,
    #[value(name = "jpeg", alias = "jpg")]
    Jpeg, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension; `None` for anything unknown.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}
