use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{PadColor, ResizeMode};

/// Smallest width/height the host node accepts.
pub const MIN_TARGET_SIZE: u32 = 64;
/// Largest width/height the host node accepts.
pub const MAX_TARGET_SIZE: u32 = 8192;
/// Width/height granularity of the host node, counted from `MIN_TARGET_SIZE`.
pub const TARGET_SIZE_STEP: u32 = 8;
pub const DEFAULT_TARGET_SIZE: u32 = 640;

/// Resize parameters suitable for config files and node inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    pub target_width: u32,
    pub target_height: u32,
    pub mode: ResizeMode,
    /// Only used by `AspectFit`
    pub pad_color: PadColor,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_SIZE,
            target_height: DEFAULT_TARGET_SIZE,
            mode: ResizeMode::AspectFill,
            pad_color: PadColor::Black,
        }
    }
}

impl TargetSpec {
    pub fn new(target_width: u32, target_height: u32, mode: ResizeMode, pad_color: PadColor) -> Self {
        Self {
            target_width,
            target_height,
            mode,
            pad_color,
        }
    }

    /// Check the range and step limits the host node declares for width and height.
    /// The resizer itself accepts any positive target; this is for the node boundary.
    pub fn validate_for_host(&self) -> Result<()> {
        validate_host_dimension("width", self.target_width)?;
        validate_host_dimension("height", self.target_height)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

pub fn validate_host_dimension(arg: &str, value: u32) -> Result<()> {
    if !(MIN_TARGET_SIZE..=MAX_TARGET_SIZE).contains(&value)
        || (value - MIN_TARGET_SIZE) % TARGET_SIZE_STEP != 0
    {
        return Err(Error::invalid_argument(arg, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_node_defaults() {
        let spec = TargetSpec::default();
        assert_eq!((spec.target_width, spec.target_height), (640, 640));
        assert_eq!(spec.mode, ResizeMode::AspectFill);
        assert_eq!(spec.pad_color, PadColor::Black);
        assert!(spec.validate_for_host().is_ok());
    }

    #[test]
    fn host_limits() {
        assert!(validate_host_dimension("width", 64).is_ok());
        assert!(validate_host_dimension("width", 8192).is_ok());
        assert!(validate_host_dimension("width", 72).is_ok());
        assert!(validate_host_dimension("width", 56).is_err());
        assert!(validate_host_dimension("width", 8200).is_err());
        assert!(validate_host_dimension("height", 65).is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let spec = TargetSpec::from_json_str(r#"{"target_width": 1024, "mode": "aspect_fit"}"#)
            .unwrap();
        assert_eq!(spec.target_width, 1024);
        assert_eq!(spec.target_height, 640);
        assert_eq!(spec.mode, ResizeMode::AspectFit);
        assert_eq!(spec.pad_color, PadColor::Black);
    }
}
