//! Geometry and resampling for the aspect-resize transform.
pub mod padding;
pub mod resize;
