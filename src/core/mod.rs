//! Core processing building blocks: the RGB image value type, resize parameters,
//! the batch tensor adapter, and the fill/fit resize and padding primitives.
//! These are consumed by the node layer and the high-level `api` module.
pub mod batch;
pub mod image;
pub mod params;
pub mod processing;
