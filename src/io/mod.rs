//! I/O layer: decoding image files into `Image` (`reader`) and encoding
//! `Image` to PNG or JPEG files and buffers (`writers`).
pub mod reader;
pub use reader::load_image;

pub mod writers;
pub use writers::save_image;
