use std::path::Path;

use tracing::debug;

use crate::core::image::Image;
use crate::error::Result;

/// Decode any supported image file into 8-bit RGB.
pub fn load_image(path: &Path) -> Result<Image> {
    let decoded = image::ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        "Loaded {:?}: {}x{} {:?}",
        path,
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Image::from_dynamic(decoded)
}

/// Decode an in-memory encoded image into 8-bit RGB.
pub fn decode_image(bytes: &[u8]) -> Result<Image> {
    let decoded = image::load_from_memory(bytes)?;
    Image::from_dynamic(decoded)
}
