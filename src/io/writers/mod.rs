//! Output writers for PNG (via `image`) and JPEG (via `jpeg-encoder`).
use std::path::Path;

use tracing::info;

use crate::core::image::Image;
use crate::error::{Error, Result};
use crate::types::OutputFormat;

pub mod jpeg;
pub mod png;

/// Resolve the output format: explicit choice first, then the file extension.
pub fn resolve_format(output: &Path, format: Option<OutputFormat>) -> Result<OutputFormat> {
    if let Some(f) = format {
        return Ok(f);
    }
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    OutputFormat::from_extension(ext).ok_or_else(|| Error::invalid_argument("output", output.display()))
}

pub fn save_image(output: &Path, img: &Image, format: Option<OutputFormat>) -> Result<()> {
    let format = resolve_format(output, format)?;
    match format {
        OutputFormat::Png => png::write_png(output, img)?,
        OutputFormat::Jpeg => jpeg::write_rgb_jpeg(output, img)?,
    }
    info!(
        "Wrote {} {}x{} to {:?}",
        format,
        img.width(),
        img.height(),
        output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::reader::{decode_image, load_image};

    #[test]
    fn png_roundtrip_is_lossless() {
        let img = Image::from_fn(6, 4, |x, y| [(x * 40) as u8, (y * 60) as u8, 77]).unwrap();
        let bytes = png::encode_png(&img).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_image(&bytes).unwrap(), img);
    }

    #[test]
    fn save_infers_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = Image::filled(8, 8, [120, 60, 30]).unwrap();

        let png_path = dir.path().join("out.png");
        save_image(&png_path, &img, None).unwrap();
        assert_eq!(load_image(&png_path).unwrap(), img);

        let jpg_path = dir.path().join("out.jpg");
        save_image(&jpg_path, &img, None).unwrap();
        assert_eq!(load_image(&jpg_path).unwrap().dimensions(), (8, 8));

        assert!(save_image(&dir.path().join("out.bmp"), &img, None).is_err());
    }

    #[test]
    fn jpeg_buffer_has_soi_marker() {
        let img = Image::filled(4, 4, [0, 0, 0]).unwrap();
        let bytes = jpeg::encode_rgb_jpeg(&img).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
