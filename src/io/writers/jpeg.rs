use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::core::image::Image;
use crate::error::{Error, Result};

/// JPEG dimensions are limited to 16 bits per axis.
fn jpeg_dimensions(img: &Image) -> Result<(u16, u16)> {
    let w = u16::try_from(img.width()).map_err(|_| Error::invalid_argument("width", img.width()))?;
    let h =
        u16::try_from(img.height()).map_err(|_| Error::invalid_argument("height", img.height()))?;
    Ok((w, h))
}

pub fn write_rgb_jpeg(output: &Path, img: &Image) -> Result<()> {
    let (w, h) = jpeg_dimensions(img)?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder
        .encode(img.as_raw(), w, h, ColorType::Rgb)
        .map_err(Error::external)?;
    Ok(())
}

pub fn encode_rgb_jpeg(img: &Image) -> Result<Vec<u8>> {
    let (w, h) = jpeg_dimensions(img)?;
    let mut buf = Vec::new();
    let encoder = Encoder::new(&mut buf, 100);
    encoder
        .encode(img.as_raw(), w, h, ColorType::Rgb)
        .map_err(Error::external)?;
    Ok(buf)
}
