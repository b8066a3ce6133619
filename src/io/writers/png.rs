use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use crate::core::image::Image;
use crate::error::Result;

pub fn encode_png(img: &Image) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.to_rgb_image()?.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub fn write_png(output: &Path, img: &Image) -> Result<()> {
    img.to_rgb_image()?.save_with_format(output, ImageFormat::Png)?;
    Ok(())
}
