use tracing::info;

use crate::core::image::{CHANNELS, Image};
use crate::error::{Error, Result};

/// Offset that centers `inner` inside `outer`, rounding toward the top/left edge.
/// Returns 0 when `inner` is not smaller than `outer`.
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Paste `img` centered on a `canvas_width`x`canvas_height` canvas filled with `rgb`.
/// Any part of `img` that does not fit is clipped symmetrically.
pub fn pad_to_canvas(
    img: &Image,
    canvas_width: u32,
    canvas_height: u32,
    rgb: [u8; 3],
) -> Result<Image> {
    let mut canvas = Image::filled(canvas_width, canvas_height, rgb)?;

    let pad_left = center_offset(canvas_width, img.width());
    let pad_top = center_offset(canvas_height, img.height());
    // Source offsets are non-zero only when the image is larger than the canvas.
    let src_left = center_offset(img.width(), canvas_width);
    let src_top = center_offset(img.height(), canvas_height);
    let copy_cols = img.width().min(canvas_width) as usize;
    let copy_rows = img.height().min(canvas_height);

    info!(
        "Adding padding: cols={}, rows={}, pad_cols={}, pad_rows={}",
        img.width(),
        img.height(),
        pad_left,
        pad_top
    );

    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..copy_rows {
        let src = img.row(src_top + row);
        let src_start = src_left as usize * CHANNELS;
        let src_slice = &src[src_start..src_start + copy_cols * CHANNELS];
        let dst = canvas.row_mut(pad_top + row);
        let dst_start = pad_left as usize * CHANNELS;
        dst[dst_start..dst_start + copy_cols * CHANNELS].copy_from_slice(src_slice);
    }

    Ok(canvas)
}

/// Cut a `width`x`height` window out of the middle of `img`.
/// Fails if the window is larger than the image in either axis.
pub fn crop_center(img: &Image, width: u32, height: u32) -> Result<Image> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidTargetDimensions { width, height });
    }
    if width > img.width() || height > img.height() {
        return Err(Error::Processing(format!(
            "crop window {}x{} exceeds image {}x{}",
            width,
            height,
            img.width(),
            img.height()
        )));
    }

    let left = center_offset(img.width(), width);
    let top = center_offset(img.height(), height);
    if left == 0 && top == 0 && width == img.width() && height == img.height() {
        return Ok(img.clone());
    }

    let row_bytes = width as usize * CHANNELS;
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    for row in top..top + height {
        let start = left as usize * CHANNELS;
        data.extend_from_slice(&img.row(row)[start..start + row_bytes]);
    }
    Image::from_raw(width, height, data)
}
