use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image as FirImage};
use tracing::{debug, info};

use crate::core::image::Image;
use crate::core::params::TargetSpec;
use crate::core::processing::padding::{center_offset, crop_center, pad_to_canvas};
use crate::error::{Error, Result};
use crate::types::{PadColor, ResizeMode};

/// Scale factor for mapping `src` onto `target`. Fill takes the larger per-axis
/// factor (cover), Fit the smaller one (contain).
pub fn calculate_scale(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
    mode: ResizeMode,
) -> Result<f64> {
    check_dimensions(src_width, src_height, target_width, target_height)?;
    let scale_w = target_width as f64 / src_width as f64;
    let scale_h = target_height as f64 / src_height as f64;
    Ok(match mode {
        ResizeMode::AspectFill => scale_w.max(scale_h),
        ResizeMode::AspectFit => scale_w.min(scale_h),
    })
}

/// Intermediate size the source is resampled to before cropping or padding.
///
/// Each axis is `round(src * scale)`. Rounding can land one pixel on the wrong
/// side of the target, so Fill is clamped up to the target (the crop window must
/// fit) and Fit is clamped into `1..=target` (the paste must fit and stay non-empty).
pub fn calculate_scaled_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
    mode: ResizeMode,
) -> Result<(u32, u32)> {
    let scale = calculate_scale(src_width, src_height, target_width, target_height, mode)?;
    let new_w = (src_width as f64 * scale).round() as u32;
    let new_h = (src_height as f64 * scale).round() as u32;

    Ok(match mode {
        ResizeMode::AspectFill => (new_w.max(target_width), new_h.max(target_height)),
        ResizeMode::AspectFit => (
            new_w.clamp(1, target_width),
            new_h.clamp(1, target_height),
        ),
    })
}

fn check_dimensions(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> Result<()> {
    if src_width == 0 || src_height == 0 {
        return Err(Error::InvalidSourceDimensions {
            width: src_width,
            height: src_height,
        });
    }
    if target_width == 0 || target_height == 0 {
        return Err(Error::InvalidTargetDimensions {
            width: target_width,
            height: target_height,
        });
    }
    Ok(())
}

/// Lanczos3 resample of an RGB image. Returns a copy when the size is unchanged.
pub fn resize_rgb(img: &Image, target_width: u32, target_height: u32) -> Result<Image> {
    if img.dimensions() == (target_width, target_height) {
        return Ok(img.clone());
    }
    resample(img, target_width, target_height, lanczos_options())
}

fn lanczos_options() -> ResizeOptions {
    ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
}

fn resample(
    img: &Image,
    target_width: u32,
    target_height: u32,
    resize_options: ResizeOptions,
) -> Result<Image> {
    if target_width == 0 || target_height == 0 {
        return Err(Error::InvalidTargetDimensions {
            width: target_width,
            height: target_height,
        });
    }

    let mut resizer = Resizer::new();
    let src_image = FirImage::from_vec_u8(
        img.width(),
        img.height(),
        img.as_raw().to_vec(),
        PixelType::U8x3,
    )
    .map_err(Error::external)?;
    let mut dst_image = FirImage::new(target_width, target_height, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    Image::from_raw(target_width, target_height, dst_image.into_vec())
}

/// Source-space window `(left, top, width, height)` that the centered
/// `target` crop of an image zoomed to `scaled` covers.
pub fn source_crop_window(
    src: (u32, u32),
    scaled: (u32, u32),
    target: (u32, u32),
) -> (f64, f64, f64, f64) {
    let axis = |src: u32, scaled: u32, target: u32| {
        let scale = scaled as f64 / src as f64;
        let start = center_offset(scaled, target) as f64 / scale;
        let len = (target as f64 / scale).min(src as f64 - start);
        (start, len)
    };
    let (left, width) = axis(src.0, scaled.0, target.0);
    let (top, height) = axis(src.1, scaled.1, target.1);
    (left, top, width, height)
}

/// Zoom so the target is fully covered, then center-crop. Never pads.
///
/// The crop window is mapped back onto the source and only that region is
/// resampled straight to the target; the zoomed image is never materialized.
pub fn aspect_fill(img: &Image, target_width: u32, target_height: u32) -> Result<Image> {
    let (new_w, new_h) = calculate_scaled_dimensions(
        img.width(),
        img.height(),
        target_width,
        target_height,
        ResizeMode::AspectFill,
    )?;

    info!(
        "Aspect fill: {}x{} -> {}x{}, crop to {}x{} at ({}, {})",
        img.width(),
        img.height(),
        new_w,
        new_h,
        target_width,
        target_height,
        center_offset(new_w, target_width),
        center_offset(new_h, target_height)
    );

    if (new_w, new_h) == (target_width, target_height) {
        return resize_rgb(img, target_width, target_height);
    }
    if (new_w, new_h) == img.dimensions() {
        return crop_center(img, target_width, target_height);
    }

    let (left, top, width, height) = source_crop_window(
        img.dimensions(),
        (new_w, new_h),
        (target_width, target_height),
    );
    debug!(
        "Resampling source window ({:.2}, {:.2}) {:.2}x{:.2}",
        left, top, width, height
    );
    resample(
        img,
        target_width,
        target_height,
        lanczos_options().crop(left, top, width, height),
    )
}

/// Scale so the whole source fits, then center it on a solid canvas. Never crops.
pub fn aspect_fit(
    img: &Image,
    target_width: u32,
    target_height: u32,
    pad_color: PadColor,
) -> Result<Image> {
    let (new_w, new_h) = calculate_scaled_dimensions(
        img.width(),
        img.height(),
        target_width,
        target_height,
        ResizeMode::AspectFit,
    )?;

    info!(
        "Aspect fit: {}x{} -> {}x{}, paste on {} {}x{} at ({}, {})",
        img.width(),
        img.height(),
        new_w,
        new_h,
        pad_color,
        target_width,
        target_height,
        center_offset(target_width, new_w),
        center_offset(target_height, new_h)
    );

    let scaled = resize_rgb(img, new_w, new_h)?;
    if scaled.dimensions() == (target_width, target_height) {
        return Ok(scaled);
    }
    pad_to_canvas(&scaled, target_width, target_height, pad_color.rgb())
}

/// Resize one image to exactly the target size in `spec`.
pub fn aspect_resize(img: &Image, spec: &TargetSpec) -> Result<Image> {
    match spec.mode {
        ResizeMode::AspectFill => aspect_fill(img, spec.target_width, spec.target_height),
        ResizeMode::AspectFit => {
            aspect_fit(img, spec.target_width, spec.target_height, spec.pad_color)
        }
    }
}

/// Resize every image independently, preserving order. Stops at the first failure.
pub fn aspect_resize_batch(images: &[Image], spec: &TargetSpec) -> Result<Vec<Image>> {
    debug!(
        "Resizing batch of {} to {}x{} ({})",
        images.len(),
        spec.target_width,
        spec.target_height,
        spec.mode
    );
    images.iter().map(|img| aspect_resize(img, spec)).collect()
}
