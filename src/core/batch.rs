//! Adapter between the host's batch tensors and `Image`.
//!
//! The host passes images as a 4-D float array laid out as
//! `[batch, height, width, channel]` with values normalized to `[0, 1]`.
//! Processing never sees that layout: batches are unpacked into owned 8-bit
//! RGB images on the way in and stacked back on the way out.
use ndarray::{Array4, ArrayView3, Axis};

use crate::core::image::{CHANNELS, Image};
use crate::error::{Error, Result};

/// Host batch tensor, `[batch, height, width, channel]`.
pub type ImageBatch = Array4<f32>;

/// Float sample in `[0, 1]` to a byte. Out-of-range and NaN values are clamped
/// first; the scaled value is truncated.
pub fn unit_to_u8(v: f32) -> u8 {
    let clamped = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    (clamped * 255.0) as u8
}

pub fn u8_to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

fn push_pixel<'a>(data: &mut Vec<u8>, mut samples: impl Iterator<Item = &'a f32>, channels: usize) {
    if channels == 1 {
        let v = samples.next().map_or(0, |&v| unit_to_u8(v));
        data.extend_from_slice(&[v, v, v]);
    } else {
        data.extend(samples.take(CHANNELS).map(|&v| unit_to_u8(v)));
    }
}

/// Convert one `[height, width, channel]` slice. Accepts 1 (gray), 3 (RGB) or
/// 4 (RGBA, alpha dropped) channels.
pub fn image_from_view(view: ArrayView3<'_, f32>) -> Result<Image> {
    let (height, width, channels) = view.dim();
    if !matches!(channels, 1 | 3 | 4) {
        return Err(Error::invalid_argument("channels", channels));
    }
    let mut data = Vec::with_capacity(height * width * CHANNELS);
    match view.as_slice() {
        Some(samples) => {
            for px in samples.chunks_exact(channels) {
                push_pixel(&mut data, px.iter(), channels);
            }
        }
        None => {
            for lane in view.lanes(Axis(2)) {
                push_pixel(&mut data, lane.iter(), channels);
            }
        }
    }
    Image::from_raw(width as u32, height as u32, data)
}

/// Unpack every image of a batch, in order.
pub fn images_from_batch(batch: &ImageBatch) -> Result<Vec<Image>> {
    if batch.len_of(Axis(0)) == 0 {
        return Err(Error::Processing("image batch is empty".to_string()));
    }
    batch.axis_iter(Axis(0)).map(image_from_view).collect()
}

/// Stack images into a 3-channel batch. All images must share one size.
pub fn batch_from_images(images: &[Image]) -> Result<ImageBatch> {
    let first = images
        .first()
        .ok_or_else(|| Error::Processing("cannot build an empty image batch".to_string()))?;
    let (width, height) = first.dimensions();

    let mut batch = Array4::<f32>::zeros((images.len(), height as usize, width as usize, CHANNELS));
    for (i, img) in images.iter().enumerate() {
        if img.dimensions() != (width, height) {
            return Err(Error::Processing(format!(
                "image {} is {}x{}, batch is {}x{}",
                i,
                img.width(),
                img.height(),
                width,
                height
            )));
        }
        let mut slot = batch.index_axis_mut(Axis(0), i);
        for (dst, &src) in slot.iter_mut().zip(img.as_raw()) {
            *dst = u8_to_unit(src);
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_truncates_and_clamps() {
        assert_eq!(unit_to_u8(0.0), 0);
        assert_eq!(unit_to_u8(1.0), 255);
        assert_eq!(unit_to_u8(0.5), 127);
        assert_eq!(unit_to_u8(-0.2), 0);
        assert_eq!(unit_to_u8(3.0), 255);
        assert_eq!(unit_to_u8(f32::NAN), 0);
        assert_eq!(u8_to_unit(255), 1.0);
    }

    #[test]
    fn unpacks_rgb_batch_in_order() {
        let mut batch = Array4::<f32>::zeros((2, 2, 3, 3));
        batch[[0, 0, 0, 0]] = 1.0;
        batch[[1, 1, 2, 2]] = 1.0;
        let images = images_from_batch(&batch).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].dimensions(), (3, 2));
        assert_eq!(images[0].pixel(0, 0), [255, 0, 0]);
        assert_eq!(images[1].pixel(2, 1), [0, 0, 255]);
        assert_eq!(images[1].pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn gray_and_rgba_are_normalized_to_rgb() {
        let gray = Array4::<f32>::from_elem((1, 1, 2, 1), 1.0);
        assert_eq!(images_from_batch(&gray).unwrap()[0].pixel(1, 0), [255, 255, 255]);

        let mut rgba = Array4::<f32>::zeros((1, 1, 1, 4));
        rgba[[0, 0, 0, 1]] = 1.0;
        rgba[[0, 0, 0, 3]] = 1.0;
        assert_eq!(images_from_batch(&rgba).unwrap()[0].pixel(0, 0), [0, 255, 0]);
    }

    #[test]
    fn strided_views_match_contiguous_ones() {
        // [width, height, channel] permuted to [height, width, channel] is not
        // contiguous in standard order.
        let mut wh = ndarray::Array3::<f32>::zeros((3, 2, 3));
        wh[[2, 1, 0]] = 1.0;
        wh[[0, 1, 2]] = 1.0;
        let view = wh.view().permuted_axes([1, 0, 2]);
        assert!(view.as_slice().is_none());

        let strided = image_from_view(view).unwrap();
        let contiguous = image_from_view(view.as_standard_layout().view()).unwrap();
        assert_eq!(strided, contiguous);
        assert_eq!(strided.dimensions(), (3, 2));
        assert_eq!(strided.pixel(2, 1), [255, 0, 0]);
        assert_eq!(strided.pixel(0, 1), [0, 0, 255]);
        assert_eq!(strided.pixel(1, 0), [0, 0, 0]);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(images_from_batch(&Array4::<f32>::zeros((0, 2, 2, 3))).is_err());
        assert!(images_from_batch(&Array4::<f32>::zeros((1, 2, 2, 2))).is_err());
        assert!(images_from_batch(&Array4::<f32>::zeros((1, 0, 2, 3))).is_err());
        assert!(batch_from_images(&[]).is_err());
    }

    #[test]
    fn stacks_images_back() {
        let a = Image::filled(2, 1, [255, 0, 0]).unwrap();
        let b = Image::filled(2, 1, [0, 0, 255]).unwrap();
        let batch = batch_from_images(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(batch.dim(), (2, 1, 2, 3));
        assert_eq!(batch[[0, 0, 1, 0]], 1.0);
        assert_eq!(batch[[1, 0, 1, 2]], 1.0);
        assert_eq!(images_from_batch(&batch).unwrap(), vec![a, b]);

        let c = Image::filled(1, 1, [0, 0, 0]).unwrap();
        assert!(batch_from_images(&[Image::filled(2, 1, [0, 0, 0]).unwrap(), c]).is_err());
    }
}
