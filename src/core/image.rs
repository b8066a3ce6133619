//! Owned 8-bit RGB image value type used by every processing step.
//! Host-specific layouts (float tensors, decoded files) are converted at the edges.
use image::{DynamicImage, RgbImage};

use crate::error::{Error, Result};

pub const CHANNELS: usize = 3;

/// Packed, row-major RGB pixels with 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Wrap an existing buffer. Fails on zero-area images or a buffer of the wrong length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSourceDimensions { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A canvas of the given size filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidTargetDimensions { width, height });
        }
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSourceDimensions { width, height });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Pixel at (x, y). Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or(Error::BufferSize {
            expected: self.width as usize * self.height as usize * CHANNELS,
            actual: self.data.len(),
        })
    }

    pub fn from_rgb_image(img: RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, img.into_raw())
    }

    /// Any decoded image; alpha is dropped and gray is expanded.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        Self::from_rgb_image(img.into_rgb8())
    }
}
