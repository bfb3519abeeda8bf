use crate::error::{RasterError, Result};

/// An 8-bit raster held as interleaved channel samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel (1 to 4).
    pub channels: u8,
    /// `width * height * channels` bytes, row-major.
    pub samples: Vec<u8>,
}

impl RasterImage {
    /// Create an image, checking that `samples` matches the geometry.
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize));
        if width == 0 || height == 0 || !(1..=4).contains(&channels) || expected != Some(samples.len())
        {
            return Err(RasterError::InvalidDimensions {
                width,
                height,
                channels,
                len: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
