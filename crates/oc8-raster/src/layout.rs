use tracing::debug;

use crate::codec::PngCompression;
use crate::error::{RasterError, Result};
use crate::image::RasterImage;
use crate::texel::{texels_to_samples, ChannelMode, TEXEL_BYTES};

/// Default per-image byte budget: 200 MiB of texel data.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 200 * 1024 * 1024;

/// Default maximum image width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 4096;

// PNG stores dimensions as non-negative 31-bit integers.
const PNG_MAX_DIMENSION: usize = i32::MAX as usize;

/// Width and height chosen for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLayout {
    pub width: u32,
    pub height: u32,
}

impl ImageLayout {
    /// Closest-to-square rectangle holding `pixels` with `width <= max_width`.
    pub fn for_pixels(pixels: usize, max_width: u32) -> Result<Self> {
        if pixels == 0 {
            return Err(RasterError::EmptyChunk);
        }
        let width = pixels.isqrt().clamp(1, max_width.max(1) as usize);
        let height = pixels.div_ceil(width);
        if height > PNG_MAX_DIMENSION {
            return Err(RasterError::TooLarge(height));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How a texel stream is split and rendered into artifacts.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Maximum texel bytes carried by one image. Default: 200 MiB.
    pub max_image_bytes: usize,
    /// Maximum image width in pixels. Default: 4096.
    pub max_width: u32,
    /// Channel layout of written artifacts. Default: `Opaque3`.
    pub mode: ChannelMode,
    /// PNG deflate effort. Default: `Fast`.
    pub compression: PngCompression,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_width: DEFAULT_MAX_WIDTH,
            mode: ChannelMode::Opaque3,
            compression: PngCompression::Fast,
        }
    }
}

/// Split a texel stream into images of at most `max_image_bytes` texel bytes each.
///
/// Every image but the last is an exact rectangle; the last one is
/// zero-padded to complete its final row.
pub fn chunk_into_images(
    texels: &[u8],
    max_image_bytes: usize,
    max_width: u32,
    mode: ChannelMode,
) -> Result<Vec<RasterImage>> {
    let total_pixels = texels.len() / TEXEL_BYTES;
    if total_pixels == 0 {
        return Err(RasterError::EmptyChunk);
    }
    // Full chunks are trimmed to whole rows so only the last image carries padding.
    let max_pixels = (max_image_bytes / TEXEL_BYTES).max(1);
    let row = ImageLayout::for_pixels(max_pixels, max_width)?.width as usize;
    let chunk_pixels = max_pixels / row * row;

    let mut images = Vec::with_capacity(total_pixels.div_ceil(chunk_pixels));
    for chunk in texels[..total_pixels * TEXEL_BYTES].chunks(chunk_pixels * TEXEL_BYTES) {
        let pixels = chunk.len() / TEXEL_BYTES;
        let layout = ImageLayout::for_pixels(pixels, max_width)?;

        let mut padded = chunk.to_vec();
        padded.resize(layout.pixel_count() * TEXEL_BYTES, 0);
        let samples = texels_to_samples(&padded, mode);

        debug!(
            index = images.len(),
            width = layout.width,
            height = layout.height,
            pixels,
            padding = layout.pixel_count() - pixels,
            "laid out image"
        );
        images.push(RasterImage::new(
            layout.width,
            layout.height,
            mode.channels(),
            samples,
        )?);
    }
    Ok(images)
}
