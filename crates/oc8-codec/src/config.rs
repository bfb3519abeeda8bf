use oc8_frame::FrameConfig;
use oc8_raster::{ChannelMode, RasterConfig};

use crate::compress::{Compressor, CompressorKind};
use crate::decoder::StreamOrder;
use crate::error::{CodecError, Result};

/// Configuration for the encode direction.
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    /// Payload compressor. Default: brotli.
    pub compressor: CompressorKind,
    /// Compression quality, within the compressor's range. Default: 11.
    pub quality: i32,
    /// Image layout and artifact format.
    pub raster: RasterConfig,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        let compressor = CompressorKind::default();
        Self {
            compressor,
            quality: compressor.default_quality(),
            raster: RasterConfig::default(),
        }
    }
}

impl EncodeConfig {
    /// Check limits against the configured compressor.
    pub fn validate(&self) -> Result<()> {
        self.validate_for(&self.compressor)
    }

    /// Check limits against `compressor`, which may differ from the configured one.
    pub fn validate_for<C: Compressor>(&self, compressor: &C) -> Result<()> {
        let range = compressor.quality_range();
        if !range.contains(&self.quality) {
            return Err(CodecError::InvalidConfig(format!(
                "{} quality {} outside {}..={}",
                compressor.name(),
                self.quality,
                range.start(),
                range.end()
            )));
        }
        if self.raster.max_width == 0 {
            return Err(CodecError::InvalidConfig(
                "max image width must be greater than zero".into(),
            ));
        }
        if self.raster.max_image_bytes < oc8_raster::TEXEL_BYTES {
            return Err(CodecError::InvalidConfig(format!(
                "max image bytes must be at least {}",
                oc8_raster::TEXEL_BYTES
            )));
        }
        Ok(())
    }
}

/// Configuration for the decode search.
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Payload compressor. Default: brotli.
    pub compressor: CompressorKind,
    /// Payload cap and offset scan bound.
    pub frame: FrameConfig,
    /// Concatenation orders to try, outermost loop.
    pub orders: Vec<StreamOrder>,
    /// Channel modes to try for each order.
    pub modes: Vec<ChannelMode>,
    /// Only try the canonical layout: as-given order, opaque3, offset 0, big-endian.
    pub strict: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            compressor: CompressorKind::default(),
            frame: FrameConfig::default(),
            orders: StreamOrder::ALL.to_vec(),
            modes: ChannelMode::ALL.to_vec(),
            strict: false,
        }
    }
}

impl DecodeConfig {
    /// Canonical fast path only.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.orders.is_empty() {
            return Err(CodecError::InvalidConfig(
                "at least one stream order is required".into(),
            ));
        }
        if self.modes.is_empty() {
            return Err(CodecError::InvalidConfig(
                "at least one channel mode is required".into(),
            ));
        }
        if self.frame.max_payload_size == 0 {
            return Err(CodecError::InvalidConfig(
                "max payload size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
