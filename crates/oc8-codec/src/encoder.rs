use oc8_frame::build_frame;
use oc8_raster::{artifact_suffix, chunk_into_images, encode_png, pack_to_texel_stream, ChannelMode};
use tracing::{debug, info};

use crate::compress::{Compressor, CompressorKind};
use crate::config::EncodeConfig;
use crate::error::Result;

/// One encoded image, ready to be persisted.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Position in the sequence, starting at 0.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub mode: ChannelMode,
    /// PNG file contents.
    pub png: Vec<u8>,
}

impl Artifact {
    /// File name suffix for this part, e.g. `_part00.png`.
    pub fn suffix(&self) -> String {
        artifact_suffix(self.index)
    }
}

/// Result of encoding one input.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub artifacts: Vec<Artifact>,
    pub input_len: usize,
    pub compressed_len: usize,
    /// Header + payload size.
    pub frame_len: usize,
}

/// Turns byte payloads into PNG artifacts.
pub struct Encoder<C = CompressorKind> {
    compressor: C,
    config: EncodeConfig,
}

impl Encoder<CompressorKind> {
    /// Create an encoder using the compressor named in `config`.
    pub fn new(config: EncodeConfig) -> Self {
        Self::with_compressor(config.compressor, config)
    }
}

impl Default for Encoder<CompressorKind> {
    fn default() -> Self {
        Self::new(EncodeConfig::default())
    }
}

impl<C: Compressor> Encoder<C> {
    pub fn with_compressor(compressor: C, config: EncodeConfig) -> Self {
        Self { compressor, config }
    }

    /// Compress, frame, pack and render `input` as an ordered artifact sequence.
    pub fn encode(&self, input: &[u8]) -> Result<Encoded> {
        self.config.validate_for(&self.compressor)?;
        let raster = &self.config.raster;

        let compressed = self.compressor.compress(input, self.config.quality)?;
        let frame = build_frame(&compressed)?;
        let texels = pack_to_texel_stream(&frame);
        debug!(
            compressor = self.compressor.name(),
            input = input.len(),
            compressed = compressed.len(),
            frame = frame.len(),
            "framed payload"
        );

        let images = chunk_into_images(&texels, raster.max_image_bytes, raster.max_width, raster.mode)?;
        let mut artifacts = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            artifacts.push(Artifact {
                index,
                width: image.width,
                height: image.height,
                mode: raster.mode,
                png: encode_png(image, raster.compression)?,
            });
        }

        info!(
            input = input.len(),
            artifacts = artifacts.len(),
            mode = %raster.mode,
            "encoded payload"
        );
        Ok(Encoded {
            artifacts,
            input_len: input.len(),
            compressed_len: compressed.len(),
            frame_len: frame.len(),
        })
    }
}

/// Encode with the default compressor and configuration.
pub fn encode(input: &[u8]) -> Result<Encoded> {
    Encoder::default().encode(input)
}

/// Encode with an explicit configuration.
pub fn encode_with_config(input: &[u8], config: &EncodeConfig) -> Result<Encoded> {
    Encoder::new(config.clone()).encode(input)
}

#[cfg(test)]
mod tests {
    use oc8_frame::{Endianness, HEADER_SIZE};
    use oc8_raster::decode_png;

    use super::*;
    use crate::error::CodecError;

    #[test]
    fn single_artifact_for_small_input() {
        let encoded = encode(b"small payload").unwrap();

        assert_eq!(encoded.artifacts.len(), 1);
        assert_eq!(encoded.input_len, 13);
        assert_eq!(encoded.frame_len, HEADER_SIZE + encoded.compressed_len + 1);

        let artifact = &encoded.artifacts[0];
        assert_eq!(artifact.suffix(), "_part00.png");
        assert_eq!(artifact.mode, ChannelMode::Opaque3);
    }

    #[test]
    fn first_artifact_starts_with_canonical_header() {
        let encoded = encode(b"header check").unwrap();
        let image = decode_png(&encoded.artifacts[0].png).unwrap();
        let stream = bytes::Bytes::from(image.samples);

        let header = oc8_frame::FrameHeader::read(&stream, 0, Endianness::Big).unwrap();
        assert_eq!(header.payload_length as usize, encoded.compressed_len + 1);
        assert_eq!(header.total_length as usize, encoded.frame_len);
        assert_eq!(header.flags, 0);
        assert_eq!(&stream[9..16], &[0u8; 7]);
    }

    #[test]
    fn byte_budget_splits_into_sequence() {
        let config = EncodeConfig {
            quality: 1,
            raster: oc8_raster::RasterConfig {
                max_image_bytes: 96,
                ..Default::default()
            },
            ..EncodeConfig::default()
        };
        let input: Vec<u8> = (0..2048u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
        let encoded = encode_with_config(&input, &config).unwrap();

        assert!(encoded.artifacts.len() > 1);
        for (index, artifact) in encoded.artifacts.iter().enumerate() {
            assert_eq!(artifact.index, index);
            assert!(artifact.width as usize * artifact.height as usize * 3 <= 96);
        }
    }

    #[test]
    fn alpha_mode_writes_rgba() {
        let config = EncodeConfig {
            raster: oc8_raster::RasterConfig {
                mode: ChannelMode::AlphaStripped4,
                ..Default::default()
            },
            ..EncodeConfig::default()
        };
        let encoded = encode_with_config(b"with alpha", &config).unwrap();
        let image = decode_png(&encoded.artifacts[0].png).unwrap();
        assert_eq!(image.channels, 4);
        assert!(image.samples.chunks(4).all(|px| px[3] == 0xFF));
    }

    #[test]
    fn invalid_quality_is_rejected_before_work() {
        let config = EncodeConfig {
            quality: 99,
            ..EncodeConfig::default()
        };
        assert!(matches!(
            encode_with_config(b"x", &config),
            Err(CodecError::InvalidConfig(_))
        ));
    }

    #[test]
    fn explicit_compressor_checks_its_own_range() {
        let config = EncodeConfig {
            quality: 19,
            ..EncodeConfig::default()
        };
        let encoder = Encoder::with_compressor(crate::compress::Zstd, config);
        let encoded = encoder.encode(b"zstd payload").unwrap();
        assert_eq!(encoded.artifacts.len(), 1);
    }
}
