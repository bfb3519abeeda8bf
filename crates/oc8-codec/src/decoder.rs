use std::fmt;

use bytes::Bytes;
use oc8_frame::{Endianness, Frame, FrameHeader, FrameScanner};
use oc8_raster::{extend_texel_bytes, ChannelMode, RasterImage};
use tracing::{debug, info, warn};

use crate::compress::{Compressor, CompressorKind};
use crate::config::DecodeConfig;
use crate::error::{CodecError, Result, SearchReport, StrategyReport};

/// Order in which images are concatenated into one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamOrder {
    AsGiven,
    Reversed,
}

impl StreamOrder {
    /// Search order: the given order first.
    pub const ALL: [StreamOrder; 2] = [StreamOrder::AsGiven, StreamOrder::Reversed];

    pub fn as_str(self) -> &'static str {
        match self {
            StreamOrder::AsGiven => "as-given",
            StreamOrder::Reversed => "reversed",
        }
    }
}

impl fmt::Display for StreamOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assumptions under which a frame validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub order: StreamOrder,
    pub mode: ChannelMode,
    pub offset: usize,
    pub endianness: Endianness,
}

impl Candidate {
    /// True for the layout the encoder writes.
    pub fn is_canonical(&self) -> bool {
        self.order == StreamOrder::AsGiven
            && self.mode == ChannelMode::Opaque3
            && self.offset == 0
            && self.endianness == Endianness::Big
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order={} mode={} offset={} endianness={}",
            self.order, self.mode, self.offset, self.endianness
        )
    }
}

/// A successfully recovered payload.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub candidate: Candidate,
    pub header: FrameHeader,
    /// Length of the texel stream the frame was found in.
    pub stream_len: usize,
}

/// Concatenate the data bytes of `images` under `order` and `mode`.
pub fn build_stream(images: &[RasterImage], order: StreamOrder, mode: ChannelMode) -> Bytes {
    let capacity = images.iter().map(|image| image.samples.len()).sum();
    let mut stream = Vec::with_capacity(capacity);
    match order {
        StreamOrder::AsGiven => {
            for image in images {
                extend_texel_bytes(&mut stream, &image.samples, mode);
            }
        }
        StreamOrder::Reversed => {
            for image in images.iter().rev() {
                extend_texel_bytes(&mut stream, &image.samples, mode);
            }
        }
    }
    Bytes::from(stream)
}

/// Recovers frames from image sets of unknown order, channel layout and header position.
pub struct Decoder<C = CompressorKind> {
    compressor: C,
    config: DecodeConfig,
}

impl Decoder<CompressorKind> {
    /// Create a decoder using the compressor named in `config`.
    pub fn new(config: DecodeConfig) -> Self {
        Self::with_compressor(config.compressor, config)
    }
}

impl Default for Decoder<CompressorKind> {
    fn default() -> Self {
        Self::new(DecodeConfig::default())
    }
}

impl<C: Compressor> Decoder<C> {
    pub fn with_compressor(compressor: C, config: DecodeConfig) -> Self {
        Self { compressor, config }
    }

    /// Search `images` for a frame whose checksum and decompression both succeed.
    ///
    /// Candidates are tried order-major, then mode, then offset, then byte
    /// order; the first success is returned and nothing after it is tried.
    pub fn decode(&self, images: &[RasterImage]) -> Result<Decoded> {
        self.config.validate()?;
        if images.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let (orders, modes) = if self.config.strict {
            (&[StreamOrder::AsGiven][..], &[ChannelMode::Opaque3][..])
        } else {
            (&self.config.orders[..], &self.config.modes[..])
        };

        let mut strategies = Vec::new();
        for &order in orders {
            if order == StreamOrder::Reversed && images.len() == 1 {
                continue;
            }
            for &mode in modes {
                let stream = build_stream(images, order, mode);
                let scanner = FrameScanner::new(&stream, &self.config.frame);
                let accept = |frame: &Frame| self.compressor.decompress(&frame.compressed);
                let result = if self.config.strict {
                    scanner.scan_canonical(accept)
                } else {
                    scanner.scan(accept)
                };

                match result {
                    Ok(hit) => {
                        let candidate = Candidate {
                            order,
                            mode,
                            offset: hit.frame.offset,
                            endianness: hit.frame.endianness,
                        };
                        if !candidate.is_canonical() {
                            warn!(%candidate, "recovered frame from non-canonical layout");
                        }
                        info!(
                            %candidate,
                            compressor = self.compressor.name(),
                            compressed = hit.frame.compressed.len(),
                            decoded = hit.value.len(),
                            "frame decoded"
                        );
                        return Ok(Decoded {
                            data: hit.value,
                            candidate,
                            header: hit.frame.header,
                            stream_len: stream.len(),
                        });
                    }
                    Err(scan) => {
                        debug!(%order, %mode, report = %scan, "strategy exhausted");
                        strategies.push(StrategyReport { order, mode, scan });
                    }
                }
            }
        }

        Err(CodecError::Exhausted(SearchReport {
            images: images.len(),
            strategies,
        }))
    }
}

/// Decode with the default compressor and configuration.
pub fn decode(images: &[RasterImage]) -> Result<Decoded> {
    Decoder::default().decode(images)
}

/// Decode with an explicit configuration.
pub fn decode_with_config(images: &[RasterImage], config: &DecodeConfig) -> Result<Decoded> {
    Decoder::new(config.clone()).decode(images)
}
