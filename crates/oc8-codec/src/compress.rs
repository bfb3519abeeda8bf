use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{CodecError, Result};

/// Default compression quality (brotli, the default compressor).
pub const DEFAULT_QUALITY: i32 = BROTLI_DEFAULT_QUALITY;

/// Accepted qualities for the default compressor.
pub const QUALITY_RANGE: RangeInclusive<i32> = BROTLI_QUALITY_RANGE;

pub const BROTLI_DEFAULT_QUALITY: i32 = 11;
pub const BROTLI_QUALITY_RANGE: RangeInclusive<i32> = 0..=11;

/// Window size (log2) used when compressing; matches zlib's brotli default.
pub const BROTLI_LGWIN: i32 = 22;

pub const ZSTD_DEFAULT_QUALITY: i32 = 19;
pub const ZSTD_QUALITY_RANGE: RangeInclusive<i32> = 1..=22;

/// Byte-stream compressor wrapped by every frame payload.
pub trait Compressor {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// Quality used when the caller does not pick one.
    fn default_quality(&self) -> i32;

    /// Qualities `compress` accepts.
    fn quality_range(&self) -> RangeInclusive<i32>;

    /// Compress `data` at `quality`.
    fn compress(&self, data: &[u8], quality: i32) -> Result<Vec<u8>>;

    /// Decompress `data`, failing on anything that is not a complete stream.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Brotli compressor, the format OC8 producers have always written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brotli;

impl Compressor for Brotli {
    fn name(&self) -> &'static str {
        "brotli"
    }

    fn default_quality(&self) -> i32 {
        BROTLI_DEFAULT_QUALITY
    }

    fn quality_range(&self) -> RangeInclusive<i32> {
        BROTLI_QUALITY_RANGE
    }

    fn compress(&self, data: &[u8], quality: i32) -> Result<Vec<u8>> {
        let params = brotli::enc::BrotliEncoderParams {
            quality,
            lgwin: BROTLI_LGWIN,
            ..Default::default()
        };
        let mut out = Vec::with_capacity(data.len() / 2 + 16);
        let mut input = data;
        brotli::BrotliCompress(&mut input, &mut out, &params).map_err(CodecError::Compress)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        // Brotli never emits an empty stream; even empty input encodes to one byte.
        if data.is_empty() {
            return Err(CodecError::Decompress("empty compressed stream".into()));
        }
        let mut out = Vec::new();
        let mut input = data;
        brotli::BrotliDecompress(&mut input, &mut out)
            .map_err(|err| CodecError::Decompress(err.to_string()))?;
        Ok(out)
    }
}

/// Zstandard compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zstd;

impl Compressor for Zstd {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn default_quality(&self) -> i32 {
        ZSTD_DEFAULT_QUALITY
    }

    fn quality_range(&self) -> RangeInclusive<i32> {
        ZSTD_QUALITY_RANGE
    }

    fn compress(&self, data: &[u8], quality: i32) -> Result<Vec<u8>> {
        zstd::bulk::compress(data, quality).map_err(CodecError::Compress)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        // Zstd emits at least a frame header, even for empty input.
        if data.is_empty() {
            return Err(CodecError::Decompress("empty compressed stream".into()));
        }
        zstd::stream::decode_all(data).map_err(|err| CodecError::Decompress(err.to_string()))
    }
}

/// Runtime choice of compressor, for configs and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressorKind {
    #[default]
    Brotli,
    Zstd,
}

impl CompressorKind {
    pub const ALL: [CompressorKind; 2] = [CompressorKind::Brotli, CompressorKind::Zstd];

    pub fn as_str(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for CompressorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Compressor for CompressorKind {
    fn name(&self) -> &'static str {
        match self {
            CompressorKind::Brotli => Brotli.name(),
            CompressorKind::Zstd => Zstd.name(),
        }
    }

    fn default_quality(&self) -> i32 {
        match self {
            CompressorKind::Brotli => Brotli.default_quality(),
            CompressorKind::Zstd => Zstd.default_quality(),
        }
    }

    fn quality_range(&self) -> RangeInclusive<i32> {
        match self {
            CompressorKind::Brotli => Brotli.quality_range(),
            CompressorKind::Zstd => Zstd.quality_range(),
        }
    }

    fn compress(&self, data: &[u8], quality: i32) -> Result<Vec<u8>> {
        match self {
            CompressorKind::Brotli => Brotli.compress(data, quality),
            CompressorKind::Zstd => Zstd.compress(data, quality),
        }
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            CompressorKind::Brotli => Brotli.decompress(data),
            CompressorKind::Zstd => Zstd.decompress(data),
        }
    }
}
