use std::fmt;
use std::path::PathBuf;

use oc8_frame::ScanReport;
use oc8_raster::ChannelMode;

use crate::decoder::StreamOrder;

/// Errors that can occur while encoding or decoding OC8 artifacts.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] oc8_frame::FrameError),

    /// Raster-level error.
    #[error("raster error: {0}")]
    Raster(#[from] oc8_raster::RasterError),

    /// The compressor refused the input.
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),

    /// The payload is not a valid compressed stream.
    #[error("decompression failed: {0}")]
    Decompress(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The artifact pattern matched no files.
    #[error("no artifacts match pattern: {0}")]
    NoArtifacts(String),

    /// Decode was called with an empty image set.
    #[error("no images to decode")]
    EmptyInput,

    /// Every candidate in the search space was rejected.
    #[error("{0}")]
    Exhausted(SearchReport),

    /// Failed to read an input or write an output file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Scan outcome for one (order, mode) stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyReport {
    pub order: StreamOrder,
    pub mode: ChannelMode,
    pub scan: ScanReport,
}

/// Why a decode search found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Number of images in the search input.
    pub images: usize,
    /// One entry per stream scanned, in search order.
    pub strategies: Vec<StrategyReport>,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no valid frame found in {} image(s) after {} strategies",
            self.images,
            self.strategies.len()
        )?;
        for strategy in &self.strategies {
            write!(
                f,
                "\n  {}/{}: {}",
                strategy.order, strategy.mode, strategy.scan
            )?;
        }
        Ok(())
    }
}
