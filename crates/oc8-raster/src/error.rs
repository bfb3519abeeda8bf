use std::path::PathBuf;

/// Errors that can occur while packing, encoding or loading raster artifacts.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// A chunk would hold no pixels.
    #[error("cannot lay out an image with zero pixels")]
    EmptyChunk,

    /// Sample buffer does not match the declared geometry.
    #[error("invalid image geometry {width}x{height}x{channels} for {len} sample bytes")]
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: u8,
        len: usize,
    },

    /// The image is wider or taller than the PNG format allows.
    #[error("image dimension {0} exceeds the PNG limit")]
    TooLarge(usize),

    /// Only 8-bit samples survive the round trip losslessly.
    #[error("unsupported bit depth {0} (only 8-bit images are accepted)")]
    UnsupportedBitDepth(u8),

    /// PNG encoding failed.
    #[error("png encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    /// PNG decoding failed.
    #[error("png decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// A specific artifact could not be loaded.
    #[error("{}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: Box<RasterError>,
    },

    /// The artifact glob pattern is malformed.
    #[error("invalid artifact pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Failed to read or write an artifact file.
    #[error("artifact I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RasterError>;
