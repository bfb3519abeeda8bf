//! Encode arbitrary files into lossless PNG artifacts and recover them.
//!
//! Encoding compresses the input, wraps it in a checksummed frame and packs
//! the frame into one or more images. Decoding searches the image set for a
//! valid frame under every supported concatenation order, channel layout,
//! header offset and header byte order, so artifacts that were reordered or
//! re-saved with an alpha channel still decode.

pub mod compress;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod files;

pub use compress::{
    Brotli, Compressor, CompressorKind, Zstd, BROTLI_DEFAULT_QUALITY, BROTLI_QUALITY_RANGE,
    DEFAULT_QUALITY, QUALITY_RANGE, ZSTD_DEFAULT_QUALITY, ZSTD_QUALITY_RANGE,
};
pub use config::{DecodeConfig, EncodeConfig};
pub use decoder::{
    build_stream, decode, decode_with_config, Candidate, Decoded, Decoder, StreamOrder,
};
pub use encoder::{encode, encode_with_config, Artifact, Encoded, Encoder};
pub use error::{CodecError, Result, SearchReport, StrategyReport};
pub use files::{decode_files, decode_glob, encode_file, EncodedFiles};
