//! Raster layer of the OC8 image transport codec.
//!
//! Maps a flat byte stream onto pixel channels and back:
//! - Texel packing in 3-channel (opaque) or 4-channel (alpha ignored) layouts
//! - Near-square image layout bounded by width and per-image byte budget
//! - Lossless PNG encoding/decoding (8-bit only)
//! - Artifact naming (`<prefix>_partNN.png`) and glob discovery

pub mod artifact;
pub mod codec;
pub mod error;
pub mod image;
pub mod layout;
pub mod texel;

pub use artifact::{
    artifact_path, artifact_suffix, read_artifact, read_artifacts, resolve_glob, write_artifact,
    ARTIFACT_EXTENSION,
};
pub use codec::{decode_png, encode_png, PngCompression};
pub use error::{RasterError, Result};
pub use image::RasterImage;
pub use layout::{
    chunk_into_images, ImageLayout, RasterConfig, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_WIDTH,
};
pub use texel::{
    extend_texel_bytes, extract_texel_bytes, pack_to_texel_stream, texels_to_samples, ChannelMode,
    OPAQUE_ALPHA, TEXEL_BYTES,
};
