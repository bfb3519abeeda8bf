//! Carry arbitrary files through lossless PNG images.
//!
//! A file is compressed, wrapped in a checksummed frame and packed into the
//! pixel channels of one or more PNG artifacts. Decoding tolerates reordered
//! artifacts, an added alpha channel and a displaced frame header.
//!
//! # Crate Structure
//!
//! - [`frame`]: Frame header, CRC-8 checksum and the offset/endianness scanner
//! - [`raster`]: Texel packing, image layout, PNG I/O and artifact naming
//! - [`codec`]: Encode/decode orchestration and the compressor seam

/// Re-export frame types.
pub mod frame {
    pub use oc8_frame::*;
}

/// Re-export raster types.
pub mod raster {
    pub use oc8_raster::*;
}

/// Re-export codec types.
pub mod codec {
    pub use oc8_codec::*;
}

pub use oc8_codec::{decode_glob, encode_file, DecodeConfig, EncodeConfig};
