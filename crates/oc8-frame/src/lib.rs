//! Frame layer of the OC8 image transport codec.
//!
//! Every transported file becomes one frame:
//! - A 16-byte header (total length, payload length, flags, reserved)
//! - The compressed bytes
//! - A trailing CRC-8 over the compressed bytes
//!
//! [`FrameScanner`] recovers frames from streams whose header position and
//! byte order are unknown.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod scanner;

pub use checksum::{checksum8, checksum8_with, DEFAULT_INITIAL, DEFAULT_POLYNOMIAL};
pub use codec::{
    build_frame, encode_frame, parse_frame_at, Endianness, Frame, FrameConfig, FrameHeader,
    CHECKSUM_SIZE, DEFAULT_MAX_PAYLOAD, DEFAULT_MAX_SCAN_OFFSET, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use scanner::{FrameScanner, Rejection, ScanHit, ScanReport};
