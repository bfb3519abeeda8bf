/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Fewer than a full header's worth of bytes at the requested offset.
    #[error("stream too short for frame header at offset {offset} ({available} bytes available)")]
    StreamTooShort { offset: usize, available: usize },

    /// The declared payload length is zero or above the configured cap.
    #[error("payload length {len} out of bounds (1..={max})")]
    PayloadLengthOutOfBounds { len: usize, max: usize },

    /// The declared payload extends past the end of the buffer.
    #[error("payload truncated ({needed} bytes declared, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// The trailing checksum byte does not match the compressed bytes.
    #[error("checksum mismatch (expected {expected:#04x}, found {found:#04x})")]
    ChecksumMismatch { expected: u8, found: u8 },

    /// The payload cannot be described by a 32-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
