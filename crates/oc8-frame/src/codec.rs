use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum8;
use crate::error::{FrameError, Result};

/// Frame header: total length (4) + payload length (4) + flags (1) + reserved (7) = 16 bytes.
pub const HEADER_SIZE: usize = 16;

/// Size of the trailing checksum inside the payload.
pub const CHECKSUM_SIZE: usize = 1;

/// Default cap on the declared payload length accepted by readers: 200 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 200 * 1024 * 1024;

/// Default upper bound of the header offset scan: 64 KiB.
pub const DEFAULT_MAX_SCAN_OFFSET: usize = 64 * 1024;

const RESERVED: [u8; 7] = [0; 7];

/// Byte order of the two 32-bit length fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Scan order: canonical big-endian first.
    pub const ALL: [Endianness; 2] = [Endianness::Big, Endianness::Little];

    fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::Big => u32::from_be_bytes(bytes),
            Endianness::Little => u32::from_le_bytes(bytes),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Endianness::Big => "big",
            Endianness::Little => "little",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded 16-byte frame header.
///
/// `total_length` is informational only; `payload_length` governs parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub total_length: u32,
    pub payload_length: u32,
    pub flags: u8,
}

impl FrameHeader {
    /// Read a header from `buf` at `offset` using `endianness` for the length fields.
    ///
    /// Reserved bytes are not inspected.
    pub fn read(buf: &[u8], offset: usize, endianness: Endianness) -> Result<Self> {
        let header = offset
            .checked_add(HEADER_SIZE)
            .and_then(|end| buf.get(offset..end))
            .ok_or(FrameError::StreamTooShort {
                offset,
                available: buf.len().saturating_sub(offset),
            })?;

        let total_length = endianness.read_u32([header[0], header[1], header[2], header[3]]);
        let payload_length = endianness.read_u32([header[4], header[5], header[6], header[7]]);

        Ok(Self {
            total_length,
            payload_length,
            flags: header[8],
        })
    }
}

/// A validated frame located inside a larger stream.
#[derive(Debug, Clone)]
pub struct Frame {
    pub header: FrameHeader,
    /// Byte offset of the header inside the scanned stream.
    pub offset: usize,
    pub endianness: Endianness,
    /// Compressed bytes (payload without the checksum byte).
    pub compressed: Bytes,
    pub checksum: u8,
}

impl Frame {
    /// The wire size of this frame as actually parsed (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.header.payload_length as usize
    }
}

/// Encode a frame around `compressed` into the canonical big-endian wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────────┬───────┬──────────────┬────────────────┬──────────┐
/// │ Total length │ Payload len  │ Flags │ Reserved     │ Compressed     │ CRC-8    │
/// │ (4B BE)      │ (4B BE)      │ (1B)  │ (7B, zero)   │ (len - 1 B)    │ (1B)     │
/// └──────────────┴──────────────┴───────┴──────────────┴────────────────┴──────────┘
/// ```
pub fn encode_frame(compressed: &[u8], dst: &mut BytesMut) -> Result<()> {
    let payload_len = compressed.len() + CHECKSUM_SIZE;
    let max = u32::MAX as usize - HEADER_SIZE;
    if payload_len > max {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max,
        });
    }

    dst.reserve(HEADER_SIZE + payload_len);
    dst.put_u32((HEADER_SIZE + payload_len) as u32);
    dst.put_u32(payload_len as u32);
    dst.put_u8(0);
    dst.put_slice(&RESERVED);
    dst.put_slice(compressed);
    dst.put_u8(checksum8(compressed));
    Ok(())
}

/// Build a complete frame around `compressed`.
pub fn build_frame(compressed: &[u8]) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    encode_frame(compressed, &mut buf)?;
    Ok(buf.freeze())
}

/// Parse and checksum-validate a frame at `offset`.
///
/// Does not decompress. Trailing bytes after the payload are ignored.
pub fn parse_frame_at(
    buf: &Bytes,
    offset: usize,
    endianness: Endianness,
    max_payload: usize,
) -> Result<Frame> {
    let header = FrameHeader::read(buf, offset, endianness)?;

    let payload_len = header.payload_length as usize;
    if payload_len < CHECKSUM_SIZE || payload_len > max_payload {
        return Err(FrameError::PayloadLengthOutOfBounds {
            len: payload_len,
            max: max_payload,
        });
    }

    let start = offset + HEADER_SIZE;
    let available = buf.len() - start;
    if payload_len > available {
        return Err(FrameError::Truncated {
            needed: payload_len,
            available,
        });
    }

    let checksum_at = start + payload_len - CHECKSUM_SIZE;
    let compressed = buf.slice(start..checksum_at);
    let found = buf[checksum_at];
    let expected = checksum8(&compressed);
    if expected != found {
        return Err(FrameError::ChecksumMismatch { expected, found });
    }

    Ok(Frame {
        header,
        offset,
        endianness,
        compressed,
        checksum: found,
    })
}

/// Configuration for frame parsing and scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum declared payload length accepted. Default: 200 MiB.
    pub max_payload_size: usize,
    /// Highest header offset tried by the scanner. Default: 64 KiB.
    pub max_scan_offset: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_scan_offset: DEFAULT_MAX_SCAN_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(compressed: &[u8]) -> Bytes {
        build_frame(compressed).unwrap()
    }

    #[test]
    fn test_build_layout() {
        let frame = framed(b"abc");

        assert_eq!(frame.len(), HEADER_SIZE + 4);
        assert_eq!(&frame[0..4], &20u32.to_be_bytes());
        assert_eq!(&frame[4..8], &4u32.to_be_bytes());
        assert_eq!(frame[8], 0);
        assert_eq!(&frame[9..16], &[0u8; 7]);
        assert_eq!(&frame[16..19], b"abc");
        assert_eq!(frame[19], checksum8(b"abc"));
    }

    #[test]
    fn test_build_parse_roundtrip() {
        let frame = framed(b"hello, oc8!");
        let parsed = parse_frame_at(&frame, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap();

        assert_eq!(parsed.compressed.as_ref(), b"hello, oc8!");
        assert_eq!(parsed.header.payload_length, 12);
        assert_eq!(parsed.header.total_length, 28);
        assert_eq!(parsed.header.flags, 0);
        assert_eq!(parsed.wire_size(), frame.len());
    }

    #[test]
    fn test_empty_compressed_has_checksum_only() {
        let frame = framed(b"");
        assert_eq!(frame.len(), HEADER_SIZE + 1);

        let parsed = parse_frame_at(&frame, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap();
        assert_eq!(parsed.header.payload_length, 1);
        assert!(parsed.compressed.is_empty());
    }

    #[test]
    fn test_parse_at_offset_with_trailing_padding() {
        let mut buf = BytesMut::new();
        buf.put_slice(&[0xEE; 5]);
        encode_frame(b"payload", &mut buf).unwrap();
        buf.put_slice(&[0u8; 9]);
        let buf = buf.freeze();

        let parsed = parse_frame_at(&buf, 5, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap();
        assert_eq!(parsed.offset, 5);
        assert_eq!(parsed.compressed.as_ref(), b"payload");
    }

    #[test]
    fn test_parse_little_endian_header() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(HEADER_SIZE as u32 + 3);
        buf.put_u32_le(3);
        buf.put_u8(0x7F);
        buf.put_slice(&[0xAA; 7]);
        buf.put_slice(b"xy");
        buf.put_u8(checksum8(b"xy"));
        let buf = buf.freeze();

        assert!(parse_frame_at(&buf, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).is_err());
        let parsed = parse_frame_at(&buf, 0, Endianness::Little, DEFAULT_MAX_PAYLOAD).unwrap();
        assert_eq!(parsed.compressed.as_ref(), b"xy");
        assert_eq!(parsed.header.flags, 0x7F);
    }

    #[test]
    fn test_stream_too_short() {
        let buf = Bytes::from_static(&[0u8; 10]);
        let err = parse_frame_at(&buf, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, FrameError::StreamTooShort { available: 10, .. }));

        let err = parse_frame_at(&buf, 64, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, FrameError::StreamTooShort { available: 0, .. }));
    }

    #[test]
    fn test_zero_payload_length_rejected() {
        let buf = Bytes::from(vec![0u8; 32]);
        let err = parse_frame_at(&buf, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, FrameError::PayloadLengthOutOfBounds { len: 0, .. }));
    }

    #[test]
    fn test_payload_above_cap_rejected() {
        let frame = framed(&[7u8; 64]);
        let err = parse_frame_at(&frame, 0, Endianness::Big, 32).unwrap_err();
        assert!(matches!(err, FrameError::PayloadLengthOutOfBounds { len: 65, max: 32 }));
    }

    #[test]
    fn test_truncated_payload() {
        let frame = framed(b"hello");
        let short = frame.slice(..frame.len() - 2);
        let err = parse_frame_at(&short, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { needed: 6, available: 4 }));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut corrupted = framed(b"hello").to_vec();
        corrupted[HEADER_SIZE + 1] ^= 0x10;
        let corrupted = Bytes::from(corrupted);

        let err = parse_frame_at(&corrupted, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, FrameError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_reserved_bytes_ignored() {
        let mut frame = framed(b"data").to_vec();
        frame[8] = 0x01;
        frame[9..16].copy_from_slice(&[0xFF; 7]);
        let frame = Bytes::from(frame);

        let parsed = parse_frame_at(&frame, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD).unwrap();
        assert_eq!(parsed.header.flags, 0x01);
        assert_eq!(parsed.compressed.as_ref(), b"data");
    }

    proptest::proptest! {
        #[test]
        fn payload_byte_flip_is_rejected(
            compressed in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..300),
            index in proptest::prelude::any::<proptest::sample::Index>(),
            mask in 1u8..=255,
        ) {
            let mut frame = framed(&compressed).to_vec();
            let i = HEADER_SIZE + index.index(compressed.len() + CHECKSUM_SIZE);
            frame[i] ^= mask;
            let frame = Bytes::from(frame);

            let result = parse_frame_at(&frame, 0, Endianness::Big, DEFAULT_MAX_PAYLOAD);
            proptest::prop_assert!(
                matches!(result, Err(FrameError::ChecksumMismatch { .. })),
                "corruption accepted"
            );
        }
    }
}
