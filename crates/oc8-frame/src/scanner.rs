use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::codec::{parse_frame_at, Endianness, Frame, FrameConfig, HEADER_SIZE};
use crate::error::FrameError;

/// Why a single (offset, endianness) candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rejection {
    StreamTooShort,
    PayloadLengthOutOfBounds,
    Truncated,
    ChecksumMismatch,
    /// The checksum matched but the payload consumer refused it.
    Decompress,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::StreamTooShort => "stream too short",
            Rejection::PayloadLengthOutOfBounds => "payload length out of bounds",
            Rejection::Truncated => "payload truncated",
            Rejection::ChecksumMismatch => "checksum mismatch",
            Rejection::Decompress => "decompression failed",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&FrameError> for Rejection {
    fn from(err: &FrameError) -> Self {
        match err {
            FrameError::StreamTooShort { .. } => Rejection::StreamTooShort,
            FrameError::PayloadLengthOutOfBounds { .. } | FrameError::PayloadTooLarge { .. } => {
                Rejection::PayloadLengthOutOfBounds
            }
            FrameError::Truncated { .. } => Rejection::Truncated,
            FrameError::ChecksumMismatch { .. } => Rejection::ChecksumMismatch,
        }
    }
}

/// Aggregated outcome of a scan that found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Length of the scanned stream.
    pub stream_len: usize,
    /// Number of (offset, endianness) candidates evaluated.
    pub attempts: usize,
    /// Distinct rejection reasons with occurrence counts.
    pub rejections: BTreeMap<Rejection, usize>,
    /// Message of the most recent consumer failure, if any.
    pub last_detail: Option<String>,
}

impl ScanReport {
    fn new(stream_len: usize) -> Self {
        Self {
            stream_len,
            ..Self::default()
        }
    }

    fn record(&mut self, rejection: Rejection) {
        self.attempts += 1;
        *self.rejections.entry(rejection).or_insert(0) += 1;
    }

    /// Number of times `rejection` was recorded.
    pub fn count(&self, rejection: Rejection) -> usize {
        self.rejections.get(&rejection).copied().unwrap_or(0)
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes, {} candidates",
            self.stream_len, self.attempts
        )?;
        if self.rejections.is_empty() {
            return Ok(());
        }
        f.write_str(": ")?;
        let mut first = true;
        for (rejection, count) in &self.rejections {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{rejection} x{count}")?;
        }
        if let Some(detail) = &self.last_detail {
            write!(f, " (last: {detail})")?;
        }
        Ok(())
    }
}

/// A frame that passed checksum validation and was accepted by the consumer.
#[derive(Debug, Clone)]
pub struct ScanHit<T> {
    pub frame: Frame,
    pub value: T,
}

/// Searches a byte stream for a valid frame.
///
/// Candidates are visited in a fixed order (offset ascending, big-endian
/// before little-endian) and the first one whose checksum matches and whose
/// payload the consumer accepts wins.
pub struct FrameScanner<'a> {
    buf: &'a Bytes,
    config: &'a FrameConfig,
}

impl<'a> FrameScanner<'a> {
    pub fn new(buf: &'a Bytes, config: &'a FrameConfig) -> Self {
        Self { buf, config }
    }

    /// Highest offset the full scan will try.
    pub fn last_offset(&self) -> usize {
        self.config
            .max_scan_offset
            .min(self.buf.len().saturating_sub(HEADER_SIZE))
    }

    /// Try only the canonical position: offset 0, big-endian.
    pub fn scan_canonical<T, E, F>(&self, mut accept: F) -> Result<ScanHit<T>, ScanReport>
    where
        E: fmt::Display,
        F: FnMut(&Frame) -> Result<T, E>,
    {
        let mut report = ScanReport::new(self.buf.len());
        match self.try_at(0, Endianness::Big, &mut accept, &mut report) {
            Some(hit) => Ok(hit),
            None => Err(report),
        }
    }

    /// Try offset 0, then every offset up to [`Self::last_offset`], each in both byte orders.
    pub fn scan<T, E, F>(&self, mut accept: F) -> Result<ScanHit<T>, ScanReport>
    where
        E: fmt::Display,
        F: FnMut(&Frame) -> Result<T, E>,
    {
        let mut report = ScanReport::new(self.buf.len());
        for offset in 0..=self.last_offset() {
            for endianness in Endianness::ALL {
                if let Some(hit) = self.try_at(offset, endianness, &mut accept, &mut report) {
                    debug!(
                        offset,
                        endianness = endianness.as_str(),
                        attempts = report.attempts,
                        "frame located"
                    );
                    return Ok(hit);
                }
            }
        }
        Err(report)
    }

    fn try_at<T, E, F>(
        &self,
        offset: usize,
        endianness: Endianness,
        accept: &mut F,
        report: &mut ScanReport,
    ) -> Option<ScanHit<T>>
    where
        E: fmt::Display,
        F: FnMut(&Frame) -> Result<T, E>,
    {
        let frame = match parse_frame_at(self.buf, offset, endianness, self.config.max_payload_size)
        {
            Ok(frame) => frame,
            Err(err) => {
                if offset == 0 {
                    trace!(endianness = endianness.as_str(), error = %err, "no frame at stream start");
                }
                report.record(Rejection::from(&err));
                return None;
            }
        };

        match accept(&frame) {
            Ok(value) => {
                report.attempts += 1;
                Some(ScanHit { frame, value })
            }
            Err(err) => {
                debug!(offset, endianness = endianness.as_str(), error = %err, "checksum matched but payload rejected");
                report.record(Rejection::Decompress);
                report.last_detail = Some(err.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::checksum::checksum8;
    use crate::codec::encode_frame;

    fn accept_all(frame: &Frame) -> Result<Vec<u8>, String> {
        Ok(frame.compressed.to_vec())
    }

    #[test]
    fn finds_frame_at_start() {
        let mut wire = BytesMut::new();
        encode_frame(b"hello", &mut wire).unwrap();
        let wire = wire.freeze();
        let config = FrameConfig::default();

        let hit = FrameScanner::new(&wire, &config).scan(accept_all).unwrap();
        assert_eq!(hit.frame.offset, 0);
        assert_eq!(hit.frame.endianness, Endianness::Big);
        assert_eq!(hit.value, b"hello");
    }

    #[test]
    fn finds_frame_after_inert_prefix() {
        let mut wire = BytesMut::new();
        wire.put_slice(&vec![0x5Au8; 1234]);
        encode_frame(b"shifted payload", &mut wire).unwrap();
        wire.put_slice(&[0u8; 3]);
        let wire = wire.freeze();
        let config = FrameConfig::default();

        let scanner = FrameScanner::new(&wire, &config);
        assert!(scanner.scan_canonical(accept_all).is_err());

        let hit = scanner.scan(accept_all).unwrap();
        assert_eq!(hit.frame.offset, 1234);
        assert_eq!(hit.value, b"shifted payload");
    }

    #[test]
    fn finds_little_endian_frame() {
        let mut wire = BytesMut::new();
        wire.put_u32_le(HEADER_SIZE as u32 + 4);
        wire.put_u32_le(4);
        wire.put_slice(&[0u8; 8]);
        wire.put_slice(b"abc");
        wire.put_u8(checksum8(b"abc"));
        let wire = wire.freeze();
        let config = FrameConfig::default();

        let hit = FrameScanner::new(&wire, &config).scan(accept_all).unwrap();
        assert_eq!(hit.frame.endianness, Endianness::Little);
        assert_eq!(hit.value, b"abc");
    }

    #[test]
    fn consumer_rejection_moves_to_next_candidate() {
        let mut wire = BytesMut::new();
        encode_frame(b"decoy", &mut wire).unwrap();
        encode_frame(b"real", &mut wire).unwrap();
        let wire = wire.freeze();
        let config = FrameConfig::default();

        let hit = FrameScanner::new(&wire, &config)
            .scan(|frame: &Frame| {
                if frame.compressed.as_ref() == b"real" {
                    Ok(())
                } else {
                    Err("not it")
                }
            })
            .unwrap();
        assert_eq!(hit.frame.offset, HEADER_SIZE + 6);
    }

    #[test]
    fn respects_max_scan_offset() {
        let mut wire = BytesMut::new();
        wire.put_slice(&[0xFFu8; 100]);
        encode_frame(b"late", &mut wire).unwrap();
        let wire = wire.freeze();
        let config = FrameConfig {
            max_scan_offset: 99,
            ..FrameConfig::default()
        };

        let report = FrameScanner::new(&wire, &config)
            .scan(accept_all)
            .unwrap_err();
        assert_eq!(report.attempts, 200);
    }

    #[test]
    fn report_aggregates_reasons() {
        let wire = Bytes::from_static(b"tiny");
        let config = FrameConfig::default();

        let report = FrameScanner::new(&wire, &config)
            .scan(accept_all)
            .unwrap_err();
        assert_eq!(report.stream_len, 4);
        assert_eq!(report.count(Rejection::StreamTooShort), 2);
        assert!(report.to_string().contains("stream too short x2"));
    }

    #[test]
    fn report_keeps_last_consumer_error() {
        let mut wire = BytesMut::new();
        encode_frame(b"junk", &mut wire).unwrap();
        let wire = wire.freeze();
        let config = FrameConfig::default();

        let report = FrameScanner::new(&wire, &config)
            .scan_canonical(|_: &Frame| Err::<(), _>("corrupt stream"))
            .unwrap_err();
        assert_eq!(report.count(Rejection::Decompress), 1);
        assert_eq!(report.last_detail.as_deref(), Some("corrupt stream"));
    }
}
