use std::fmt;

/// Data bytes carried by one texel, whatever the channel mode.
pub const TEXEL_BYTES: usize = 3;

/// Alpha value written into padding channels of 4-channel artifacts.
pub const OPAQUE_ALPHA: u8 = 0xFF;

/// How data bytes map onto pixel channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Three data channels per pixel.
    Opaque3,
    /// Four channels per pixel, the fourth (alpha) carries no data.
    AlphaStripped4,
}

impl ChannelMode {
    /// Default search order.
    pub const ALL: [ChannelMode; 2] = [ChannelMode::Opaque3, ChannelMode::AlphaStripped4];

    /// Channels per pixel of an artifact written in this mode.
    pub fn channels(self) -> u8 {
        match self {
            ChannelMode::Opaque3 => 3,
            ChannelMode::AlphaStripped4 => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelMode::Opaque3 => "opaque3",
            ChannelMode::AlphaStripped4 => "alpha4",
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-pad `flat` to a whole number of texels.
pub fn pack_to_texel_stream(flat: &[u8]) -> Vec<u8> {
    let padded = flat.len().div_ceil(TEXEL_BYTES) * TEXEL_BYTES;
    let mut texels = Vec::with_capacity(padded);
    texels.extend_from_slice(flat);
    texels.resize(padded, 0);
    texels
}

/// Expand texel bytes into the channel layout of `mode`.
///
/// `texels` must hold a whole number of texels.
pub fn texels_to_samples(texels: &[u8], mode: ChannelMode) -> Vec<u8> {
    match mode {
        ChannelMode::Opaque3 => texels.to_vec(),
        ChannelMode::AlphaStripped4 => {
            let mut samples = Vec::with_capacity(texels.len() / TEXEL_BYTES * 4);
            for texel in texels.chunks_exact(TEXEL_BYTES) {
                samples.extend_from_slice(texel);
                samples.push(OPAQUE_ALPHA);
            }
            samples
        }
    }
}

/// Append the data bytes of `samples` to `dst`, reading them as `mode` texels.
///
/// `Opaque3` takes the samples as they are. `AlphaStripped4` drops every
/// fourth byte; a ragged trailing group keeps its first three bytes when it
/// has them and is discarded otherwise.
pub fn extend_texel_bytes(dst: &mut Vec<u8>, samples: &[u8], mode: ChannelMode) {
    match mode {
        ChannelMode::Opaque3 => dst.extend_from_slice(samples),
        ChannelMode::AlphaStripped4 => {
            dst.reserve(samples.len() / 4 * TEXEL_BYTES + TEXEL_BYTES);
            let groups = samples.chunks_exact(4);
            let tail = groups.remainder();
            for group in groups {
                dst.extend_from_slice(&group[..TEXEL_BYTES]);
            }
            if tail.len() >= TEXEL_BYTES {
                dst.extend_from_slice(&tail[..TEXEL_BYTES]);
            }
        }
    }
}

/// Data bytes of `samples` read as `mode` texels.
pub fn extract_texel_bytes(samples: &[u8], mode: ChannelMode) -> Vec<u8> {
    let mut out = Vec::new();
    extend_texel_bytes(&mut out, samples, mode);
    out
}
