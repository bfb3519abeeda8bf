use png::{BitDepth, ColorType, Transformations};

use crate::error::{RasterError, Result};
use crate::image::RasterImage;

/// Deflate effort used when writing PNG artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    #[default]
    Fast,
    Balanced,
    Best,
}

impl From<PngCompression> for png::Compression {
    fn from(level: PngCompression) -> Self {
        match level {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Balanced => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

fn color_type(channels: u8) -> Option<ColorType> {
    match channels {
        1 => Some(ColorType::Grayscale),
        2 => Some(ColorType::GrayscaleAlpha),
        3 => Some(ColorType::Rgb),
        4 => Some(ColorType::Rgba),
        _ => None,
    }
}

/// Encode an 8-bit image as PNG.
pub fn encode_png(image: &RasterImage, compression: PngCompression) -> Result<Vec<u8>> {
    let color = color_type(image.channels).ok_or(RasterError::InvalidDimensions {
        width: image.width,
        height: image.height,
        channels: image.channels,
        len: image.samples.len(),
    })?;

    let mut out = Vec::with_capacity(image.samples.len() / 2 + 64);
    {
        let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
        encoder.set_color(color);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(compression.into());
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.samples)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Decode a PNG into 8-bit samples.
///
/// Palette and sub-byte images are expanded; 16-bit images are refused
/// because narrowing them would lose data.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let mut samples = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut samples)?;
    if info.bit_depth != BitDepth::Eight {
        return Err(RasterError::UnsupportedBitDepth(info.bit_depth as u8));
    }
    samples.truncate(info.buffer_size());

    RasterImage::new(
        info.width,
        info.height,
        info.color_type.samples() as u8,
        samples,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u8) -> RasterImage {
        let len = width as usize * height as usize * channels as usize;
        let samples = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        RasterImage::new(width, height, channels, samples).unwrap()
    }

    #[test]
    fn rgb_roundtrip_is_lossless() {
        let image = gradient(17, 9, 3);
        let png = encode_png(&image, PngCompression::Fast).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(decode_png(&png).unwrap(), image);
    }

    #[test]
    fn rgba_roundtrip_keeps_alpha() {
        let image = gradient(5, 5, 4);
        let png = encode_png(&image, PngCompression::Best).unwrap();
        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.samples, image.samples);
    }

    #[test]
    fn sixteen_bit_is_rejected() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 1, 2, 3]).unwrap();
        }
        assert!(matches!(
            decode_png(&out),
            Err(RasterError::UnsupportedBitDepth(16))
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            decode_png(b"definitely not a png"),
            Err(RasterError::PngDecode(_))
        ));
    }
}
