use std::path::Path;

use anyhow::Context;
use log::debug;
use png::{BitDepth, ColorType, Transformations};

use crate::error::Error;
use crate::image::*;

/// Samples as the PNG stores them: 1-bit rows packed MSB-first with 1 = light,
/// 16-bit samples big-endian. Paletted images arrive expanded to RGB/RGBA.
pub struct DecodedImage {
    format: SampleFormat,
    size: Size,
    pitch: usize,
    data: Vec<u8>,
}

impl DecodedImage {
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> crate::Result<PixelBuffer<'_>> {
        PixelBuffer::new(self.format, &self.data, self.size.width, self.size.height, Some(self.pitch))
    }
}

pub fn read_png(path: &Path) -> anyhow::Result<DecodedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Could not open \"{}\"", path.display()))?;
    decode_png(&bytes)
        .with_context(|| format!("Cannot decode \"{}\"", path.display()))
}

pub fn decode_png(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let header = png::Decoder::new(bytes)
        .read_info()
        .context("Not a valid PNG file")?
        .info()
        .color_type;

    // gray rows stay bit-packed, only palette indices are resolved
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(match header {
        ColorType::Indexed => Transformations::EXPAND,
        _ => Transformations::IDENTITY,
    });
    let mut reader = decoder.read_info().context("Not a valid PNG file")?;

    let (color_type, bit_depth) = reader.output_color_type();
    let format = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => SampleFormat::new(1, ChannelLayout::Mono),
        (ColorType::Rgb, BitDepth::Eight) => SampleFormat::new(8, ChannelLayout::Rgb),
        (ColorType::Rgba, BitDepth::Eight) => SampleFormat::new(8, ChannelLayout::Rgba),
        (ColorType::Grayscale, BitDepth::Sixteen) => SampleFormat::new(16, ChannelLayout::Mono),
        (ColorType::Rgb, BitDepth::Sixteen) => SampleFormat::new(16, ChannelLayout::Rgb),
        (ColorType::Rgba, BitDepth::Sixteen) => SampleFormat::new(16, ChannelLayout::Rgba),
        (color_type, bit_depth) => {
            return Err(Error::UnsupportedFormat(format!(
                "depth={} type={:?}", bit_depth as u8, color_type)).into())
        }
    };

    let mut data = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data).context("Error during png read")?;
    data.truncate(frame.buffer_size());
    debug!("PNG {}x{}, {:?} {:?} as {:?}, {} bytes per row",
           frame.width, frame.height, header, bit_depth, format, frame.line_size);

    Ok(DecodedImage {
        format,
        size: (frame.width, frame.height).into(),
        pitch: frame.line_size,
        data,
    })
}
