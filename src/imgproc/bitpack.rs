use crate::error::{Error, Result};
use crate::image::*;

/// How 8-bit color samples are packed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PackMode {
    /// One bit per pixel, dark only for pure black.
    #[default]
    Binarize,
    /// Keep every channel byte.
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackStrategy {
    Mono,
    Classify { bytes_per_pixel: usize },
    Raw { bytes_per_pixel: usize },
}

impl PackStrategy {
    pub fn select(format: SampleFormat, mode: PackMode) -> Result<Self> {
        use ChannelLayout::*;
        let bytes_per_pixel = (format.bpp() / 8) as usize;
        match (format.bit_depth, format.layout, mode) {
            (1, Mono, _) => Ok(Self::Mono),
            (8, Rgb | Rgba, PackMode::Binarize) => Ok(Self::Classify { bytes_per_pixel }),
            (8, Rgb | Rgba, PackMode::Raw) | (16, _, _) => Ok(Self::Raw { bytes_per_pixel }),
            (depth, layout, _) => Err(Error::UnsupportedFormat(format!(
                "depth={} layout={:?}", depth, layout))),
        }
    }
}

pub fn pack(image: &PixelBuffer, mode: PackMode) -> Result<PackedBitmap> {
    match PackStrategy::select(image.format(), mode)? {
        PackStrategy::Mono => pack_mono(image),
        PackStrategy::Classify { bytes_per_pixel } => pack_classify(image, bytes_per_pixel),
        PackStrategy::Raw { bytes_per_pixel } => pack_raw(image, bytes_per_pixel),
    }
}

// decoder bits are 1 = light, ours are 1 = dark
fn pack_mono(image: &PixelBuffer) -> Result<PackedBitmap> {
    let mut packed = PackedBitmap::new(PackedFormat::Mono1Bpp, image.width(), image.height())?;
    let mask = last_byte_mask(image.width());

    for y in 0..image.height() {
        let row = image.row(y);
        let packed_row = packed.row_mut(y);
        for (dst, src) in packed_row.iter_mut().zip(row) {
            *dst = !*src;
        }
        if let Some(last) = packed_row.last_mut() {
            *last &= mask;
        }
    }

    return Ok(packed);
}

fn pack_classify(image: &PixelBuffer, bytes_per_pixel: usize) -> Result<PackedBitmap> {
    let mut packed = PackedBitmap::new(PackedFormat::Mono1Bpp, image.width(), image.height())?;

    for y in 0..image.height() {
        let row = image.row(y);
        let packed_row = packed.row_mut(y);
        for (x, pixel) in row.chunks_exact(bytes_per_pixel).enumerate() {
            // alpha, if any, does not take part
            if pixel[..3] == [0, 0, 0] {
                packed_row[x / 8] |= bit_mask(x as u32);
            }
        }
    }

    return Ok(packed);
}

fn pack_raw(image: &PixelBuffer, bytes_per_pixel: usize) -> Result<PackedBitmap> {
    let mut packed = PackedBitmap::new(
        PackedFormat::Bytes(bytes_per_pixel as u8), image.width(), image.height())?;

    for y in 0..image.height() {
        let row = image.row(y);
        let packed_row = packed.row_mut(y);
        for (dst, src) in packed_row
            .chunks_exact_mut(bytes_per_pixel)
            .zip(row.chunks_exact(bytes_per_pixel))
        {
            dst.copy_from_slice(src);
        }
    }

    return Ok(packed);
}
