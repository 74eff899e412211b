use crate::error::{Error, Result};
use crate::image::*;

/// Clockwise rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    NoRotation,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::NoRotation => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    pub fn rotated_size(&self, size: Size) -> Size {
        match self {
            Rotation::NoRotation | Rotation::Rotate180 => size,
            Rotation::Rotate90 | Rotation::Rotate270 => (size.height, size.width).into(),
        }
    }

    // where the source pixel (x, y) of an image of `size` lands
    fn transform(&self, x: u32, y: u32, size: Size) -> (u32, u32) {
        match self {
            Rotation::NoRotation => (x, y),
            Rotation::Rotate90 => (size.height - 1 - y, x),
            Rotation::Rotate180 => (size.width - 1 - x, size.height - 1 - y),
            Rotation::Rotate270 => (y, size.width - 1 - x),
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = Error;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::NoRotation),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            _ => Err(Error::InvalidArgument(format!(
                "invalid rotation {}, expected 0, 90, 180 or 270", degrees))),
        }
    }
}

/// Consumes `input`; with `NoRotation` it is handed back untouched.
pub fn rotate(input: PackedBitmap, rotation: Rotation) -> Result<PackedBitmap> {
    if rotation == Rotation::NoRotation {
        return Ok(input);
    }

    let output_size = rotation.rotated_size(input.size());
    let mut output = PackedBitmap::new(input.format(), output_size.width, output_size.height)?;

    match input.format() {
        PackedFormat::Mono1Bpp => rotate_bits(&input, &mut output, rotation),
        PackedFormat::Bytes(n) => rotate_bytes(&input, &mut output, rotation, n as usize),
    }

    return Ok(output);
}

fn rotate_bits(input: &PackedBitmap, output: &mut PackedBitmap, rotation: Rotation) {
    let input_size = input.size();
    for ry in 0..input_size.height {
        let input_row = input.row(ry);
        for rx in 0..input_size.width {
            let (wx, wy) = rotation.transform(rx, ry, input_size);
            let dark = (input_row[(rx / 8) as usize] & bit_mask(rx)) != 0;
            output.set_pixel(wx, wy, dark);
        }
    }
}

fn rotate_bytes(input: &PackedBitmap, output: &mut PackedBitmap, rotation: Rotation, bytes_per_pixel: usize) {
    let input_size = input.size();
    for ry in 0..input_size.height {
        let input_row = input.row(ry);
        for rx in 0..input_size.width {
            let (wx, wy) = rotation.transform(rx, ry, input_size);
            let src = rx as usize * bytes_per_pixel;
            let dst = wx as usize * bytes_per_pixel;
            output.row_mut(wy)[dst..dst + bytes_per_pixel]
                .copy_from_slice(&input_row[src..src + bytes_per_pixel]);
        }
    }
}
