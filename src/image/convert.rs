use super::*;

pub const DARK_LEVEL: u8 = 0x00;
pub const LIGHT_LEVEL: u8 = 0xff;

// one byte per pixel, rows without padding
pub fn unpack_mono(image: &PackedBitmap) -> Result<Vec<u8>> {
    if image.format() != PackedFormat::Mono1Bpp {
        return Err(Error::InvalidArgument(format!(
            "cannot unpack {:?} as monochrome", image.format())));
    }

    let mut unpacked = Vec::with_capacity(image.width() as usize * image.height() as usize);
    for y in 0..image.height() {
        let row = image.row(y);
        unpacked.extend((0..image.width()).map(|x| {
            if row[(x / 8) as usize] & bit_mask(x) != 0 {
                DARK_LEVEL
            } else {
                LIGHT_LEVEL
            }
        }));
    }

    return Ok(unpacked);
}
