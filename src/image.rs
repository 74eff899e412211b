use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Size {
    fn from(value: (u32, u32)) -> Self {
        Size {
            width: value.0,
            height: value.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub fn channels(&self) -> u32 {
        match self {
            Self::Mono => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Layout of the samples handed over by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleFormat {
    pub bit_depth: u8,
    pub layout: ChannelLayout,
}

impl SampleFormat {
    pub fn new(bit_depth: u8, layout: ChannelLayout) -> Self {
        SampleFormat { bit_depth, layout }
    }

    pub fn bpp(&self) -> u32 {
        self.bit_depth as u32 * self.layout.channels()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackedFormat {
    Mono1Bpp,   // 1 bit per pixel, MSB-first, 1 = dark
    Bytes(u8),  // whole bytes per pixel, channel bytes in source order
}

impl PackedFormat {
    pub fn bpp(&self) -> u32 {
        match self {
            Self::Mono1Bpp => 1,
            Self::Bytes(n) => *n as u32 * 8,
        }
    }
}

pub fn minimum_pitch(bpp: u32, width: u32) -> usize {
    ((width as u64 * bpp as u64 + 7) / 8) as usize
}

/// Mask of pixel `x` within its byte, MSB-first.
pub fn bit_mask(x: u32) -> u8 {
    0x80 >> (x % 8)
}

/// Mask of the bits that hold real pixels in the last byte of a 1bpp row.
pub fn last_byte_mask(width: u32) -> u8 {
    match width % 8 {
        0 => 0xff,
        n => 0xff << (8 - n),
    }
}

fn alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { bytes: len })?;
    data.resize(len, 0);
    Ok(data)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    bpp: u32,
    width: u32,
    pitch: usize,
    height: u32,
}

impl ImageHeader {
    pub fn new(bpp: u32, data_len: usize, width: u32, height: u32, pitch: Option<usize>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "invalid width {} and height {}", width, height)));
        }
        let minimum_pitch = minimum_pitch(bpp, width);
        let pitch = pitch.unwrap_or(minimum_pitch);
        if pitch < minimum_pitch {
            return Err(Error::InvalidArgument(format!(
                "invalid pitch {} for width {} at {} bpp", pitch, width, bpp)));
        }
        let required = pitch
            .checked_mul(height as usize)
            .ok_or(Error::TooLarge { width, height })?;
        if data_len < required {
            return Err(Error::InvalidArgument(format!(
                "invalid data len {} for height {} and pitch {}", data_len, height, pitch)));
        }
        Ok(ImageHeader {
            bpp,
            width,
            pitch,
            height,
        })
    }
}

pub trait HasImageHeader {
    fn header(&self) -> ImageHeader;
}

pub trait ConstImage: HasImageHeader {
    fn data(&self) -> &[u8];

    fn bpp(&self) -> u32 {
        self.header().bpp
    }
    fn width(&self) -> u32 {
        self.header().width
    }
    fn height(&self) -> u32 {
        self.header().height
    }
    fn pitch(&self) -> usize {
        self.header().pitch
    }
    fn is_continuous(&self) -> bool {
        self.pitch() == minimum_pitch(self.bpp(), self.width())
    }
    fn size(&self) -> Size {
        (self.width(), self.height()).into()
    }
    // pixels of one row, without the padding past the minimum pitch
    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.pitch();
        &self.data()[start..start + minimum_pitch(self.bpp(), self.width())]
    }
}

/// Decoded samples, borrowed from whoever decoded them.
pub struct PixelBuffer<'a> {
    header: ImageHeader,
    format: SampleFormat,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(format: SampleFormat, data: &'a [u8], width: u32, height: u32, pitch: Option<usize>) -> Result<Self> {
        let header = ImageHeader::new(format.bpp(), data.len(), width, height, pitch)?;
        Ok(PixelBuffer { header, format, data })
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }
}

impl<'a> HasImageHeader for PixelBuffer<'a> {
    fn header(&self) -> ImageHeader {
        self.header
    }
}

impl<'a> ConstImage for PixelBuffer<'a> {
    fn data(&self) -> &[u8] {
        self.data
    }
}

/// Continuous packed image owning its bytes: `pitch * height` of them, no header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBitmap {
    data: Vec<u8>,
    format: PackedFormat,
    header: ImageHeader,
}

impl PackedBitmap {
    /// Zero-filled (all light) bitmap.
    pub fn new(format: PackedFormat, width: u32, height: u32) -> Result<Self> {
        let len = Self::checked_len(format, width, height)?;
        let data = alloc_zeroed(len)?;
        let header = ImageHeader::new(format.bpp(), data.len(), width, height, None)?;
        Ok(Self { data, format, header })
    }

    /// Wraps already packed rows. Padding bits past `width` are cleared.
    pub fn from_data(format: PackedFormat, width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        let len = Self::checked_len(format, width, height)?;
        if data.len() != len {
            return Err(Error::InvalidArgument(format!(
                "expected {} bytes for {}x{} {:?}, got {}", len, width, height, format, data.len())));
        }
        let header = ImageHeader::new(format.bpp(), data.len(), width, height, None)?;
        if format == PackedFormat::Mono1Bpp {
            let mask = last_byte_mask(width);
            for row in data.chunks_exact_mut(header.pitch) {
                if let Some(last) = row.last_mut() {
                    *last &= mask;
                }
            }
        }
        Ok(Self { data, format, header })
    }

    fn checked_len(format: PackedFormat, width: u32, height: u32) -> Result<usize> {
        u32::try_from(minimum_pitch(format.bpp(), width))
            .ok()
            .and_then(|pitch| pitch.checked_mul(height))
            .map(|len| len as usize)
            .ok_or(Error::TooLarge { width, height })
    }

    pub fn format(&self) -> PackedFormat {
        self.format
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let pitch = self.pitch();
        let start = y as usize * pitch;
        &mut self.data[start..start + pitch]
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        debug_assert_eq!(self.format, PackedFormat::Mono1Bpp);
        (self.row(y)[(x / 8) as usize] & bit_mask(x)) != 0
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, dark: bool) {
        debug_assert_eq!(self.format, PackedFormat::Mono1Bpp);
        debug_assert!(x < self.width());
        let byte = &mut self.row_mut(y)[(x / 8) as usize];
        if dark {
            *byte |= bit_mask(x);
        } else {
            *byte &= !bit_mask(x);
        }
    }
}

impl HasImageHeader for PackedBitmap {
    fn header(&self) -> ImageHeader {
        self.header
    }
}

impl ConstImage for PackedBitmap {
    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }
}

pub mod convert;
