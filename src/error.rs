#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Only monochrome or RGB/RGBA images are supported: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // the packed buffer size must fit a 32-bit size computation
    #[error("Image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
