pub mod app;
pub mod decode;
pub mod error;
pub mod image;
pub mod imgproc;
pub mod output;

pub use error::{Error, Result};
