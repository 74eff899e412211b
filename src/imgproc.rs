pub mod bitpack;
pub mod rotate;

pub use bitpack::{pack, PackMode, PackStrategy};
pub use rotate::{rotate, Rotation};
