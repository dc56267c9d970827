/// Image sources for inkscii: decoding, padding and slicing into
/// per-region brightness values.

pub mod image;
pub mod slice;

pub use crate::image::{Picture, load_image};
pub use slice::{ImageSlicer, SlicedImage};
