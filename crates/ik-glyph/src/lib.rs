/// Glyph rasterization and brightness scoring for inkscii.
///
/// Every printable ASCII glyph is rendered once into a square binary mask;
/// its brightness is the fraction of ink pixels in that mask.
pub mod raster;
pub mod table;

pub use raster::{GlyphMask, GlyphRasterizer};
pub use table::{BrightnessTable, build_table};
