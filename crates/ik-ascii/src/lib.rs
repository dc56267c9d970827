/// Brightness matching engine for inkscii.
///
/// Maps region brightness values onto the active character whose glyph
/// density is closest, and assembles the resulting character grid.
pub mod assembler;
pub mod index;

pub use assembler::assemble;
pub use index::CharacterBrightnessIndex;
