/// Configuration, types, and shared structures for inkscii.
///
/// This crate contains the shared grid type, the glyph repertoire, the
/// error taxonomy and configuration loading used across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod grid;
pub mod traits;

pub use charset::{FIRST_GLYPH, LAST_GLYPH, REPERTOIRE_LEN, is_supported};
pub use config::ShellConfig;
pub use error::{CoreError, MatchError};
pub use grid::CharGrid;
pub use traits::AsciiOutput;
