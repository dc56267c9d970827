/// Output rendering for inkscii.
///
/// Writes assembled character grids to the console or to an HTML file.
pub mod console;
pub mod html;

pub use console::ConsoleOutput;
pub use html::HtmlOutput;

use ik_core::config::{OutputMode, ShellConfig};
use ik_core::traits::AsciiOutput;

/// Build the renderer selected by `mode`, using `config` for file settings.
#[must_use]
pub fn output_for(mode: OutputMode, config: &ShellConfig) -> Box<dyn AsciiOutput> {
    match mode {
        OutputMode::Console => Box::new(ConsoleOutput),
        OutputMode::Html => Box::new(HtmlOutput::new(
            config.html_file.clone(),
            config.html_font.clone(),
        )),
    }
}
