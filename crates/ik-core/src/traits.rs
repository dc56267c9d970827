use std::io::Write;

use crate::grid::CharGrid;

/// Restitue une grille de caractères vers une destination.
///
/// Implémenté par : `ConsoleOutput`, `HtmlOutput`.
///
/// # Example
/// ```
/// use ik_core::traits::AsciiOutput;
/// use ik_core::grid::CharGrid;
/// use std::io::Write;
///
/// struct DummyOutput;
/// impl AsciiOutput for DummyOutput {
///     fn out(&self, _grid: &CharGrid, _console: &mut dyn Write) -> anyhow::Result<()> {
///         Ok(())
///     }
///     fn name(&self) -> &'static str { "dummy" }
/// }
/// ```
pub trait AsciiOutput {
    /// Écrit `grid`. `console` est la sortie texte du shell, utilisable
    /// pour le rendu lui-même ou pour un message de confirmation.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn out(&self, grid: &CharGrid, console: &mut dyn Write) -> anyhow::Result<()>;

    /// Nom lisible pour le debug.
    fn name(&self) -> &'static str;
}
