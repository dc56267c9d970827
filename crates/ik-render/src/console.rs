use std::io::Write;

use anyhow::Result;
use ik_core::grid::CharGrid;
use ik_core::traits::AsciiOutput;

/// Affiche chaque ligne de la grille sur la console du shell.
///
/// # Example
/// ```
/// use ik_core::grid::CharGrid;
/// use ik_core::traits::AsciiOutput;
/// use ik_render::console::ConsoleOutput;
///
/// let grid = CharGrid::from_cells(2, 2, "#..#".chars().collect()).unwrap();
/// let mut out = Vec::new();
/// ConsoleOutput.out(&grid, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "#.\n.#\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleOutput;

impl AsciiOutput for ConsoleOutput {
    fn out(&self, grid: &CharGrid, console: &mut dyn Write) -> Result<()> {
        let mut line = String::with_capacity(grid.columns() + 1);
        for row in grid.iter_rows() {
            line.clear();
            line.extend(row);
            line.push('\n');
            console.write_all(line.as_bytes())?;
        }
        console.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
