/// Grille de caractères produite par l'assemblage, row-major.
///
/// Taille fixe `rows × columns`, possédée par l'appelant.
///
/// # Example
/// ```
/// use ik_core::grid::CharGrid;
/// let mut grid = CharGrid::new(2, 3);
/// grid.set(1, 2, '@');
/// assert_eq!(grid.get(1, 2), '@');
/// assert_eq!(grid.get(0, 0), ' ');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of cells, row-major.
    cells: Vec<char>,
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    columns: usize,
}

impl CharGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![' '; rows * columns],
            rows,
            columns,
        }
    }

    /// Build a grid from row-major cells.
    ///
    /// Returns `None` when `cells.len() != rows * columns`.
    ///
    /// # Example
    /// ```
    /// use ik_core::grid::CharGrid;
    /// let grid = CharGrid::from_cells(1, 2, vec!['a', 'b']).unwrap();
    /// assert_eq!(grid.to_lines(), vec!["ab".to_string()]);
    /// assert!(CharGrid::from_cells(2, 2, vec!['a']).is_none());
    /// ```
    #[must_use]
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<char>) -> Option<Self> {
        (cells.len() == rows * columns).then_some(Self {
            cells,
            rows,
            columns,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Set the cell at (`row`, `column`).
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn set(&mut self, row: usize, column: usize, ch: char) {
        assert!(column < self.columns, "column {column} out of bounds");
        self.cells[row * self.columns + column] = ch;
    }

    /// Character at (`row`, `column`).
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> char {
        assert!(column < self.columns, "column {column} out of bounds");
        self.cells[row * self.columns + column]
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics: an empty grid has no rows anyway.
        self.cells.chunks(self.columns.max(1)).take(self.rows)
    }

    /// Rows collected as strings.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.iter_rows().map(|row| row.iter().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_row_major() {
        let grid = CharGrid::from_cells(2, 3, "abcdef".chars().collect()).unwrap();
        assert_eq!(grid.to_lines(), vec!["abc", "def"]);
        assert_eq!(grid.get(1, 0), 'd');
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let grid = CharGrid::new(0, 0);
        assert_eq!(grid.iter_rows().count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn column_overflow_panics() {
        let grid = CharGrid::new(2, 2);
        let _ = grid.get(0, 2);
    }
}
