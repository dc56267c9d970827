use ik_core::error::MatchError;
use ik_core::grid::CharGrid;

use crate::index::CharacterBrightnessIndex;

/// Assemble une grille `rows × columns` à partir des luminosités de régions.
///
/// `brightnesses` est lu en row-major, une valeur par cellule, dans [0, 1]
/// (plus haut = plus clair). Chaque cellule est appariée indépendamment via
/// [`CharacterBrightnessIndex::match_brightness`] : pas de lissage, pas de
/// tramage. L'index n'est pas modifié et aucun état n'est conservé.
///
/// # Errors
/// - [`MatchError::EmptyActiveSet`] si l'index est vide (vérifié en premier) ;
/// - [`MatchError::GridShape`] si la longueur ne vaut pas `rows × columns`.
///
/// Aucune grille partielle n'est produite en cas d'erreur.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use ik_glyph::table::BrightnessTable;
/// use ik_ascii::index::CharacterBrightnessIndex;
/// use ik_ascii::assembler::assemble;
///
/// let table = Arc::new(BrightnessTable::from_ink_counts(16, |ch| if ch == '#' { 200 } else { 0 }));
/// let index = CharacterBrightnessIndex::new(table, [' ', '#']).unwrap();
/// let grid = assemble(&[0.0, 1.0, 1.0, 0.0], 2, 2, &index).unwrap();
/// assert_eq!(grid.to_lines(), vec![" #", "# "]);
/// ```
pub fn assemble(
    brightnesses: &[f64],
    rows: usize,
    columns: usize,
    index: &CharacterBrightnessIndex,
) -> Result<CharGrid, MatchError> {
    if index.is_empty() {
        return Err(MatchError::EmptyActiveSet);
    }
    let expected = rows * columns;
    if brightnesses.len() != expected {
        return Err(MatchError::GridShape {
            expected,
            actual: brightnesses.len(),
        });
    }

    let mut grid = CharGrid::new(rows, columns);
    for (i, &value) in brightnesses.iter().enumerate() {
        grid.set(i / columns, i % columns, index.match_brightness(value)?);
    }

    log::debug!("Grille assemblée : {rows}×{columns}");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ik_glyph::table::BrightnessTable;

    use super::*;

    fn embedded() -> Arc<BrightnessTable> {
        Arc::new(BrightnessTable::with_embedded_font(16).unwrap())
    }

    #[test]
    fn digits_fill_row_major() {
        let index = CharacterBrightnessIndex::new(embedded(), '0'..='9').unwrap();
        let values = [0.0, 0.1, 0.5, 0.5, 0.9, 1.0];
        let grid = assemble(&values, 2, 3, &index).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        // 0.5 tombe pile entre deux seaux : le plancher l'emporte.
        assert_eq!(grid.to_lines(), vec!["113", "308"]);

        let again = assemble(&values, 2, 3, &index).unwrap();
        assert_eq!(grid, again);
    }

    #[test]
    fn single_character_fills_every_cell() {
        let index = CharacterBrightnessIndex::new(embedded(), ['%']).unwrap();
        let grid = assemble(&[0.0, 0.3, 0.7, 1.0], 1, 4, &index).unwrap();
        assert_eq!(grid.to_lines(), vec!["%%%%"]);
    }

    #[test]
    fn empty_index_produces_no_grid() {
        let index = CharacterBrightnessIndex::empty(embedded());
        assert_eq!(
            assemble(&[0.5; 4], 2, 2, &index),
            Err(MatchError::EmptyActiveSet)
        );
        // Même avec une séquence mal dimensionnée, le jeu vide prime.
        assert_eq!(
            assemble(&[0.5; 3], 2, 2, &index),
            Err(MatchError::EmptyActiveSet)
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let index = CharacterBrightnessIndex::new(embedded(), ['a']).unwrap();
        assert_eq!(
            assemble(&[0.5; 5], 2, 3, &index),
            Err(MatchError::GridShape {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn index_is_not_mutated() {
        let index = CharacterBrightnessIndex::new(embedded(), "abc".chars()).unwrap();
        let before = index.active_characters().clone();
        let _ = assemble(&[0.2, 0.8], 1, 2, &index).unwrap();
        assert_eq!(index.active_characters(), &before);
    }

    #[test]
    fn zero_sized_grid_is_empty() {
        let index = CharacterBrightnessIndex::new(embedded(), ['a']).unwrap();
        let grid = assemble(&[], 0, 0, &index).unwrap();
        assert!(grid.cells().is_empty());
    }
}
