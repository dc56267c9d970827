use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Image whose padded size does not fit in `u32`.
    #[error("Image trop grande : {width}×{height}")]
    ImageTooLarge {
        /// Source width.
        width: u32,
        /// Source height.
        height: u32,
    },

    /// Column count that cannot evenly divide the padded image.
    #[error("Résolution invalide : {resolution} (largeur {width}, hauteur {height})")]
    InvalidResolution {
        /// Requested column count.
        resolution: u32,
        /// Padded image width.
        width: u32,
        /// Padded image height.
        height: u32,
    },
}

/// Errors raised by brightness scoring and character matching.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Character outside the printable repertoire (32..=126).
    #[error("Glyphe non supporté : {0:?} (attendu entre ' ' et '~')")]
    UnsupportedGlyph(char),

    /// No active character to match against.
    #[error("Jeu de caractères vide")]
    EmptyActiveSet,

    /// Brightness sequence length does not match the grid dimensions.
    #[error("Séquence de {actual} valeurs pour une grille de {expected} cellules")]
    GridShape {
        /// rows × columns.
        expected: usize,
        /// Length of the supplied sequence.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_glyph_names_the_character() {
        let msg = MatchError::UnsupportedGlyph('é').to_string();
        assert!(msg.contains("'é'"), "{msg}");
    }

    #[test]
    fn grid_shape_reports_both_sizes() {
        let msg = MatchError::GridShape {
            expected: 6,
            actual: 5,
        }
        .to_string();
        assert!(msg.contains('6') && msg.contains('5'));
    }
}
