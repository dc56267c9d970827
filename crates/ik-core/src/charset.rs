use std::ops::RangeInclusive;

/// Premier glyphe du répertoire (espace, U+0020).
pub const FIRST_GLYPH: char = ' ';

/// Dernier glyphe du répertoire (tilde, U+007E).
pub const LAST_GLYPH: char = '~';

/// 95 caractères imprimables, de l'espace au tilde.
pub const REPERTOIRE_LEN: usize = 95;

/// Jeu de départ : les chiffres.
pub const CHARSET_DIGITS: &str = "0123456789";

/// Mot-clé désignant le caractère espace dans une sélection.
pub const SPACE_WORD: &str = "space";

/// Mot-clé désignant tout le répertoire.
pub const ALL_WORD: &str = "all";

/// Whether `ch` belongs to the printable glyph repertoire (32..=126).
///
/// # Example
/// ```
/// use ik_core::charset::is_supported;
/// assert!(is_supported('~'));
/// assert!(!is_supported('\n'));
/// ```
#[inline]
#[must_use]
pub fn is_supported(ch: char) -> bool {
    (FIRST_GLYPH..=LAST_GLYPH).contains(&ch)
}

/// Position of a supported glyph inside the repertoire (0 for space).
#[inline]
#[must_use]
pub fn repertoire_index(ch: char) -> Option<usize> {
    is_supported(ch).then(|| ch as usize - FIRST_GLYPH as usize)
}

/// Iterate over the whole repertoire in ascending code order.
pub fn repertoire() -> impl Iterator<Item = char> {
    FIRST_GLYPH..=LAST_GLYPH
}

/// Parse a character selection as typed in the shell.
///
/// Accepted forms:
/// - a single character: `"a"`
/// - `"all"`: the whole repertoire
/// - `"space"`: the space character
/// - an inclusive range `"a-z"`, bounds in either order
///
/// Returns `None` for anything else, including selections that reach
/// outside the repertoire.
///
/// # Example
/// ```
/// use ik_core::charset::parse_selection;
/// assert_eq!(parse_selection("z-a"), Some('a'..='z'));
/// assert_eq!(parse_selection("space"), Some(' '..=' '));
/// assert_eq!(parse_selection("ab"), None);
/// ```
#[must_use]
pub fn parse_selection(arg: &str) -> Option<RangeInclusive<char>> {
    let chars: Vec<char> = arg.chars().collect();
    let range = match chars.as_slice() {
        [c] => *c..=*c,
        _ if arg == ALL_WORD => FIRST_GLYPH..=LAST_GLYPH,
        _ if arg == SPACE_WORD => ' '..=' ',
        [a, '-', b] => (*a).min(*b)..=(*a).max(*b),
        _ => return None,
    };
    (is_supported(*range.start()) && is_supported(*range.end())).then_some(range)
}

/// Split a charset string into its distinct characters.
///
/// # Errors
/// Returns the first character that is outside the repertoire.
///
/// # Example
/// ```
/// use ik_core::charset::parse_charset;
/// assert_eq!(parse_charset("0110").unwrap(), vec!['0', '1']);
/// ```
pub fn parse_charset(charset: &str) -> Result<Vec<char>, char> {
    let mut out: Vec<char> = Vec::with_capacity(charset.len());
    for ch in charset.chars() {
        if !is_supported(ch) {
            return Err(ch);
        }
        if !out.contains(&ch) {
            out.push(ch);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repertoire_has_95_glyphs() {
        assert_eq!(repertoire().count(), REPERTOIRE_LEN);
        assert_eq!(repertoire_index(' '), Some(0));
        assert_eq!(repertoire_index('~'), Some(REPERTOIRE_LEN - 1));
        assert_eq!(repertoire_index('\u{7f}'), None);
    }

    #[test]
    fn selection_forms() {
        assert_eq!(parse_selection("#"), Some('#'..='#'));
        assert_eq!(parse_selection("-"), Some('-'..='-'));
        assert_eq!(parse_selection("all"), Some(' '..='~'));
        assert_eq!(parse_selection("0-9"), Some('0'..='9'));
        assert_eq!(parse_selection("9-0"), Some('0'..='9'));
    }

    #[test]
    fn selection_rejects_malformed_input() {
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("abc"), None);
        assert_eq!(parse_selection("a+b"), None);
        assert_eq!(parse_selection("é"), None);
        assert_eq!(parse_selection("a-é"), None);
    }

    #[test]
    fn charset_rejects_control_characters() {
        assert_eq!(parse_charset("ab\t"), Err('\t'));
    }
}
