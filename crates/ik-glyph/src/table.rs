use std::path::Path;

use ab_glyph::Font;
use anyhow::{Context, Result};
use ik_core::charset::{REPERTOIRE_LEN, repertoire, repertoire_index};
use ik_core::config::ShellConfig;
use ik_core::error::MatchError;

use crate::raster::GlyphRasterizer;

/// Table immuable des scores de luminosité des 95 glyphes imprimables.
///
/// Calculée une fois au démarrage, puis partagée en lecture seule (`Arc`).
/// Les scores sont stockés en nombre exact de pixels d'encre : deux glyphes
/// de même densité ont des scores bit-à-bit identiques.
///
/// # Example
/// ```
/// use ik_glyph::table::BrightnessTable;
/// let table = BrightnessTable::from_ink_counts(16, |ch| if ch == '#' { 64 } else { 0 });
/// assert_eq!(table.brightness_of('#').unwrap(), 0.25);
/// assert!(table.brightness_of('\n').is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrightnessTable {
    resolution: u32,
    ink: [u32; REPERTOIRE_LEN],
}

impl BrightnessTable {
    /// Score every glyph with the embedded monospace font.
    ///
    /// # Errors
    /// Returns an error if the embedded font cannot be parsed.
    pub fn with_embedded_font(resolution: u32) -> Result<Self> {
        let raster = GlyphRasterizer::embedded(resolution)?;
        Ok(Self::from_rasterizer(&raster))
    }

    /// Score every glyph with a font file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a font.
    pub fn from_font_file(path: &Path, resolution: u32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        let raster = GlyphRasterizer::from_bytes(data, resolution)
            .with_context(|| format!("Police invalide : {}", path.display()))?;
        Ok(Self::from_rasterizer(&raster))
    }

    /// Score every glyph with the given rasterizer.
    pub fn from_rasterizer<F: Font>(raster: &GlyphRasterizer<F>) -> Self {
        let table = Self::from_ink_counts(raster.resolution(), |ch| raster.render(ch).ink_count());
        log::info!(
            "Table de luminosité : {} glyphes rendus en {}×{}",
            REPERTOIRE_LEN,
            table.resolution,
            table.resolution
        );
        table
    }

    /// Build a table from precomputed ink counts.
    ///
    /// Counts above `resolution²` are clamped so scores stay within [0, 1].
    pub fn from_ink_counts(resolution: u32, mut ink_of: impl FnMut(char) -> u32) -> Self {
        let resolution = resolution.max(1);
        let area = resolution * resolution;
        let mut ink = [0u32; REPERTOIRE_LEN];
        for (slot, ch) in ink.iter_mut().zip(repertoire()) {
            *slot = ink_of(ch).min(area);
        }
        Self { resolution, ink }
    }

    /// Side length of the glyph renderings.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of pixels in one glyph rendering.
    #[must_use]
    pub fn pixel_area(&self) -> u32 {
        self.resolution * self.resolution
    }

    /// Number of ink pixels in the rendering of `ch`.
    ///
    /// # Errors
    /// [`MatchError::UnsupportedGlyph`] outside 32..=126.
    pub fn ink_count(&self, ch: char) -> Result<u32, MatchError> {
        repertoire_index(ch)
            .map(|i| self.ink[i])
            .ok_or(MatchError::UnsupportedGlyph(ch))
    }

    /// Normalised brightness of `ch`: ink pixels / pixel area, in [0, 1].
    ///
    /// # Errors
    /// [`MatchError::UnsupportedGlyph`] outside 32..=126.
    pub fn brightness_of(&self, ch: char) -> Result<f64, MatchError> {
        self.ink_count(ch).map(|ink| self.score(ink))
    }

    /// Convert an ink count to its normalised score.
    #[inline]
    #[must_use]
    pub fn score(&self, ink: u32) -> f64 {
        f64::from(ink) / f64::from(self.pixel_area())
    }

    /// Iterate `(glyph, brightness)` over the repertoire in code order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        repertoire().zip(self.ink.iter().map(|&ink| self.score(ink)))
    }
}

/// Build the table described by the glyph section of `config`.
///
/// # Errors
/// Returns an error if the configured font cannot be loaded.
pub fn build_table(config: &ShellConfig) -> Result<BrightnessTable> {
    match config.font_path.as_deref() {
        Some(path) => BrightnessTable::from_font_file(path, config.glyph_resolution),
        None => BrightnessTable::with_embedded_font(config.glyph_resolution),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BrightnessTable {
        BrightnessTable::with_embedded_font(16).unwrap()
    }

    #[test]
    fn space_scores_zero() {
        assert_eq!(table().brightness_of(' ').unwrap(), 0.0);
    }

    #[test]
    fn every_score_is_normalised() {
        for (ch, score) in table().iter() {
            assert!((0.0..=1.0).contains(&score), "{ch:?} -> {score}");
        }
    }

    #[test]
    fn scores_are_deterministic() {
        let a = table();
        let b = table();
        for ch in ' '..='~' {
            let (x, y) = (a.brightness_of(ch).unwrap(), b.brightness_of(ch).unwrap());
            assert_eq!(x.to_bits(), y.to_bits(), "{ch:?}");
        }
        assert_eq!(a, b);
    }

    #[test]
    fn dense_glyphs_outscore_sparse_ones() {
        let t = table();
        assert!(t.brightness_of('@').unwrap() > t.brightness_of('.').unwrap());
        assert!(t.brightness_of('M').unwrap() > t.brightness_of(' ').unwrap());
    }

    #[test]
    fn out_of_repertoire_is_rejected() {
        let t = table();
        assert_eq!(t.brightness_of('\u{7f}'), Err(MatchError::UnsupportedGlyph('\u{7f}')));
        assert_eq!(t.ink_count('\u{1f}'), Err(MatchError::UnsupportedGlyph('\u{1f}')));
    }

    #[test]
    fn ink_counts_are_clamped_to_area() {
        let t = BrightnessTable::from_ink_counts(4, |_| 1000);
        assert_eq!(t.brightness_of('x').unwrap(), 1.0);
    }

    #[test]
    fn build_table_uses_font_path() {
        let mut config = ShellConfig::default();
        config.font_path = Some("/nonexistent/font.ttf".into());
        assert!(build_table(&config).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.ttf");
        std::fs::write(&path, crate::raster::EMBEDDED_FONT).unwrap();
        config.font_path = Some(path);
        assert_eq!(build_table(&config).unwrap(), table());
    }
}
