use std::fmt;

use ab_glyph::{Font, FontRef, FontVec, PxScale, point};

/// Décalage horizontal du point d'origine, en fraction du côté.
pub const X_OFFSET_FACTOR: f32 = 0.2;

/// Position de la ligne de base, en fraction du côté.
pub const Y_OFFSET_FACTOR: f32 = 0.75;

/// Couverture minimale pour qu'un pixel compte comme encre.
///
/// Equivalent to aliased rendering: a pixel is ink when the outline covers at
/// least half of it. Gray edges never count partially.
pub const INK_COVERAGE: f32 = 0.5;

/// DejaVu Sans Mono, embarquée.
pub static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Square binary image of one glyph, row-major.
///
/// # Example
/// ```
/// use ik_glyph::raster::GlyphMask;
/// let mask = GlyphMask::new(4);
/// assert_eq!(mask.ink_count(), 0);
/// assert_eq!(mask.to_string().lines().count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    resolution: u32,
    bits: Vec<bool>,
}

impl GlyphMask {
    /// Blank mask of side `resolution`.
    #[must_use]
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            bits: vec![false; (resolution * resolution) as usize],
        }
    }

    /// Side length in pixels.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Whether pixel (x, y) is ink. Out-of-range coordinates are blank.
    #[must_use]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.resolution && y < self.resolution && self.bits[(y * self.resolution + x) as usize]
    }

    /// Number of ink pixels.
    #[must_use]
    pub fn ink_count(&self) -> u32 {
        self.bits.iter().filter(|&&b| b).count() as u32
    }

    fn mark(&mut self, x: u32, y: u32) {
        if x < self.resolution && y < self.resolution {
            self.bits[(y * self.resolution + x) as usize] = true;
        }
    }
}

impl fmt::Display for GlyphMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.bits.chunks(self.resolution.max(1) as usize) {
            for &ink in row {
                f.write_str(if ink { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rend des glyphes dans un carré de `resolution` pixels de côté.
///
/// La taille de police vaut `resolution` pixels par em.
pub struct GlyphRasterizer<F> {
    font: F,
    resolution: u32,
    scale: PxScale,
}

impl GlyphRasterizer<FontRef<'static>> {
    /// Rasterizer over the embedded monospace font.
    ///
    /// # Errors
    /// Returns an error if the embedded font cannot be parsed.
    ///
    /// # Example
    /// ```
    /// use ik_glyph::raster::GlyphRasterizer;
    /// let raster = GlyphRasterizer::embedded(16).unwrap();
    /// assert_eq!(raster.render(' ').ink_count(), 0);
    /// ```
    pub fn embedded(resolution: u32) -> anyhow::Result<Self> {
        let font = FontRef::try_from_slice(EMBEDDED_FONT)?;
        Ok(Self::with_font(font, resolution))
    }
}

impl GlyphRasterizer<FontVec> {
    /// Rasterizer over a font loaded at runtime (TTF/OTF bytes).
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid font.
    pub fn from_bytes(data: Vec<u8>, resolution: u32) -> anyhow::Result<Self> {
        let font = FontVec::try_from_vec(data)?;
        Ok(Self::with_font(font, resolution))
    }
}

impl<F: Font> GlyphRasterizer<F> {
    /// Wrap an already parsed font.
    pub fn with_font(font: F, resolution: u32) -> Self {
        let resolution = resolution.max(1);
        // PxScale is expressed in font height; convert so that one em spans
        // `resolution` pixels.
        let units_per_em = font.units_per_em().unwrap_or_else(|| font.height_unscaled());
        let scale = PxScale::from(resolution as f32 * font.height_unscaled() / units_per_em);
        Self {
            font,
            resolution,
            scale,
        }
    }

    /// Side length of the produced masks.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Render `ch` into a binary mask.
    ///
    /// Characters missing from the font render blank rather than as the
    /// `.notdef` box.
    #[must_use]
    pub fn render(&self, ch: char) -> GlyphMask {
        let mut mask = GlyphMask::new(self.resolution);

        let gid = self.font.glyph_id(ch);
        if gid.0 == 0 {
            if ch != ' ' {
                log::warn!("Glyphe {ch:?} absent de la police, rendu vide");
            }
            return mask;
        }

        let side = self.resolution as f32;
        let origin = point(
            (side * X_OFFSET_FACTOR).round(),
            (side * Y_OFFSET_FACTOR).round(),
        );
        let glyph = gid.with_scale_and_position(self.scale, origin);

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|x, y, coverage| {
                if coverage < INK_COVERAGE {
                    return;
                }
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if px >= 0 && py >= 0 {
                    mask.mark(px as u32, py as u32);
                }
            });
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_blank() {
        let raster = GlyphRasterizer::embedded(16).unwrap();
        assert_eq!(raster.render(' '), GlyphMask::new(16));
    }

    #[test]
    fn at_sign_leaves_ink_inside_the_square() {
        let raster = GlyphRasterizer::embedded(16).unwrap();
        let mask = raster.render('@');
        assert!(mask.ink_count() > 0);
        assert!(mask.ink_count() < 16 * 16);

        let inside = (0..16)
            .flat_map(|y| (0..16).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.is_ink(x, y))
            .count() as u32;
        assert_eq!(inside, mask.ink_count());
        assert!(!mask.is_ink(16, 0));
        assert!(!mask.is_ink(0, 16));
    }

    #[test]
    fn rendering_is_repeatable() {
        let raster = GlyphRasterizer::embedded(16).unwrap();
        for ch in ['a', 'W', '#', '~'] {
            assert_eq!(raster.render(ch), raster.render(ch));
        }
    }

    #[test]
    fn larger_square_holds_more_ink() {
        let small = GlyphRasterizer::embedded(16).unwrap();
        let large = GlyphRasterizer::embedded(64).unwrap();
        assert!(large.render('M').ink_count() > small.render('M').ink_count());
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        assert!(GlyphRasterizer::from_bytes(vec![0u8; 32], 16).is_err());
    }

    #[test]
    fn display_draws_one_line_per_row() {
        let raster = GlyphRasterizer::embedded(8).unwrap();
        let art = raster.render('#').to_string();
        assert_eq!(art.lines().count(), 8);
        assert!(art.lines().all(|l| l.chars().count() == 8));
    }
}
