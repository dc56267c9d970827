use std::path::Path;

use anyhow::{Context, Result};

/// Blanc opaque, couleur de remplissage du padding.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Image décodée en RGBA row-major, 4 octets par pixel.
///
/// # Example
/// ```
/// use ik_source::image::Picture;
/// let pic = Picture::filled(3, 2, [0, 0, 0, 255]);
/// assert_eq!(pic.data.len(), 3 * 2 * 4);
/// assert_eq!(pic.luma(2, 1), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    /// Pixels RGBA, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Picture {
    /// Picture of uniform colour.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat(width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → [r, g, b, a].
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = self.offset(x, y);
        match self.data.get(idx..idx + 4) {
            Some(&[r, g, b, a]) => [r, g, b, a],
            _ => [0, 0, 0, 0],
        }
    }

    /// Écrit le pixel (x, y). Ignoré hors limites.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = self.offset(x, y);
            self.data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }

    /// Luminance perceptuelle BT.709 dans [0, 255], alpha ignoré.
    ///
    /// Integer weights summing to 10000 keep pure white at exactly 255.
    #[inline]
    #[must_use]
    pub fn luma(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.pixel(x, y);
        f64::from(u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000.0
    }

    /// Octet de départ du pixel (x, y), calculé en `usize`.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Charge une image depuis le disque (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ik_source::image::load_image;
/// use std::path::Path;
/// let picture = load_image(Path::new("cat.jpeg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<Picture> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Image chargée : {} ({width}×{height})", path.display());
    Ok(Picture {
        data: rgba.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_white_is_full_scale() {
        let pic = Picture::filled(1, 1, WHITE);
        assert_eq!(pic.luma(0, 0), 255.0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn offsets_past_four_gigabytes_do_not_wrap() {
        let pic = Picture {
            data: Vec::new(),
            width: 1 << 16,
            height: 1 << 16,
        };
        assert_eq!(pic.offset(65_535, 65_535), ((1usize << 32) - 1) * 4);
        assert_eq!(pic.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut pic = Picture::filled(2, 2, WHITE);
        pic.set_pixel(5, 0, [0, 0, 0, 255]);
        assert_eq!(pic, Picture::filled(2, 2, WHITE));
        pic.set_pixel(1, 1, [1, 2, 3, 4]);
        assert_eq!(pic.pixel(1, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn load_image_round_trips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut buf = image::RgbaImage::new(3, 2);
        buf.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        buf.save(&path).unwrap();

        let pic = load_image(&path).unwrap();
        assert_eq!((pic.width, pic.height), (3, 2));
        assert_eq!(pic.pixel(2, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn load_image_missing_file_is_error() {
        let err = load_image(Path::new("/nonexistent/cat.jpeg")).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger"));
    }
}
