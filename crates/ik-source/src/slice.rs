use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ik_core::error::CoreError;
use rayon::prelude::*;

use crate::image::{Picture, WHITE, load_image};

/// Luminosités moyennes des régions d'une image, row-major.
///
/// Chaque valeur est dans [0, 1], plus haut = plus clair.
#[derive(Clone, Debug, PartialEq)]
pub struct SlicedImage {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns (the resolution).
    pub columns: usize,
    /// One mean brightness per region.
    pub brightness: Vec<f64>,
}

/// Pad both dimensions up to the next power of two with white, keeping the
/// original content centred (odd padding puts the extra line right/bottom).
///
/// # Example
/// ```
/// use ik_source::image::Picture;
/// use ik_source::slice::pad_to_power_of_two;
/// let padded = pad_to_power_of_two(&Picture::filled(5, 3, [0, 0, 0, 255])).unwrap();
/// assert_eq!((padded.width, padded.height), (8, 4));
/// ```
///
/// # Errors
/// [`CoreError::ImageTooLarge`] when a padded side would exceed `u32`.
pub fn pad_to_power_of_two(src: &Picture) -> Result<Picture, CoreError> {
    let (width, height) = padded_dimensions(src.width, src.height)?;
    if width == src.width && height == src.height {
        return Ok(src.clone());
    }

    let left = (width - src.width) / 2;
    let top = (height - src.height) / 2;
    let mut out = Picture::filled(width, height, WHITE);
    for y in 0..src.height {
        for x in 0..src.width {
            out.set_pixel(x + left, y + top, src.pixel(x, y));
        }
    }
    log::debug!(
        "Padding {}×{} → {width}×{height}",
        src.width,
        src.height
    );
    Ok(out)
}

/// Dimensions after padding to powers of two.
///
/// # Errors
/// [`CoreError::ImageTooLarge`] when a side is above 2^31.
pub fn padded_dimensions(width: u32, height: u32) -> Result<(u32, u32), CoreError> {
    let too_large = || CoreError::ImageTooLarge { width, height };
    let w = width.max(1).checked_next_power_of_two().ok_or_else(too_large)?;
    let h = height.max(1).checked_next_power_of_two().ok_or_else(too_large)?;
    Ok((w, h))
}

/// Admissible column counts for a padded picture: `(min, max)`.
///
/// `max` is the width (one pixel per column); `min` keeps at least one full
/// row of square regions.
#[must_use]
pub fn resolution_bounds(padded: &Picture) -> (u32, u32) {
    let max = padded.width;
    let min = (padded.width / padded.height.max(1)).max(1);
    (min, max)
}

/// Cut a padded picture into square regions, `resolution` per row, and
/// average each region's luma.
///
/// # Errors
/// [`CoreError::InvalidResolution`] when `resolution` does not divide the
/// width, or the resulting region side does not divide the height.
///
/// # Example
/// ```
/// use ik_source::image::Picture;
/// use ik_source::slice::slice;
/// let sliced = slice(&Picture::filled(4, 2, [255, 255, 255, 255]), 2).unwrap();
/// assert_eq!((sliced.rows, sliced.columns), (1, 2));
/// assert_eq!(sliced.brightness, vec![1.0, 1.0]);
/// ```
pub fn slice(padded: &Picture, resolution: u32) -> Result<SlicedImage, CoreError> {
    let invalid = || CoreError::InvalidResolution {
        resolution,
        width: padded.width,
        height: padded.height,
    };
    if resolution == 0 || resolution > padded.width || padded.width % resolution != 0 {
        return Err(invalid());
    }
    let side = padded.width / resolution;
    if padded.height % side != 0 || padded.height < side {
        return Err(invalid());
    }

    let columns = resolution as usize;
    let rows = (padded.height / side) as usize;
    let area = f64::from(side) * f64::from(side);

    let mut brightness = vec![0.0f64; rows * columns];
    brightness
        .par_chunks_exact_mut(columns)
        .enumerate()
        .for_each(|(row, out)| {
            let y0 = row as u32 * side;
            for (col, slot) in out.iter_mut().enumerate() {
                let x0 = col as u32 * side;
                let mut sum = 0.0;
                for y in y0..y0 + side {
                    for x in x0..x0 + side {
                        sum += padded.luma(x, y);
                    }
                }
                *slot = sum / area / 255.0;
            }
        });

    Ok(SlicedImage {
        rows,
        columns,
        brightness,
    })
}

/// Image source with a padded picture and the last slicing cached.
///
/// Repeated requests at the same resolution reuse the previous result.
pub struct ImageSlicer {
    padded: Picture,
    cached: Option<(u32, Arc<SlicedImage>)>,
}

impl ImageSlicer {
    /// Pad `picture` and prepare it for slicing.
    ///
    /// # Errors
    /// [`CoreError::ImageTooLarge`], see [`pad_to_power_of_two`].
    pub fn new(picture: &Picture) -> Result<Self, CoreError> {
        Ok(Self {
            padded: pad_to_power_of_two(picture)?,
            cached: None,
        })
    }

    /// Load and pad an image file.
    ///
    /// # Errors
    /// Returns an error if the image cannot be loaded or is too large.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(&load_image(path)?)?)
    }

    /// The padded picture.
    #[must_use]
    pub fn padded(&self) -> &Picture {
        &self.padded
    }

    /// Admissible column counts, see [`resolution_bounds`].
    #[must_use]
    pub fn bounds(&self) -> (u32, u32) {
        resolution_bounds(&self.padded)
    }

    /// Slice at `resolution`, reusing the cached result when possible.
    ///
    /// # Errors
    /// [`CoreError::InvalidResolution`], see [`slice`].
    pub fn slice(&mut self, resolution: u32) -> Result<Arc<SlicedImage>, CoreError> {
        if let Some((cached_res, sliced)) = &self.cached
            && *cached_res == resolution
        {
            log::debug!("Découpage {resolution} réutilisé");
            return Ok(Arc::clone(sliced));
        }
        let sliced = Arc::new(slice(&self.padded, resolution)?);
        log::info!(
            "Découpage : {} lignes × {} colonnes",
            sliced.rows,
            sliced.columns
        );
        self.cached = Some((resolution, Arc::clone(&sliced)));
        Ok(sliced)
    }
}
