use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::Arc;

use ik_core::charset::is_supported;
use ik_core::error::MatchError;
use ik_glyph::table::BrightnessTable;

/// Jeu de caractères actif, indexé par luminosité.
///
/// Les caractères sont rangés par score (nombre exact de pixels d'encre) dans
/// des buckets triés. Invariants :
/// - aucun bucket n'est vide ;
/// - chaque caractère actif est dans exactement un bucket, celui de son score.
///
/// Pas de synchronisation interne : les mutations et les requêtes sont
/// séquentielles.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use ik_glyph::table::BrightnessTable;
/// use ik_ascii::index::CharacterBrightnessIndex;
///
/// let table = Arc::new(BrightnessTable::from_ink_counts(16, |ch| ch as u32 - 32));
/// let index = CharacterBrightnessIndex::new(table, "abc".chars()).unwrap();
/// assert_eq!(index.match_brightness(0.0).unwrap(), 'a');
/// assert_eq!(index.match_brightness(1.0).unwrap(), 'c');
/// ```
#[derive(Clone, Debug)]
pub struct CharacterBrightnessIndex {
    table: Arc<BrightnessTable>,
    buckets: BTreeMap<u32, BTreeSet<char>>,
    active: BTreeSet<char>,
}

impl CharacterBrightnessIndex {
    /// Index over `initial`, scored by `table`.
    ///
    /// # Errors
    /// [`MatchError::UnsupportedGlyph`] for the first character outside the
    /// repertoire.
    pub fn new(
        table: Arc<BrightnessTable>,
        initial: impl IntoIterator<Item = char>,
    ) -> Result<Self, MatchError> {
        let mut index = Self::empty(table);
        for ch in initial {
            index.add(ch)?;
        }
        Ok(index)
    }

    /// Index with no active character.
    #[must_use]
    pub fn empty(table: Arc<BrightnessTable>) -> Self {
        Self {
            table,
            buckets: BTreeMap::new(),
            active: BTreeSet::new(),
        }
    }

    /// Scores backing this index.
    #[must_use]
    pub fn table(&self) -> &Arc<BrightnessTable> {
        &self.table
    }

    /// Activate `ch`. Adding an active character changes nothing.
    ///
    /// # Errors
    /// [`MatchError::UnsupportedGlyph`] outside the repertoire; the index is
    /// left untouched.
    pub fn add(&mut self, ch: char) -> Result<(), MatchError> {
        let ink = self.table.ink_count(ch)?;
        if self.active.insert(ch) {
            self.buckets.entry(ink).or_default().insert(ch);
            log::debug!("+{ch:?} (encre {ink})");
        }
        Ok(())
    }

    /// Deactivate `ch`, dropping its bucket once empty.
    ///
    /// Absent or unsupported characters are ignored.
    pub fn remove(&mut self, ch: char) {
        if !self.active.remove(&ch) {
            return;
        }
        let Ok(ink) = self.table.ink_count(ch) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(&ink) {
            bucket.remove(&ch);
            if bucket.is_empty() {
                self.buckets.remove(&ink);
            }
        }
        log::debug!("-{ch:?} (encre {ink})");
    }

    /// Activate every character of `range` (bounds in either order).
    ///
    /// # Errors
    /// [`MatchError::UnsupportedGlyph`] if a bound is outside the repertoire;
    /// nothing is added in that case.
    pub fn add_range(&mut self, range: RangeInclusive<char>) -> Result<(), MatchError> {
        let range = ordered(range);
        for bound in [*range.start(), *range.end()] {
            if !is_supported(bound) {
                return Err(MatchError::UnsupportedGlyph(bound));
            }
        }
        for ch in range {
            self.add(ch)?;
        }
        Ok(())
    }

    /// Deactivate every character of `range` (bounds in either order).
    pub fn remove_range(&mut self, range: RangeInclusive<char>) {
        for ch in ordered(range) {
            self.remove(ch);
        }
    }

    /// Active characters in ascending code order.
    #[must_use]
    pub fn active_characters(&self) -> &BTreeSet<char> {
        &self.active
    }

    /// Whether `ch` is active.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.active.contains(&ch)
    }

    /// Number of active characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no character is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of distinct brightness buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Lowest and highest active brightness scores.
    #[must_use]
    pub fn score_range(&self) -> Option<(f64, f64)> {
        let (&lo, _) = self.buckets.first_key_value()?;
        let (&hi, _) = self.buckets.last_key_value()?;
        Some((self.table.score(lo), self.table.score(hi)))
    }

    /// Active character whose brightness is closest to `target`.
    ///
    /// `target` is a region brightness in [0, 1] (0 = darkest); values outside
    /// are clamped and NaN counts as 0. It is first rescaled onto the range of
    /// scores currently active, so 0 always reaches the sparsest active bucket
    /// and 1 the densest. Between the floor and ceiling buckets the closer one
    /// wins, the floor on an exact tie; inside a bucket the lowest code wins.
    ///
    /// # Errors
    /// [`MatchError::EmptyActiveSet`] when no character is active.
    pub fn match_brightness(&self, target: f64) -> Result<char, MatchError> {
        let (Some((&lo, _)), Some((&hi, _))) =
            (self.buckets.first_key_value(), self.buckets.last_key_value())
        else {
            return Err(MatchError::EmptyActiveSet);
        };

        let t = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, 1.0)
        };

        // Ink counts are scores scaled by the pixel area; the arithmetic is
        // done in count space so bucket keys stay exact integers.
        let (lo_f, hi_f) = (f64::from(lo), f64::from(hi));
        let adjusted = (lo_f + t * (hi_f - lo_f)).clamp(lo_f, hi_f);

        let floor = self
            .buckets
            .range(..=adjusted.floor() as u32)
            .next_back()
            .ok_or(MatchError::EmptyActiveSet)?;
        let ceiling = self
            .buckets
            .range(adjusted.ceil() as u32..)
            .next()
            .ok_or(MatchError::EmptyActiveSet)?;

        let below = adjusted - f64::from(*floor.0);
        let above = f64::from(*ceiling.0) - adjusted;
        let (_, bucket) = if below <= above { floor } else { ceiling };

        bucket.first().copied().ok_or(MatchError::EmptyActiveSet)
    }
}

fn ordered(range: RangeInclusive<char>) -> RangeInclusive<char> {
    let (a, b) = range.into_inner();
    a.min(b)..=a.max(b)
}
