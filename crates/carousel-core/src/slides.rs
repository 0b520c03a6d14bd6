//! Slide set and circular index math
//!
//! The rendered strip is an extended track of `len + 2` panels: a copy of the
//! last slide, the real slides, then a copy of the first slide. Track position
//! `p` (where `-1` and `len` are the two copies) sits at offset `-(p + 1)`
//! slide widths, so slide 0 starts one full width in from the left edge.

use crate::{Error, Result};

/// Wrap any integer into `[0, len)`.
///
/// `len` must be non-zero.
#[inline]
pub fn wrap_index(n: i64, len: usize) -> usize {
    let len = len as i64;
    (((n % len) + len) % len) as usize
}

/// Offset, in slide widths, of track position `p`
#[inline]
pub fn offset_for(position: i64) -> f64 {
    -((position + 1) as f64)
}

/// Ordered, non-empty sequence of image references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSet {
    slides: Vec<String>,
}

impl SlideSet {
    /// Create a slide set, refusing an empty one
    pub fn new<I, S>(slides: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slides: Vec<String> = slides.into_iter().map(Into::into).collect();
        if slides.is_empty() {
            return Err(Error::EmptySlideSet);
        }
        Ok(Self { slides })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the set holds no slides
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    #[inline]
    pub fn wrap(&self, n: i64) -> usize {
        wrap_index(n, self.len())
    }

    /// Whether `n` names a real slide
    #[inline]
    pub fn contains(&self, n: usize) -> bool {
        n < self.len()
    }

    /// Track positions of the extended track, left to right: `-1..=len`
    pub fn positions(&self) -> std::ops::RangeInclusive<i64> {
        -1..=self.len() as i64
    }

    /// Image shown at track position `p` (`-1..=len`)
    pub fn at_position(&self, position: i64) -> &str {
        &self.slides[self.wrap(position)]
    }
}
