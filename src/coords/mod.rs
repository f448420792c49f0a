//! Coordinate ranges on a sequence
//!
//! All coordinates in this crate are 0-based and closed: `[from, to]`
//! covers `to - from + 1` residues. Provider residue lookups are the one
//! place that uses 0-based half-open `[start, end)` ranges, and
//! [`SeqRange::to_half_open`] bridges the two.
//!
//! # Examples
//!
//! ```
//! use ferro_locedit::coords::SeqRange;
//!
//! let range = SeqRange::new(10, 19).unwrap();
//! assert_eq!(range.len(), 10);
//! assert_eq!(range.to_half_open(), (10, 20));
//! assert!(SeqRange::new(5, 4).is_err());
//! ```

use crate::error::LocEditError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 0-based closed range `[from, to]` with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeqRange {
    pub from: u64,
    pub to: u64,
}

impl SeqRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: u64, to: u64) -> Result<Self, LocEditError> {
        if from > to {
            return Err(LocEditError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Number of residues covered, saturating at `u64::MAX`
    #[inline]
    pub const fn len(&self) -> u64 {
        (self.to - self.from).saturating_add(1)
    }

    /// A closed range is never empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub const fn contains(&self, pos: u64) -> bool {
        pos >= self.from && pos <= self.to
    }

    /// Whether the two ranges share at least one residue
    #[inline]
    pub const fn overlaps(&self, other: &SeqRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Convert to a 0-based half-open `(start, end)` pair, saturating the end
    #[inline]
    pub const fn to_half_open(&self) -> (u64, u64) {
        (self.from, self.to.saturating_add(1))
    }
}

impl fmt::Display for SeqRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// Mirror a position onto the opposite strand of a sequence of `seq_len` residues
///
/// Returns `None` when the position does not lie on the sequence.
///
/// ```
/// use ferro_locedit::coords::mirror_position;
///
/// assert_eq!(mirror_position(0, 60), Some(59));
/// assert_eq!(mirror_position(59, 60), Some(0));
/// assert_eq!(mirror_position(60, 60), None);
/// ```
#[inline]
pub const fn mirror_position(pos: u64, seq_len: u64) -> Option<u64> {
    if pos < seq_len {
        Some(seq_len - 1 - pos)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = SeqRange::new(20, 10).unwrap_err();
        assert_eq!(err, LocEditError::InvalidRange { from: 20, to: 10 });
    }

    #[test]
    fn test_single_residue_range() {
        let r = SeqRange::new(7, 7).unwrap();
        assert_eq!(r.len(), 1);
        assert!(r.contains(7));
        assert!(!r.contains(8));
    }

    #[test]
    fn test_full_coordinate_space_saturates() {
        let r = SeqRange::new(0, u64::MAX).unwrap();
        assert_eq!(r.len(), u64::MAX);
        assert_eq!(r.to_half_open(), (0, u64::MAX));
        assert_eq!(SeqRange::new(1, u64::MAX).unwrap().len(), u64::MAX);
    }

    #[test]
    fn test_overlaps() {
        let a = SeqRange::new(10, 20).unwrap();
        assert!(a.overlaps(&SeqRange::new(20, 30).unwrap()));
        assert!(a.overlaps(&SeqRange::new(0, 10).unwrap()));
        assert!(a.overlaps(&SeqRange::new(12, 14).unwrap()));
        assert!(!a.overlaps(&SeqRange::new(21, 30).unwrap()));
        assert!(!a.overlaps(&SeqRange::new(0, 9).unwrap()));
    }

    #[test]
    fn test_mirror_round_trip() {
        for pos in 0..10 {
            let m = mirror_position(pos, 10).unwrap();
            assert_eq!(mirror_position(m, 10), Some(pos));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SeqRange::new(3, 5).unwrap().to_string(), "[3, 5]");
    }
}
