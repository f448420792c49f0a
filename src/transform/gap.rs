//! Splitting a location around a gap of unknown residues

use crate::coords::SeqRange;
use crate::error::LocEditError;
use crate::location::{Interval, Location, PackedPoints, SeqId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Options controlling [`split_for_gap`]
///
/// ```
/// use ferro_locedit::transform::GapSplitOptions;
///
/// let opts = GapSplitOptions::SPLIT_IN_EXON | GapSplitOptions::MAKE_PARTIAL;
/// assert!(opts.contains(GapSplitOptions::MAKE_PARTIAL));
/// assert!(!opts.contains(GapSplitOptions::SPLIT_IN_INTRON));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GapSplitOptions(u8);

impl GapSplitOptions {
    pub const NONE: Self = Self(0);
    /// Mark the ends created at the gap as partial
    pub const MAKE_PARTIAL: Self = Self(1);
    /// Allow cutting through an interval that spans the gap
    pub const SPLIT_IN_EXON: Self = Self(1 << 1);
    /// Allow separating elements when the gap falls between them
    pub const SPLIT_IN_INTRON: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Look up a single option by name (`make-partial`, `split-in-exon`, `split-in-intron`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "make-partial" | "partial" => Some(Self::MAKE_PARTIAL),
            "split-in-exon" | "exon" => Some(Self::SPLIT_IN_EXON),
            "split-in-intron" | "intron" => Some(Self::SPLIT_IN_INTRON),
            _ => None,
        }
    }
}

impl BitOr for GapSplitOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for GapSplitOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for GapSplitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Self::MAKE_PARTIAL, "make-partial"),
            (Self::SPLIT_IN_EXON, "split-in-exon"),
            (Self::SPLIT_IN_INTRON, "split-in-intron"),
        ]
        .iter()
        .filter(|(opt, _)| self.contains(*opt))
        .map(|(_, name)| *name)
        .collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}

/// The two halves produced by [`split_for_gap`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GapSplit {
    /// Everything at coordinates below the gap
    pub before: Option<Location>,
    /// Everything at coordinates above the gap
    pub after: Option<Location>,
}

#[derive(Debug, Default)]
struct SplitFlags {
    split_leaf: bool,
    clipped_before: bool,
    clipped_after: bool,
}

type Halves<T> = (Option<T>, Option<T>);

/// Split a location around the gap `[gap_from, gap_to]` on sequence `target`
///
/// Elements below the gap land in `before`, elements above it in `after`,
/// each side keeping list order and strand; residues inside the gap are
/// dropped. An interval reaching into the gap from one side is clipped.
///
/// An interval spanning the whole gap is cut in two only with
/// [`GapSplitOptions::SPLIT_IN_EXON`]; otherwise it stays whole on the side
/// holding more of it. When the gap falls between elements so that both
/// sides are non-empty without an interval being cut,
/// [`GapSplitOptions::SPLIT_IN_INTRON`] is required; without it the split
/// is refused and `before` holds the unchanged location.
///
/// With [`GapSplitOptions::MAKE_PARTIAL`], the end of `before` and the start
/// of `after` that face the gap are marked partial.
///
/// # Errors
///
/// Returns [`LocEditError::InvalidRange`] when `gap_from > gap_to` or the
/// location itself holds an inverted interval.
pub fn split_for_gap(
    location: &Location,
    gap_from: u64,
    gap_to: u64,
    target: &SeqId,
    options: GapSplitOptions,
) -> Result<GapSplit, LocEditError> {
    let gap = SeqRange::new(gap_from, gap_to)?;
    location.validate()?;

    if !location.references(target) {
        return Ok(GapSplit {
            before: Some(location.clone()),
            after: None,
        });
    }

    let mut flags = SplitFlags::default();
    let in_exon = options.contains(GapSplitOptions::SPLIT_IN_EXON);
    let (mut before, mut after) = split_location(location, gap, target, in_exon, &mut flags);

    let both = before.is_some() && after.is_some();
    if both && !flags.split_leaf && !options.contains(GapSplitOptions::SPLIT_IN_INTRON) {
        log::warn!(
            "gap {} falls between parts of {}; not splitting without split-in-intron",
            gap,
            location
        );
        return Ok(GapSplit {
            before: Some(location.clone()),
            after: None,
        });
    }

    if options.contains(GapSplitOptions::MAKE_PARTIAL) {
        if let Some(b) = before.as_mut() {
            if both || flags.clipped_before {
                mark_high_partial(b);
            }
        }
        if let Some(a) = after.as_mut() {
            if both || flags.clipped_after {
                mark_low_partial(a);
            }
        }
    }

    Ok(GapSplit { before, after })
}

fn mark_high_partial(loc: &mut Location) {
    if loc.is_minus() == Some(true) {
        loc.set_partial_start(true);
    } else {
        loc.set_partial_stop(true);
    }
}

fn mark_low_partial(loc: &mut Location) {
    if loc.is_minus() == Some(true) {
        loc.set_partial_stop(true);
    } else {
        loc.set_partial_start(true);
    }
}

fn split_interval(
    iv: &Interval,
    gap: SeqRange,
    in_exon: bool,
    flags: &mut SplitFlags,
) -> Halves<Interval> {
    if iv.to < gap.from {
        return (Some(iv.clone()), None);
    }
    if iv.from > gap.to {
        return (None, Some(iv.clone()));
    }

    let low = (iv.from < gap.from).then(|| {
        let mut piece = iv.clone();
        piece.to = gap.from - 1;
        piece.set_partial_high(false);
        piece
    });
    let high = (iv.to > gap.to).then(|| {
        let mut piece = iv.clone();
        piece.from = gap.to + 1;
        piece.set_partial_low(false);
        piece
    });

    match (low, high) {
        (Some(low), Some(high)) => {
            if in_exon {
                flags.split_leaf = true;
                (Some(low), Some(high))
            } else if low.len() >= high.len() {
                (Some(iv.clone()), None)
            } else {
                (None, Some(iv.clone()))
            }
        }
        (Some(low), None) => {
            flags.clipped_before = true;
            (Some(low), None)
        }
        (None, Some(high)) => {
            flags.clipped_after = true;
            (None, Some(high))
        }
        (None, None) => (None, None),
    }
}

fn split_points(pp: &PackedPoints, gap: SeqRange) -> Halves<Location> {
    let side = |keep: &dyn Fn(u64) -> bool| {
        let points: Vec<u64> = pp.points.iter().copied().filter(|p| keep(*p)).collect();
        (!points.is_empty()).then(|| {
            Location::PackedPoints(PackedPoints {
                id: pp.id.clone(),
                points,
                strand: pp.strand,
            })
        })
    };
    (side(&|p| p < gap.from), side(&|p| p > gap.to))
}

/// Distribute list elements over the two sides
///
/// `split_one` returns `None` for elements not on the gapped sequence;
/// those follow the side of the element before them in the list (or, at
/// the front, the side of the first element that does get split).
fn split_elements<T: Clone>(
    items: &[T],
    mut split_one: impl FnMut(&T) -> Option<Halves<T>>,
) -> (Vec<T>, Vec<T>) {
    let results: Vec<Option<Halves<T>>> = items.iter().map(&mut split_one).collect();
    let mut on_after_side = results
        .iter()
        .flatten()
        .next()
        .is_some_and(|(before, _)| before.is_none());

    let mut before = Vec::new();
    let mut after = Vec::new();
    for (item, result) in items.iter().zip(results) {
        match result {
            Some((b, a)) => {
                let has_before = b.is_some();
                before.extend(b);
                if let Some(a) = a {
                    after.push(a);
                    on_after_side = true;
                } else if has_before {
                    on_after_side = false;
                }
            }
            None if on_after_side => after.push(item.clone()),
            None => before.push(item.clone()),
        }
    }
    (before, after)
}

fn collapse_intervals(mut ivs: Vec<Interval>) -> Option<Location> {
    match ivs.len() {
        0 => None,
        1 => ivs.pop().map(Location::Interval),
        _ => Some(Location::PackedIntervals(ivs)),
    }
}

fn collapse_parts(mut parts: Vec<Location>) -> Option<Location> {
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Location::Mix(parts)),
    }
}

fn split_location(
    loc: &Location,
    gap: SeqRange,
    target: &SeqId,
    in_exon: bool,
    flags: &mut SplitFlags,
) -> Halves<Location> {
    match loc {
        Location::Point(p) => {
            if p.id != *target || p.position < gap.from {
                (Some(loc.clone()), None)
            } else if p.position > gap.to {
                (None, Some(loc.clone()))
            } else {
                (None, None)
            }
        }
        Location::Interval(iv) => {
            if iv.id != *target {
                return (Some(loc.clone()), None);
            }
            let (b, a) = split_interval(iv, gap, in_exon, flags);
            (b.map(Location::Interval), a.map(Location::Interval))
        }
        Location::PackedPoints(pp) => {
            if pp.id != *target {
                return (Some(loc.clone()), None);
            }
            split_points(pp, gap)
        }
        Location::PackedIntervals(ivs) => {
            let (before, after) = split_elements(ivs, |iv| {
                (iv.id == *target).then(|| split_interval(iv, gap, in_exon, flags))
            });
            (collapse_intervals(before), collapse_intervals(after))
        }
        Location::Mix(parts) => {
            let (before, after) = split_elements(parts, |part| {
                part.references(target)
                    .then(|| split_location(part, gap, target, in_exon, flags))
            });
            (collapse_parts(before), collapse_parts(after))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Strand;

    fn id() -> SeqId {
        SeqId::from("nuc1")
    }

    fn iv(from: u64, to: u64) -> Interval {
        Interval::new("nuc1", from, to).unwrap()
    }

    #[test]
    fn test_options_display_and_names() {
        assert_eq!(GapSplitOptions::NONE.to_string(), "none");
        assert_eq!(
            GapSplitOptions::ALL.to_string(),
            "make-partial|split-in-exon|split-in-intron"
        );
        assert_eq!(
            GapSplitOptions::from_name("split_in_exon"),
            Some(GapSplitOptions::SPLIT_IN_EXON)
        );
        assert_eq!(GapSplitOptions::from_name("bogus"), None);

        let mut opts = GapSplitOptions::NONE;
        opts |= GapSplitOptions::SPLIT_IN_INTRON;
        assert!(opts.contains(GapSplitOptions::SPLIT_IN_INTRON));
    }

    #[test]
    fn test_spanning_interval_without_exon_split_stays_whole() {
        let loc = Location::Interval(iv(10, 50));
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::SPLIT_IN_INTRON).unwrap();
        assert_eq!(split.before, None);
        assert_eq!(split.after, Some(loc.clone()));

        let split = split_for_gap(&loc, 40, 44, &id(), GapSplitOptions::NONE).unwrap();
        assert_eq!(split.before, Some(loc));
        assert_eq!(split.after, None);
    }

    #[test]
    fn test_intron_split_refused_without_option() {
        let loc = Location::PackedIntervals(vec![iv(10, 30), iv(50, 70)]);
        let split = split_for_gap(&loc, 35, 45, &id(), GapSplitOptions::SPLIT_IN_EXON).unwrap();
        assert_eq!(split.before, Some(loc.clone()));
        assert_eq!(split.after, None);

        let split = split_for_gap(&loc, 35, 45, &id(), GapSplitOptions::SPLIT_IN_INTRON).unwrap();
        assert_eq!(split.before, Some(Location::Interval(iv(10, 30))));
        assert_eq!(split.after, Some(Location::Interval(iv(50, 70))));
    }

    #[test]
    fn test_make_partial_marks_facing_ends() {
        let loc = Location::Interval(iv(10, 50).with_strand(Strand::Plus));
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::ALL).unwrap();
        let before = split.before.unwrap();
        let after = split.after.unwrap();
        assert!(!before.is_partial_start());
        assert!(before.is_partial_stop());
        assert!(after.is_partial_start());
        assert!(!after.is_partial_stop());
    }

    #[test]
    fn test_make_partial_minus_strand() {
        let loc = Location::Interval(iv(10, 50).with_strand(Strand::Minus));
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::ALL).unwrap();
        let before = split.before.unwrap();
        let after = split.after.unwrap();
        // the low piece holds the 3' end, the high piece the 5' end
        assert!(before.is_partial_start());
        assert!(!before.is_partial_stop());
        assert!(after.is_partial_stop());
        assert!(!after.is_partial_start());
    }

    #[test]
    fn test_clip_into_gap() {
        let loc = Location::Interval(iv(10, 25).with_strand(Strand::Plus));
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::MAKE_PARTIAL).unwrap();
        let before = split.before.unwrap();
        assert_eq!(before.high(), Some(19));
        assert!(before.is_partial_stop());
        assert_eq!(split.after, None);
    }

    #[test]
    fn test_location_inside_gap_disappears() {
        let loc = Location::Interval(iv(22, 25));
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::ALL).unwrap();
        assert_eq!(split, GapSplit::default());
    }

    #[test]
    fn test_packed_points_split() {
        let loc = Location::packed_points("nuc1", vec![5, 21, 40, 45]);
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::SPLIT_IN_INTRON).unwrap();
        assert_eq!(split.before, Some(Location::packed_points("nuc1", vec![5])));
        assert_eq!(
            split.after,
            Some(Location::packed_points("nuc1", vec![40, 45]))
        );
    }

    #[test]
    fn test_other_sequence_elements_follow_neighbours() {
        let other = Location::interval("nuc2", 0, 9).unwrap();
        let loc = Location::Mix(vec![
            Location::Interval(iv(0, 9)),
            other.clone(),
            Location::Interval(iv(40, 49)),
        ]);
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::SPLIT_IN_INTRON).unwrap();
        assert_eq!(
            split.before,
            Some(Location::Mix(vec![Location::Interval(iv(0, 9)), other]))
        );
        assert_eq!(split.after, Some(Location::Interval(iv(40, 49))));
    }

    #[test]
    fn test_untouched_sequence() {
        let loc = Location::interval("nuc2", 0, 50).unwrap();
        let split = split_for_gap(&loc, 20, 29, &id(), GapSplitOptions::ALL).unwrap();
        assert_eq!(split.before, Some(loc));
        assert_eq!(split.after, None);
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let loc = Location::Interval(iv(10, 50));
        assert!(split_for_gap(&loc, 29, 20, &id(), GapSplitOptions::ALL).is_err());
    }
}
