//! Removing a range of residues from a sequence

use crate::coords::SeqRange;
use crate::error::LocEditError;
use crate::location::{Interval, Location, SeqId};

/// Result of [`adjust_for_trim`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOutcome {
    /// The surviving location, or `None` when the trim removed all of it
    pub location: Option<Location>,
    /// Residues removed in front of the biological start
    pub left_trim_amount: u64,
    /// Whether any coordinate changed
    pub adjusted: bool,
}

impl TrimOutcome {
    /// True when nothing of the location survived
    pub fn is_cut(&self) -> bool {
        self.location.is_none()
    }
}

/// Per-element bookkeeping while trimming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Trimmed {
    pub removed: bool,
    /// Bases removed from the 5' side of this element (all of it when removed)
    pub trimmed5: u64,
    pub adjusted: bool,
}

/// Adjust a location for the removal of `[trim_from, trim_to]` from sequence `target`
///
/// Elements wholly inside the range are deleted, elements after it shift
/// left by the range length and elements straddling it are clipped.
/// Elements on other sequences are untouched. Multi-part locations drop
/// deleted elements and collapse to a single element when one remains.
///
/// `left_trim_amount` sums the bases removed from the biologically leading
/// elements: every deleted leading element plus the 5' clip of the first
/// survivor.
///
/// # Errors
///
/// Returns [`LocEditError::InvalidRange`] when `trim_from > trim_to` or the
/// location itself holds an inverted interval.
pub fn adjust_for_trim(
    location: &Location,
    trim_from: u64,
    trim_to: u64,
    target: &SeqId,
) -> Result<TrimOutcome, LocEditError> {
    let cut = SeqRange::new(trim_from, trim_to)?;
    location.validate()?;

    let mut trimmed = location.clone();
    let result = trim_location(&mut trimmed, cut, target);
    Ok(TrimOutcome {
        location: (!result.removed).then_some(trimmed),
        left_trim_amount: result.trimmed5,
        adjusted: result.adjusted || result.removed,
    })
}

fn trim_interval(iv: &mut Interval, cut: SeqRange) -> Trimmed {
    let num_cut = cut.len();
    if iv.to < cut.from {
        return Trimmed::default();
    }
    if iv.from > cut.to {
        iv.from -= num_cut;
        iv.to -= num_cut;
        return Trimmed {
            adjusted: true,
            ..Trimmed::default()
        };
    }
    if iv.from >= cut.from && iv.to <= cut.to {
        return Trimmed {
            removed: true,
            trimmed5: iv.len(),
            adjusted: true,
        };
    }

    let (left_removed, right_removed) = if iv.from < cut.from && iv.to > cut.to {
        iv.to -= num_cut;
        (0, 0)
    } else if iv.from >= cut.from {
        let removed = cut.to - iv.from + 1;
        iv.from = cut.from;
        iv.to -= num_cut;
        (removed, 0)
    } else {
        let removed = iv.to - cut.from + 1;
        iv.to = cut.from - 1;
        (0, removed)
    };

    Trimmed {
        removed: false,
        trimmed5: if iv.is_minus() {
            right_removed
        } else {
            left_removed
        },
        adjusted: true,
    }
}

/// Fold per-element results, walking elements in biological order
fn combine(order: &[usize], results: &[Trimmed]) -> Trimmed {
    let mut trimmed5 = 0;
    for &i in order {
        trimmed5 += results[i].trimmed5;
        if !results[i].removed {
            break;
        }
    }
    Trimmed {
        removed: results.iter().all(|r| r.removed),
        trimmed5,
        adjusted: results.iter().any(|r| r.adjusted),
    }
}

/// Keep the elements whose result says they survived
fn retain_survivors<T>(items: &mut Vec<T>, results: &[Trimmed]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !results[index].removed;
        index += 1;
        keep
    });
}

pub(crate) fn trim_location(loc: &mut Location, cut: SeqRange, target: &SeqId) -> Trimmed {
    let order = loc.biological_order();
    let num_cut = cut.len();
    match loc {
        Location::Point(p) => {
            if p.id != *target || p.position < cut.from {
                Trimmed::default()
            } else if p.position <= cut.to {
                Trimmed {
                    removed: true,
                    trimmed5: 1,
                    adjusted: true,
                }
            } else {
                p.position -= num_cut;
                Trimmed {
                    adjusted: true,
                    ..Trimmed::default()
                }
            }
        }
        Location::Interval(iv) => {
            if iv.id != *target {
                return Trimmed::default();
            }
            trim_interval(iv, cut)
        }
        Location::PackedPoints(pp) => {
            if pp.id != *target {
                return Trimmed::default();
            }
            let before = pp.points.clone();
            pp.points.retain(|pos| !cut.contains(*pos));
            let minus = pp.strand.is_minus();
            // removed points ahead of the first survivor in biological order
            let first_kept = if minus {
                pp.points.iter().copied().max()
            } else {
                pp.points.iter().copied().min()
            };
            let trimmed5 = before
                .iter()
                .filter(|pos| cut.contains(**pos))
                .filter(|pos| match first_kept {
                    Some(kept) if minus => **pos > kept,
                    Some(kept) => **pos < kept,
                    None => true,
                })
                .count() as u64;
            for pos in pp.points.iter_mut().filter(|pos| **pos > cut.to) {
                *pos -= num_cut;
            }
            Trimmed {
                removed: pp.points.is_empty(),
                trimmed5,
                adjusted: pp.points != before,
            }
        }
        Location::PackedIntervals(ivs) => {
            let results: Vec<Trimmed> = ivs
                .iter_mut()
                .map(|iv| {
                    if iv.id == *target {
                        trim_interval(iv, cut)
                    } else {
                        Trimmed::default()
                    }
                })
                .collect();
            let combined = combine(&order, &results);
            retain_survivors(ivs, &results);
            if ivs.len() == 1 {
                if let Some(only) = ivs.pop() {
                    *loc = Location::Interval(only);
                }
            }
            combined
        }
        Location::Mix(parts) => {
            let results: Vec<Trimmed> = parts
                .iter_mut()
                .map(|part| trim_location(part, cut, target))
                .collect();
            let combined = combine(&order, &results);
            retain_survivors(parts, &results);
            if parts.len() == 1 {
                if let Some(only) = parts.pop() {
                    *loc = only;
                }
            }
            combined
        }
    }
}
