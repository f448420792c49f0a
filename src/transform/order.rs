//! Restoring the canonical order of multi-part locations

use crate::location::{Interval, Location};

/// Reorder the elements of a multi-part location into biological order
///
/// Applies when every element sits on one sequence with one orientation:
/// ascending by start on the plus strand (unknown and both-strand count as
/// plus), descending by start on the minus strand. Nested parts of a `Mix`
/// are corrected too. Returns whether anything moved; locations on several
/// sequences or with mixed strands are left unchanged, nested parts included.
pub fn correct_interval_order(location: &mut Location) -> bool {
    let minus = location.is_minus();
    let single_id = location.single_id().is_some();
    match location {
        Location::Point(_) | Location::Interval(_) => false,
        Location::PackedPoints(pp) => {
            let descending = pp.strand.is_minus();
            reorder(&mut pp.points, |p| *p, descending)
        }
        Location::PackedIntervals(ivs) => {
            let Some(descending) = orientation(minus, single_id) else {
                return false;
            };
            reorder(ivs, Interval::start, descending)
        }
        Location::Mix(parts) => {
            let Some(descending) = orientation(minus, single_id) else {
                return false;
            };
            let nested = parts
                .iter_mut()
                .fold(false, |changed, part| correct_interval_order(part) || changed);
            let key = |part: &Location| {
                if descending {
                    part.high().unwrap_or(0)
                } else {
                    part.low().unwrap_or(0)
                }
            };
            reorder(parts, key, descending) || nested
        }
    }
}

fn orientation(minus: Option<bool>, single_id: bool) -> Option<bool> {
    if !single_id {
        log::debug!("not reordering a location that spans several sequences");
        return None;
    }
    if minus.is_none() {
        log::warn!("not reordering a location with mixed strands");
    }
    minus
}

/// Stable sort by `key`; returns false when already in order
fn reorder<T>(items: &mut [T], key: impl Fn(&T) -> u64, descending: bool) -> bool {
    let in_order = items.windows(2).all(|w| {
        if descending {
            key(&w[0]) >= key(&w[1])
        } else {
            key(&w[0]) <= key(&w[1])
        }
    });
    if in_order {
        return false;
    }
    if descending {
        items.sort_by(|a, b| key(b).cmp(&key(a)));
    } else {
        items.sort_by_key(|item| key(item));
    }
    true
}
