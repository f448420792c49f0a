//! Inserting residues into a sequence

use crate::coords::SeqRange;
use crate::error::LocEditError;
use crate::location::{Interval, Location, SeqId};

/// Adjust a location for residues inserted at `[insert_from, insert_to]` on `target`
///
/// Every coordinate at or after `insert_from` moves right by the length of
/// the insertion; earlier coordinates stay put. An interval containing the
/// insertion point therefore grows. Nothing is ever removed.
///
/// # Errors
///
/// Returns [`LocEditError::InvalidRange`] when `insert_from > insert_to` or the
/// location itself holds an inverted interval, and
/// [`LocEditError::CoordinateOverflow`] when a shifted coordinate would pass
/// `u64::MAX`.
pub fn adjust_for_insert(
    location: &Location,
    insert_from: u64,
    insert_to: u64,
    target: &SeqId,
) -> Result<Location, LocEditError> {
    let insert = SeqRange::new(insert_from, insert_to)?;
    location.validate()?;
    let mut shifted = location.clone();
    insert_location(&mut shifted, insert, target)?;
    Ok(shifted)
}

fn shift(pos: &mut u64, insert: SeqRange) -> Result<bool, LocEditError> {
    if *pos < insert.from {
        return Ok(false);
    }
    let len = insert.len();
    *pos = pos
        .checked_add(len)
        .ok_or(LocEditError::CoordinateOverflow {
            position: *pos,
            shift: len,
        })?;
    Ok(true)
}

fn insert_interval(
    iv: &mut Interval,
    insert: SeqRange,
    target: &SeqId,
) -> Result<bool, LocEditError> {
    if iv.id != *target {
        return Ok(false);
    }
    let from_moved = shift(&mut iv.from, insert)?;
    let to_moved = shift(&mut iv.to, insert)?;
    Ok(from_moved || to_moved)
}

/// Shift a location in place; returns whether anything moved
pub(crate) fn insert_location(
    loc: &mut Location,
    insert: SeqRange,
    target: &SeqId,
) -> Result<bool, LocEditError> {
    match loc {
        Location::Point(p) if p.id == *target => shift(&mut p.position, insert),
        Location::Point(_) => Ok(false),
        Location::Interval(iv) => insert_interval(iv, insert, target),
        Location::PackedPoints(pp) => {
            if pp.id != *target {
                return Ok(false);
            }
            pp.points
                .iter_mut()
                .try_fold(false, |moved, pos| Ok(shift(pos, insert)? || moved))
        }
        Location::PackedIntervals(ivs) => ivs.iter_mut().try_fold(false, |moved, iv| {
            Ok(insert_interval(iv, insert, target)? || moved)
        }),
        Location::Mix(parts) => parts.iter_mut().try_fold(false, |moved, part| {
            Ok(insert_location(part, insert, target)? || moved)
        }),
    }
}
