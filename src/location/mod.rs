//! Sequence locations
//!
//! A [`Location`] is one of five shapes: a single [`Point`], a single
//! [`Interval`], [`PackedPoints`] on one sequence, a list of intervals
//! (`PackedIntervals`), or a `Mix` of nested locations that may span
//! several sequences.
//!
//! Multi-part locations carry no explicit orientation of their own. Their
//! biological 5' and 3' elements are derived:
//!
//! - when every element sits on the same sequence with the same
//!   orientation, by coordinate (lowest start first on the plus strand,
//!   highest first on the minus strand);
//! - otherwise by list order, so trans-spliced locations read front to back.
//!
//! Location-level partial flags are the flags of those derived elements.

mod display;
mod element;

pub use element::{Interval, PackedPoints, Point, SeqId, Strand};

use crate::error::LocEditError;
use serde::{Deserialize, Serialize};

/// A location on one or more sequences
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Point(Point),
    Interval(Interval),
    PackedPoints(PackedPoints),
    PackedIntervals(Vec<Interval>),
    Mix(Vec<Location>),
}

/// One contiguous residue span of a location, as yielded by [`Location::leaves`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub id: &'a SeqId,
    pub from: u64,
    pub to: u64,
    pub strand: Strand,
}

struct ElementKey<'a> {
    id: Option<&'a SeqId>,
    minus: Option<bool>,
    start: Option<u64>,
}

fn push_unique<'a>(out: &mut Vec<&'a SeqId>, id: &'a SeqId) {
    if !out.contains(&id) {
        out.push(id);
    }
}

/// Indices of `keys` in biological order
fn order_elements(keys: &[ElementKey<'_>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    let Some(first) = keys.first() else {
        return order;
    };
    let same_id = first.id.is_some() && keys.iter().all(|k| k.id == first.id);
    let same_orientation = first.minus.is_some() && keys.iter().all(|k| k.minus == first.minus);
    if !same_id || !same_orientation || keys.iter().any(|k| k.start.is_none()) {
        return order;
    }
    if first.minus == Some(true) {
        order.sort_by(|&a, &b| keys[b].start.cmp(&keys[a].start));
    } else {
        order.sort_by_key(|&i| keys[i].start);
    }
    order
}

impl Location {
    /// A single interval with unknown strand
    pub fn interval(id: impl Into<SeqId>, from: u64, to: u64) -> Result<Self, LocEditError> {
        Ok(Location::Interval(Interval::new(id, from, to)?))
    }

    pub fn point(id: impl Into<SeqId>, position: u64) -> Self {
        Location::Point(Point::new(id, position))
    }

    pub fn packed_points(id: impl Into<SeqId>, points: Vec<u64>) -> Self {
        Location::PackedPoints(PackedPoints::new(id, points))
    }

    pub fn packed_intervals(intervals: Vec<Interval>) -> Self {
        Location::PackedIntervals(intervals)
    }

    pub fn mix(parts: Vec<Location>) -> Self {
        Location::Mix(parts)
    }

    /// Set the strand of every element
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.set_strand(strand);
        self
    }

    pub fn set_strand(&mut self, strand: Strand) {
        match self {
            Location::Point(p) => p.strand = strand,
            Location::Interval(iv) => iv.strand = strand,
            Location::PackedPoints(pp) => pp.strand = strand,
            Location::PackedIntervals(ivs) => ivs.iter_mut().for_each(|iv| iv.strand = strand),
            Location::Mix(parts) => parts.iter_mut().for_each(|p| p.set_strand(strand)),
        }
    }

    /// Check structural invariants: `from <= to` everywhere and no empty containers
    pub fn validate(&self) -> Result<(), LocEditError> {
        match self {
            Location::Point(_) => Ok(()),
            Location::Interval(iv) => iv.validate(),
            Location::PackedPoints(pp) => {
                if pp.points.is_empty() {
                    return Err(LocEditError::invalid_location("packed points without points"));
                }
                Ok(())
            }
            Location::PackedIntervals(ivs) => {
                if ivs.is_empty() {
                    return Err(LocEditError::invalid_location(
                        "packed intervals without intervals",
                    ));
                }
                ivs.iter().try_for_each(Interval::validate)
            }
            Location::Mix(parts) => {
                if parts.is_empty() {
                    return Err(LocEditError::invalid_location("mix without parts"));
                }
                parts.iter().try_for_each(Location::validate)
            }
        }
    }

    /// Whether this location is made of several elements
    pub fn is_multi_part(&self) -> bool {
        matches!(self, Location::PackedIntervals(_) | Location::Mix(_))
    }

    /// Distinct sequence ids in order of first appearance
    pub fn ids(&self) -> Vec<&SeqId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a SeqId>) {
        match self {
            Location::Point(p) => push_unique(out, &p.id),
            Location::Interval(iv) => push_unique(out, &iv.id),
            Location::PackedPoints(pp) => push_unique(out, &pp.id),
            Location::PackedIntervals(ivs) => ivs.iter().for_each(|iv| push_unique(out, &iv.id)),
            Location::Mix(parts) => parts.iter().for_each(|p| p.collect_ids(out)),
        }
    }

    /// The only sequence id referenced, if there is exactly one
    pub fn single_id(&self) -> Option<&SeqId> {
        let ids = self.ids();
        match ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Whether any element references `id`
    pub fn references(&self, id: &SeqId) -> bool {
        self.ids().contains(&id)
    }

    /// The strand shared by every element, or `None` when they disagree
    pub fn strand(&self) -> Option<Strand> {
        let mut strands = Vec::new();
        self.collect_strands(&mut strands);
        let first = *strands.first()?;
        strands.iter().all(|s| *s == first).then_some(first)
    }

    fn collect_strands(&self, out: &mut Vec<Strand>) {
        match self {
            Location::Point(p) => out.push(p.strand),
            Location::Interval(iv) => out.push(iv.strand),
            Location::PackedPoints(pp) => out.push(pp.strand),
            Location::PackedIntervals(ivs) => out.extend(ivs.iter().map(|iv| iv.strand)),
            Location::Mix(parts) => parts.iter().for_each(|p| p.collect_strands(out)),
        }
    }

    /// `Some(true)` when every element is on the minus strand, `Some(false)`
    /// when none is, `None` for a mixture.
    ///
    /// Unknown and both-strand elements read like plus-strand ones.
    pub fn is_minus(&self) -> Option<bool> {
        let mut strands = Vec::new();
        self.collect_strands(&mut strands);
        let first = strands.first()?.is_minus();
        strands
            .iter()
            .all(|s| s.is_minus() == first)
            .then_some(first)
    }

    /// Lowest coordinate covered
    pub fn low(&self) -> Option<u64> {
        match self {
            Location::Point(p) => Some(p.position),
            Location::Interval(iv) => Some(iv.from),
            Location::PackedPoints(pp) => pp.points.iter().copied().min(),
            Location::PackedIntervals(ivs) => ivs.iter().map(|iv| iv.from).min(),
            Location::Mix(parts) => parts.iter().filter_map(Location::low).min(),
        }
    }

    /// Highest coordinate covered
    pub fn high(&self) -> Option<u64> {
        match self {
            Location::Point(p) => Some(p.position),
            Location::Interval(iv) => Some(iv.to),
            Location::PackedPoints(pp) => pp.points.iter().copied().max(),
            Location::PackedIntervals(ivs) => ivs.iter().map(|iv| iv.to).max(),
            Location::Mix(parts) => parts.iter().filter_map(Location::high).max(),
        }
    }

    /// Positional extreme that plays the role of the start for this orientation
    fn oriented_start(&self) -> Option<u64> {
        match self.is_minus()? {
            true => self.high(),
            false => self.low(),
        }
    }

    /// Element indices of a multi-part location in biological order
    ///
    /// Single-element shapes yield `[0]`.
    pub fn biological_order(&self) -> Vec<usize> {
        match self {
            Location::PackedIntervals(ivs) => {
                let keys: Vec<ElementKey<'_>> = ivs
                    .iter()
                    .map(|iv| ElementKey {
                        id: Some(&iv.id),
                        minus: Some(iv.is_minus()),
                        start: Some(iv.start()),
                    })
                    .collect();
                order_elements(&keys)
            }
            Location::Mix(parts) => {
                let keys: Vec<ElementKey<'_>> = parts
                    .iter()
                    .map(|p| ElementKey {
                        id: p.single_id(),
                        minus: p.is_minus(),
                        start: p.oriented_start(),
                    })
                    .collect();
                order_elements(&keys)
            }
            _ => vec![0],
        }
    }

    /// Index of the biologically first element of a multi-part location
    pub(crate) fn first_index(&self) -> Option<usize> {
        self.biological_order().first().copied()
    }

    /// Index of the biologically last element of a multi-part location
    pub(crate) fn last_index(&self) -> Option<usize> {
        self.biological_order().last().copied()
    }

    /// Biological start coordinate
    pub fn start(&self) -> Option<u64> {
        match self {
            Location::Point(p) => Some(p.position),
            Location::Interval(iv) => Some(iv.start()),
            Location::PackedPoints(pp) => {
                if pp.strand.is_minus() {
                    self.high()
                } else {
                    self.low()
                }
            }
            Location::PackedIntervals(ivs) => ivs.get(self.first_index()?).map(Interval::start),
            Location::Mix(parts) => parts.get(self.first_index()?)?.start(),
        }
    }

    /// Biological stop coordinate
    pub fn stop(&self) -> Option<u64> {
        match self {
            Location::Point(p) => Some(p.position),
            Location::Interval(iv) => Some(iv.stop()),
            Location::PackedPoints(pp) => {
                if pp.strand.is_minus() {
                    self.low()
                } else {
                    self.high()
                }
            }
            Location::PackedIntervals(ivs) => ivs.get(self.last_index()?).map(Interval::stop),
            Location::Mix(parts) => parts.get(self.last_index()?)?.stop(),
        }
    }

    /// Sequence id of the biologically first element
    pub fn first_id(&self) -> Option<&SeqId> {
        self.leaves().first().map(|leaf| leaf.id)
    }

    /// Sequence id of the biologically last element
    pub fn last_id(&self) -> Option<&SeqId> {
        self.leaves().last().map(|leaf| leaf.id)
    }

    pub fn is_partial_start(&self) -> bool {
        match self {
            Location::Point(p) => p.partial,
            Location::Interval(iv) => iv.partial_start,
            Location::PackedPoints(_) => false,
            Location::PackedIntervals(ivs) => self
                .first_index()
                .and_then(|i| ivs.get(i))
                .is_some_and(|iv| iv.partial_start),
            Location::Mix(parts) => self
                .first_index()
                .and_then(|i| parts.get(i))
                .is_some_and(Location::is_partial_start),
        }
    }

    pub fn is_partial_stop(&self) -> bool {
        match self {
            Location::Point(p) => p.partial,
            Location::Interval(iv) => iv.partial_stop,
            Location::PackedPoints(_) => false,
            Location::PackedIntervals(ivs) => self
                .last_index()
                .and_then(|i| ivs.get(i))
                .is_some_and(|iv| iv.partial_stop),
            Location::Mix(parts) => self
                .last_index()
                .and_then(|i| parts.get(i))
                .is_some_and(Location::is_partial_stop),
        }
    }

    /// Set the partial flag of the biological start. No-op on packed points.
    pub fn set_partial_start(&mut self, value: bool) {
        let first = self.first_index();
        match self {
            Location::Point(p) => p.partial = value,
            Location::Interval(iv) => iv.partial_start = value,
            Location::PackedPoints(_) => {}
            Location::PackedIntervals(ivs) => {
                if let Some(iv) = first.and_then(|i| ivs.get_mut(i)) {
                    iv.partial_start = value;
                }
            }
            Location::Mix(parts) => {
                if let Some(part) = first.and_then(|i| parts.get_mut(i)) {
                    part.set_partial_start(value);
                }
            }
        }
    }

    /// Set the partial flag of the biological stop. No-op on packed points.
    pub fn set_partial_stop(&mut self, value: bool) {
        let last = self.last_index();
        match self {
            Location::Point(p) => p.partial = value,
            Location::Interval(iv) => iv.partial_stop = value,
            Location::PackedPoints(_) => {}
            Location::PackedIntervals(ivs) => {
                if let Some(iv) = last.and_then(|i| ivs.get_mut(i)) {
                    iv.partial_stop = value;
                }
            }
            Location::Mix(parts) => {
                if let Some(part) = last.and_then(|i| parts.get_mut(i)) {
                    part.set_partial_stop(value);
                }
            }
        }
    }

    /// Contiguous residue spans in biological order
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<Leaf<'a>>) {
        match self {
            Location::Point(p) => out.push(Leaf {
                id: &p.id,
                from: p.position,
                to: p.position,
                strand: p.strand,
            }),
            Location::Interval(iv) => out.push(Leaf {
                id: &iv.id,
                from: iv.from,
                to: iv.to,
                strand: iv.strand,
            }),
            Location::PackedPoints(pp) => {
                let mut points = pp.points.clone();
                points.sort_unstable();
                if pp.strand.is_minus() {
                    points.reverse();
                }
                out.extend(points.into_iter().map(|pos| Leaf {
                    id: &pp.id,
                    from: pos,
                    to: pos,
                    strand: pp.strand,
                }));
            }
            Location::PackedIntervals(ivs) => {
                for i in self.biological_order() {
                    let iv = &ivs[i];
                    out.push(Leaf {
                        id: &iv.id,
                        from: iv.from,
                        to: iv.to,
                        strand: iv.strand,
                    });
                }
            }
            Location::Mix(parts) => {
                for i in self.biological_order() {
                    parts[i].collect_leaves(out);
                }
            }
        }
    }

    /// Total number of residues covered, counting overlaps twice
    pub fn total_length(&self) -> u64 {
        self.leaves()
            .iter()
            .map(|leaf| leaf.to.saturating_sub(leaf.from) + 1)
            .sum()
    }
}

impl From<Interval> for Location {
    fn from(iv: Interval) -> Self {
        Location::Interval(iv)
    }
}

impl From<Point> for Location {
    fn from(p: Point) -> Self {
        Location::Point(p)
    }
}

impl From<PackedPoints> for Location {
    fn from(pp: PackedPoints) -> Self {
        Location::PackedPoints(pp)
    }
}
