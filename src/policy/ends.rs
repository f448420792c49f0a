//! Facts about the ends of a feature: where the nearest sequence boundary
//! lies and whether the residues show a proper start or stop.
//!
//! A boundary is a sequence terminus or the edge of a gap of unknown
//! residues. Circular sequences have no termini, only gaps.

use crate::error::LocEditError;
use crate::feature::Feature;
use crate::location::{Leaf, Location, SeqId};
use crate::reference::{GapMap, SequenceProvider, Topology};
use crate::translate::{coding_sequence, Codon};

fn topology<P: SequenceProvider + ?Sized>(provider: &P, id: &SeqId) -> Topology {
    provider.get_topology(id).unwrap_or_else(|e| {
        log::debug!("assuming {} is linear: {}", id, e);
        Topology::Linear
    })
}

fn gap_map<P: SequenceProvider + ?Sized>(provider: &P, id: &SeqId) -> GapMap {
    provider.get_gap_map(id).unwrap_or_else(|e| {
        log::debug!("assuming {} has no gaps: {}", id, e);
        GapMap::default()
    })
}

/// Boundary reached by moving outward from `pos` towards lower coordinates
fn lower_boundary<P: SequenceProvider + ?Sized>(provider: &P, id: &SeqId, pos: u64) -> Option<u64> {
    if let Some(gap) = gap_map(provider, id).last_gap_before(pos) {
        return Some(gap.to + 1);
    }
    (topology(provider, id) == Topology::Linear).then_some(0)
}

/// Boundary reached by moving outward from `pos` towards higher coordinates
fn upper_boundary<P: SequenceProvider + ?Sized>(
    provider: &P,
    id: &SeqId,
    pos: u64,
) -> Result<Option<u64>, LocEditError> {
    if let Some(gap) = gap_map(provider, id).first_gap_after(pos) {
        return Ok(Some(gap.from - 1));
    }
    if topology(provider, id) == Topology::Circular {
        return Ok(None);
    }
    let len = provider.get_length(id)?;
    Ok(len.checked_sub(1))
}

fn first_leaf(location: &Location) -> Option<Leaf<'_>> {
    location.leaves().into_iter().next()
}

fn last_leaf(location: &Location) -> Option<Leaf<'_>> {
    location.leaves().into_iter().last()
}

/// Coordinate the biological start could be extended to
///
/// `Ok(None)` means there is no boundary to reach (circular sequence
/// without gaps). Plus-strand starts need no sequence length, so they
/// resolve even for sequences the provider does not know.
pub(crate) fn five_prime_boundary<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Result<Option<u64>, LocEditError> {
    let leaf = first_leaf(location)
        .ok_or_else(|| LocEditError::invalid_location("location has no elements"))?;
    if leaf.strand.is_minus() {
        upper_boundary(provider, leaf.id, leaf.to)
    } else {
        Ok(lower_boundary(provider, leaf.id, leaf.from))
    }
}

/// Coordinate the biological stop could be extended to
pub(crate) fn three_prime_boundary<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Result<Option<u64>, LocEditError> {
    let leaf = last_leaf(location)
        .ok_or_else(|| LocEditError::invalid_location("location has no elements"))?;
    if leaf.strand.is_minus() {
        Ok(lower_boundary(provider, leaf.id, leaf.from))
    } else {
        upper_boundary(provider, leaf.id, leaf.to)
    }
}

fn start_of(leaf: &Leaf<'_>) -> u64 {
    if leaf.strand.is_minus() {
        leaf.to
    } else {
        leaf.from
    }
}

fn stop_of(leaf: &Leaf<'_>) -> u64 {
    if leaf.strand.is_minus() {
        leaf.from
    } else {
        leaf.to
    }
}

/// Bases between the biological start and its boundary
pub(crate) fn five_prime_distance<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Option<u64> {
    let start = start_of(&first_leaf(location)?);
    let boundary = five_prime_boundary(location, provider).ok()??;
    Some(start.abs_diff(boundary))
}

/// Bases between the biological stop and its boundary
pub(crate) fn three_prime_distance<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Option<u64> {
    let stop = stop_of(&last_leaf(location)?);
    let boundary = three_prime_boundary(location, provider).ok()??;
    Some(stop.abs_diff(boundary))
}

fn at_boundary<P: SequenceProvider + ?Sized>(
    leaf: Leaf<'_>,
    coordinate: u64,
    boundary: Result<Option<u64>, LocEditError>,
    provider: &P,
) -> Option<bool> {
    if !provider.has_sequence(leaf.id) {
        log::debug!("{} is not available; end position unknown", leaf.id);
        return None;
    }
    match boundary {
        Ok(Some(b)) => Some(b == coordinate),
        Ok(None) => Some(false),
        Err(e) => {
            log::debug!("cannot locate boundary on {}: {}", leaf.id, e);
            None
        }
    }
}

/// Whether the biological start sits on a boundary; `None` when unknown
pub fn is_5_at_end<P: SequenceProvider + ?Sized>(location: &Location, provider: &P) -> Option<bool> {
    let leaf = first_leaf(location)?;
    at_boundary(leaf, start_of(&leaf), five_prime_boundary(location, provider), provider)
}

/// Whether the biological stop sits on a boundary; `None` when unknown
pub fn is_3_at_end<P: SequenceProvider + ?Sized>(location: &Location, provider: &P) -> Option<bool> {
    let leaf = last_leaf(location)?;
    at_boundary(leaf, stop_of(&leaf), three_prime_boundary(location, provider), provider)
}

/// Whether a coding region opens with an initiator codon in frame
///
/// With `require_met` only codons translating to methionine qualify;
/// otherwise every start codon of the genetic code does. A frame of two or
/// three is never a proper start. `None` for non-coding features or
/// unreadable residues.
pub(crate) fn has_good_start<P: SequenceProvider + ?Sized>(
    feature: &Feature,
    provider: &P,
    require_met: bool,
) -> Option<bool> {
    let cds = feature.cds()?;
    if cds.frame.offset() != 0 {
        return Some(false);
    }
    let seq = coding_sequence(feature, provider)?;
    let table = cds.genetic_code.table();
    let good = seq.get(..3).and_then(Codon::parse).is_some_and(|codon| {
        if require_met {
            table.amino_acid_for(&codon) == 'M'
        } else {
            table.is_start(&codon)
        }
    });
    Some(good)
}

/// Whether a coding region ends on a complete in-frame stop codon
pub(crate) fn has_good_stop<P: SequenceProvider + ?Sized>(feature: &Feature, provider: &P) -> Option<bool> {
    let cds = feature.cds()?;
    let seq = coding_sequence(feature, provider)?;
    if seq.len() < 3 || seq.len() % 3 != 0 {
        return Some(false);
    }
    let table = cds.genetic_code.table();
    let good = seq
        .get(seq.len() - 3..)
        .and_then(Codon::parse)
        .is_some_and(|codon| table.is_stop(&codon));
    Some(good)
}
