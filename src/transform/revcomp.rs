//! Reverse complementing locations

use crate::coords::mirror_position;
use crate::location::{Interval, Location, SeqId};
use crate::reference::SequenceProvider;

/// Map a location onto the opposite strand of its sequence(s)
///
/// Each coordinate `p` becomes `len - 1 - p` using the length of the
/// element's own sequence. Plus and minus strands swap; unknown and
/// both-strand elements keep their strand. Partial flags stay attached to
/// the coordinate they qualified, so a plus-strand partial start becomes a
/// minus-strand partial start at the mirrored position. `Mix` and
/// `PackedIntervals` reverse their element order; packed points keep
/// theirs.
///
/// Elements whose sequence length is unknown, or that do not fit on their
/// sequence, are left as they were.
pub fn reverse_complement_location<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Location {
    let mut out = location.clone();
    reverse_complement_in_place(&mut out, provider);
    out
}

fn sequence_length<P: SequenceProvider + ?Sized>(provider: &P, id: &SeqId) -> Option<u64> {
    match provider.get_length(id) {
        Ok(len) => Some(len),
        Err(e) => {
            log::debug!("leaving {} unflipped: {}", id, e);
            None
        }
    }
}

fn flip_interval<P: SequenceProvider + ?Sized>(iv: &mut Interval, provider: &P) {
    let Some(len) = sequence_length(provider, &iv.id) else {
        return;
    };
    let (Some(from), Some(to)) = (mirror_position(iv.to, len), mirror_position(iv.from, len)) else {
        log::debug!("interval {} does not fit on {} (length {})", iv, iv.id, len);
        return;
    };
    let (low_partial, high_partial) = (iv.partial_low(), iv.partial_high());
    iv.from = from;
    iv.to = to;
    iv.strand = iv.strand.reversed();
    iv.set_partial_low(high_partial);
    iv.set_partial_high(low_partial);
}

pub(crate) fn reverse_complement_in_place<P: SequenceProvider + ?Sized>(
    loc: &mut Location,
    provider: &P,
) {
    match loc {
        Location::Point(p) => {
            let Some(len) = sequence_length(provider, &p.id) else {
                return;
            };
            if let Some(pos) = mirror_position(p.position, len) {
                p.position = pos;
                p.strand = p.strand.reversed();
            }
        }
        Location::Interval(iv) => flip_interval(iv, provider),
        Location::PackedPoints(pp) => {
            let Some(len) = sequence_length(provider, &pp.id) else {
                return;
            };
            let mirrored: Option<Vec<u64>> = pp
                .points
                .iter()
                .map(|&pos| mirror_position(pos, len))
                .collect();
            if let Some(points) = mirrored {
                pp.points = points;
                pp.strand = pp.strand.reversed();
            }
        }
        Location::PackedIntervals(ivs) => {
            ivs.iter_mut().for_each(|iv| flip_interval(iv, provider));
            ivs.reverse();
        }
        Location::Mix(parts) => {
            parts
                .iter_mut()
                .for_each(|part| reverse_complement_in_place(part, provider));
            parts.reverse();
        }
    }
}
