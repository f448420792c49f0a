//! Extending feature ends to the nearest sequence boundary

use super::ends::{five_prime_boundary, five_prime_distance, three_prime_boundary, three_prime_distance};
use crate::feature::Feature;
use crate::location::{Interval, Location};
use crate::reference::SequenceProvider;

/// Longest distance a partial end is pulled to a boundary by
/// [`extend_partial_ends`]
const MAX_SHORT_EXTENSION: u64 = 3;

#[derive(Clone, Copy)]
enum End {
    Five,
    Three,
}

/// Move the biological start or stop of the leading/trailing element to
/// `target`, returning the number of bases added. Only outward moves are
/// made.
fn extend_element(loc: &mut Location, end: End, target: u64) -> u64 {
    match loc {
        Location::Point(p) => {
            let mut iv = p.to_interval();
            let added = extend_interval(&mut iv, end, target);
            if added > 0 {
                *loc = Location::Interval(iv);
            }
            added
        }
        Location::Interval(iv) => extend_interval(iv, end, target),
        Location::PackedPoints(pp) => {
            log::debug!("packed points on {} cannot be extended", pp.id);
            0
        }
        Location::PackedIntervals(_) | Location::Mix(_) => {
            let index = match end {
                End::Five => loc.first_index(),
                End::Three => loc.last_index(),
            };
            let Some(index) = index else {
                return 0;
            };
            match loc {
                Location::PackedIntervals(ivs) => ivs
                    .get_mut(index)
                    .map_or(0, |iv| extend_interval(iv, end, target)),
                Location::Mix(parts) => parts
                    .get_mut(index)
                    .map_or(0, |part| extend_element(part, end, target)),
                _ => 0,
            }
        }
    }
}

fn extend_interval(iv: &mut Interval, end: End, target: u64) -> u64 {
    let minus = iv.is_minus();
    match end {
        End::Five => {
            let start = iv.start();
            let outward = if minus { target > start } else { target < start };
            if !outward {
                return 0;
            }
            iv.set_start(target);
            start.abs_diff(target)
        }
        End::Three => {
            let stop = iv.stop();
            let outward = if minus { target < stop } else { target > stop };
            if !outward {
                return 0;
            }
            iv.set_stop(target);
            stop.abs_diff(target)
        }
    }
}

/// Extend the biological start to the nearest terminus or gap edge
///
/// Coding regions get a new frame so the codons keep their register.
/// Returns whether the location changed.
pub fn extend_5<P: SequenceProvider + ?Sized>(feature: &mut Feature, provider: &P) -> bool {
    let target = match five_prime_boundary(&feature.location, provider) {
        Ok(Some(target)) => target,
        Ok(None) => return false,
        Err(e) => {
            log::debug!("cannot extend 5' end of {}: {}", feature.location, e);
            return false;
        }
    };
    let added = extend_element(&mut feature.location, End::Five, target);
    if added == 0 {
        return false;
    }
    if let Some(cds) = feature.cds_mut() {
        let frame = cds.frame.after_extension(added);
        log::trace!("frame {} -> {} after adding {} bases", cds.frame, frame, added);
        cds.frame = frame;
    }
    true
}

/// Extend the biological stop to the nearest terminus or gap edge
pub fn extend_3<P: SequenceProvider + ?Sized>(feature: &mut Feature, provider: &P) -> bool {
    let target = match three_prime_boundary(&feature.location, provider) {
        Ok(Some(target)) => target,
        Ok(None) => return false,
        Err(e) => {
            log::debug!("cannot extend 3' end of {}: {}", feature.location, e);
            return false;
        }
    };
    extend_element(&mut feature.location, End::Three, target) > 0
}

fn short_distance(distance: Option<u64>) -> bool {
    matches!(distance, Some(d) if (1..=MAX_SHORT_EXTENSION).contains(&d))
}

fn start_extendable<P: SequenceProvider + ?Sized>(feature: &Feature, provider: &P) -> bool {
    feature.location.is_partial_start() && short_distance(five_prime_distance(&feature.location, provider))
}

fn stop_extendable<P: SequenceProvider + ?Sized>(feature: &Feature, provider: &P) -> bool {
    feature.location.is_partial_stop() && short_distance(three_prime_distance(&feature.location, provider))
}

/// Whether a partial end lies within three bases of a boundary
pub fn is_extendable<P: SequenceProvider + ?Sized>(feature: &Feature, provider: &P) -> bool {
    start_extendable(feature, provider) || stop_extendable(feature, provider)
}

/// Pull partial ends that stop just short of a boundary onto it
///
/// Returns whether anything changed.
pub fn extend_partial_ends<P: SequenceProvider + ?Sized>(feature: &mut Feature, provider: &P) -> bool {
    let mut changed = false;
    if start_extendable(feature, provider) {
        changed |= extend_5(feature, provider);
    }
    if stop_extendable(feature, provider) {
        changed |= extend_3(feature, provider);
    }
    if changed {
        feature.sync_partial();
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Frame;
    use crate::location::{Point, Strand};
    use crate::reference::MockProvider;
    use crate::translate::{translate_cds, GeneticCode};
    use rstest::rstest;

    fn cds(from: u64, to: u64, strand: Strand, frame: Frame) -> Feature {
        let iv = Interval::new("nuc1", from, to).unwrap().with_strand(strand);
        Feature::coding_region(Location::Interval(iv), frame, GeneticCode::Standard)
    }

    #[rstest]
    #[case(Frame::Two, Frame::NotSet)]
    #[case(Frame::One, Frame::Three)]
    #[case(Frame::NotSet, Frame::Three)]
    fn test_extend_5_frame(#[case] before: Frame, #[case] after: Frame) {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 26, Strand::Plus, before);
        assert!(extend_5(&mut feature, &provider));
        assert_eq!(feature.location.start(), Some(0));
        assert_eq!(feature.frame(), Some(after));
    }

    #[test]
    fn test_extend_5_keeps_protein() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 25, Strand::Plus, Frame::One);
        let before = translate_cds(&feature, &provider).unwrap();
        assert!(extend_5(&mut feature, &provider));
        assert_eq!(translate_cds(&feature, &provider).unwrap(), before);
    }

    #[test]
    fn test_extend_3() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 22, Strand::Plus, Frame::NotSet);
        assert!(extend_3(&mut feature, &provider));
        assert_eq!(feature.location.stop(), Some(59));
        assert_eq!(feature.frame(), Some(Frame::NotSet));
        assert!(!extend_3(&mut feature, &provider));
    }

    #[test]
    fn test_extend_minus() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(5, 40, Strand::Minus, Frame::NotSet);
        assert!(extend_5(&mut feature, &provider));
        assert!(extend_3(&mut feature, &provider));
        assert_eq!(feature.location.start(), Some(59));
        assert_eq!(feature.location.stop(), Some(0));
    }

    #[test]
    fn test_extend_point_becomes_interval() {
        let provider = MockProvider::with_test_data();
        let point = Point::new("delta1", 25).with_strand(Strand::Plus);
        let mut feature = Feature::gene(Location::Point(point));
        assert!(extend_5(&mut feature, &provider));
        let expected = Interval::new("delta1", 22, 25).unwrap().with_strand(Strand::Plus);
        assert_eq!(feature.location, Location::Interval(expected));
    }

    #[test]
    fn test_extend_packed_moves_first_element() {
        let provider = MockProvider::with_test_data();
        let ivs = vec![
            Interval::new("nuc1", 40, 50).unwrap().with_strand(Strand::Plus),
            Interval::new("nuc1", 5, 20).unwrap().with_strand(Strand::Plus),
        ];
        let mut feature = Feature::gene(Location::packed_intervals(ivs));
        assert!(extend_5(&mut feature, &provider));
        match &feature.location {
            Location::PackedIntervals(ivs) => {
                assert_eq!((ivs[1].from, ivs[1].to), (0, 20));
                assert_eq!((ivs[0].from, ivs[0].to), (40, 50));
            }
            other => panic!("unexpected location {other:?}"),
        }
    }

    #[test]
    fn test_circular_without_gaps_does_not_extend() {
        let provider = MockProvider::with_test_data();
        let iv = Interval::new("plasmid1", 3, 20).unwrap().with_strand(Strand::Plus);
        let mut feature = Feature::gene(Location::Interval(iv));
        assert!(!extend_5(&mut feature, &provider));
        assert!(!extend_3(&mut feature, &provider));
    }

    fn delta_cds(start: u64, partial: bool, minus: bool) -> Feature {
        let iv = if minus {
            Interval::new("delta1", 0, start).unwrap().with_strand(Strand::Minus)
        } else {
            Interval::new("delta1", start, 33).unwrap().with_strand(Strand::Plus)
        };
        Feature::coding_region(
            Location::Interval(iv.with_partial(partial, false)),
            Frame::NotSet,
            GeneticCode::Standard,
        )
    }

    #[rstest]
    #[case(0, true, false, 0, 0)]
    #[case(1, false, false, 1, 0)]
    #[case(1, true, false, 0, 1)]
    #[case(2, true, false, 0, 2)]
    #[case(3, true, false, 0, 0)]
    #[case(4, true, false, 4, 0)]
    #[case(22, true, false, 22, 0)]
    #[case(23, true, false, 22, 1)]
    #[case(24, true, false, 22, 2)]
    #[case(25, true, false, 22, 0)]
    #[case(26, true, false, 26, 0)]
    #[case(32, true, true, 33, 1)]
    #[case(31, true, true, 33, 2)]
    #[case(30, true, true, 33, 0)]
    #[case(29, true, true, 29, 0)]
    #[case(10, true, true, 11, 1)]
    #[case(9, true, true, 11, 2)]
    #[case(7, true, true, 7, 0)]
    fn test_extend_partial_start(
        #[case] start: u64,
        #[case] partial: bool,
        #[case] minus: bool,
        #[case] expected: u64,
        #[case] offset: u64,
    ) {
        let provider = MockProvider::with_test_data();
        let mut feature = delta_cds(start, partial, minus);
        assert_eq!(is_extendable(&feature, &provider), start != expected);
        assert_eq!(extend_partial_ends(&mut feature, &provider), start != expected);
        assert_eq!(feature.location.start(), Some(expected));
        assert_eq!(feature.frame().map(Frame::offset), Some(offset));
    }

    #[rstest]
    #[case(32, true, false, 33)]
    #[case(30, true, false, 33)]
    #[case(29, true, false, 29)]
    #[case(10, true, false, 11)]
    #[case(8, true, false, 11)]
    #[case(8, false, false, 8)]
    #[case(1, true, true, 0)]
    #[case(4, true, true, 4)]
    #[case(25, true, true, 22)]
    fn test_extend_partial_stop(
        #[case] stop: u64,
        #[case] partial: bool,
        #[case] minus: bool,
        #[case] expected: u64,
    ) {
        let provider = MockProvider::with_test_data();
        let iv = if minus {
            Interval::new("delta1", stop, 33).unwrap().with_strand(Strand::Minus)
        } else {
            Interval::new("delta1", 0, stop).unwrap().with_strand(Strand::Plus)
        };
        let mut feature = Feature::coding_region(
            Location::Interval(iv.with_partial(false, partial)),
            Frame::NotSet,
            GeneticCode::Standard,
        );
        assert_eq!(extend_partial_ends(&mut feature, &provider), stop != expected);
        assert_eq!(feature.location.stop(), Some(expected));
        assert_eq!(feature.frame(), Some(Frame::NotSet));
    }
}
