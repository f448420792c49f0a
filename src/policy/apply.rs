//! Applying a [`LocationEditPolicy`] to a feature

use super::config::{LocationEditPolicy, MergePolicy};
use super::extend::{extend_3, extend_5};
use super::interpret::{interpret_3_policy, interpret_5_policy};
use crate::feature::Feature;
use crate::location::{Interval, Location, Point, Strand};
use crate::reference::SequenceProvider;

/// Apply the partial, extension and merge rules of `policy` to `feature`
///
/// The 5' end is handled first, then the 3' end, then the merge rule.
/// The feature-level partial flag is resynchronised at the end. Returns
/// whether the feature changed.
pub fn apply_policy_to_feature<P: SequenceProvider + ?Sized>(
    policy: &LocationEditPolicy,
    feature: &mut Feature,
    provider: &P,
) -> bool {
    if policy.is_no_op() {
        return false;
    }
    let before = feature.clone();

    let five = interpret_5_policy(feature, provider, policy);
    if five.should_set {
        feature.location.set_partial_start(true);
        if policy.extend5 {
            extend_5(feature, provider);
        }
    } else if five.should_clear {
        feature.location.set_partial_start(false);
    }

    let three = interpret_3_policy(feature, provider, policy);
    if three.should_set {
        feature.location.set_partial_stop(true);
        if policy.extend3 {
            extend_3(feature, provider);
        }
    } else if three.should_clear {
        feature.location.set_partial_stop(false);
    }

    if let Some(merged) = merge_location(&feature.location, policy.merge_policy) {
        feature.location = merged;
    }
    feature.sync_partial();

    let changed = *feature != before;
    if changed {
        log::debug!("policy changed {} to {}", before.location, feature.location);
    }
    changed
}

/// Reshape a location according to `merge`; `None` when it does not apply
pub fn merge_location(location: &Location, merge: MergePolicy) -> Option<Location> {
    match merge {
        MergePolicy::NoChange => None,
        MergePolicy::Join => join(location),
        MergePolicy::SingleInterval => single_interval(location),
    }
}

fn join(location: &Location) -> Option<Location> {
    match location {
        Location::PackedIntervals(ivs) => Some(Location::Mix(
            ivs.iter().cloned().map(Location::Interval).collect(),
        )),
        Location::PackedPoints(pp) => Some(Location::Mix(
            pp.points
                .iter()
                .map(|&pos| Location::Point(Point::new(pp.id.clone(), pos).with_strand(pp.strand)))
                .collect(),
        )),
        _ => None,
    }
}

fn single_interval(location: &Location) -> Option<Location> {
    if !matches!(
        location,
        Location::PackedIntervals(_) | Location::PackedPoints(_) | Location::Mix(_)
    ) {
        return None;
    }
    let Some(id) = location.single_id() else {
        log::debug!("{} spans several sequences; not merged", location);
        return None;
    };
    let (low, high) = (location.low()?, location.high()?);
    let strand = location.strand().unwrap_or(Strand::Unknown);
    let iv = Interval::new(id.clone(), low, high)
        .ok()?
        .with_strand(strand)
        .with_partial(location.is_partial_start(), location.is_partial_stop());
    Some(Location::Interval(iv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Frame;
    use crate::location::PackedPoints;
    use crate::policy::PartialPolicy;
    use crate::reference::MockProvider;
    use crate::translate::{translate_cds, GeneticCode};

    fn cds(from: u64, to: u64, frame: Frame) -> Feature {
        let iv = Interval::new("nuc1", from, to).unwrap().with_strand(Strand::Plus);
        Feature::coding_region(Location::Interval(iv), frame, GeneticCode::Standard)
    }

    fn plus(from: u64, to: u64) -> Interval {
        Interval::new("nuc1", from, to).unwrap().with_strand(Strand::Plus)
    }

    #[test]
    fn test_no_op_policy() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 26, Frame::Two);
        let before = feature.clone();
        assert!(!apply_policy_to_feature(
            &LocationEditPolicy::default().with_extend5(true),
            &mut feature,
            &provider
        ));
        assert_eq!(feature, before);
    }

    #[test]
    fn test_bad_start_extended_gains_methionine() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 26, Frame::Two);
        let protein = translate_cds(&feature, &provider).unwrap();

        let policy = LocationEditPolicy::default()
            .with_partial5(PartialPolicy::SetForBadEnd)
            .with_extend5(true);
        assert!(apply_policy_to_feature(&policy, &mut feature, &provider));
        assert_eq!(feature.location.start(), Some(0));
        assert_eq!(feature.location.stop(), Some(26));
        assert_eq!(feature.frame(), Some(Frame::NotSet));
        assert!(feature.location.is_partial_start());
        assert!(feature.partial);
        assert_eq!(translate_cds(&feature, &provider).unwrap(), format!("M{protein}"));
    }

    #[test]
    fn test_both_ends_extended() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 22, Frame::NotSet);
        let policy = LocationEditPolicy::new(PartialPolicy::SetForBadEnd, PartialPolicy::SetForBadEnd)
            .with_extend5(true)
            .with_extend3(true);
        assert!(apply_policy_to_feature(&policy, &mut feature, &provider));
        assert_eq!((feature.location.low(), feature.location.high()), (Some(0), Some(59)));
        assert_eq!(feature.frame(), Some(Frame::Three));
        assert!(feature.location.is_partial_start());
        assert!(feature.location.is_partial_stop());
    }

    #[test]
    fn test_set_keeps_protein() {
        let provider = MockProvider::with_test_data();
        let mut feature = cds(2, 25, Frame::One);
        let protein = translate_cds(&feature, &provider).unwrap();
        let policy = LocationEditPolicy::default()
            .with_partial5(PartialPolicy::Set)
            .with_extend5(true);
        assert!(apply_policy_to_feature(&policy, &mut feature, &provider));
        assert_eq!(feature.frame(), Some(Frame::Three));
        assert_eq!(translate_cds(&feature, &provider).unwrap(), protein);

        // second application finds nothing to do
        assert!(!apply_policy_to_feature(&policy, &mut feature, &provider));
    }

    #[test]
    fn test_clear_syncs_feature_flag() {
        let provider = MockProvider::with_test_data();
        let iv = plus(0, 26).with_partial(true, false);
        let mut feature = Feature::coding_region(Location::Interval(iv), Frame::NotSet, GeneticCode::Standard);
        assert!(feature.partial);
        let policy = LocationEditPolicy::default().with_partial5(PartialPolicy::ClearForGoodEnd);
        assert!(apply_policy_to_feature(&policy, &mut feature, &provider));
        assert!(!feature.partial);
    }

    #[test]
    fn test_merge_join() {
        let packed = Location::packed_intervals(vec![plus(10, 20), plus(30, 40)]);
        let joined = merge_location(&packed, MergePolicy::Join).unwrap();
        assert_eq!(
            joined,
            Location::mix(vec![Location::Interval(plus(10, 20)), Location::Interval(plus(30, 40))])
        );
        assert_eq!(merge_location(&joined, MergePolicy::Join), None);

        let points = Location::PackedPoints(PackedPoints::new("nuc1", vec![3, 5]));
        match merge_location(&points, MergePolicy::Join) {
            Some(Location::Mix(parts)) => assert_eq!(parts.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_merge_single_interval() {
        let minus = |from, to| Interval::new("nuc1", from, to).unwrap().with_strand(Strand::Minus);
        let packed = Location::packed_intervals(vec![
            minus(30, 40).with_partial(true, false),
            minus(10, 20).with_partial(false, true),
        ]);
        let merged = merge_location(&packed, MergePolicy::SingleInterval).unwrap();
        let expected = minus(10, 40).with_partial(true, true);
        assert_eq!(merged, Location::Interval(expected));

        let trans = Location::mix(vec![
            Location::Interval(plus(10, 20)),
            Location::interval("other", 5, 8).unwrap(),
        ]);
        assert_eq!(merge_location(&trans, MergePolicy::SingleInterval), None);
    }

    #[test]
    fn test_apply_merge_only() {
        let provider = MockProvider::with_test_data();
        let mut feature = Feature::gene(Location::packed_intervals(vec![plus(10, 20), plus(30, 40)]));
        let policy = LocationEditPolicy::default().with_merge(MergePolicy::SingleInterval);
        assert!(apply_policy_to_feature(&policy, &mut feature, &provider));
        assert_eq!(feature.location, Location::Interval(plus(10, 40)));
        assert!(!apply_policy_to_feature(&policy, &mut feature, &provider));
    }
}
