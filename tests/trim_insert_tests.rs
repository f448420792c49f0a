//! Trim and insert adjustment tests
//!
//! Tests for keeping locations consistent with residues being removed
//! from or inserted into their sequence:
//! - Single intervals and points
//! - Packed intervals trimmed step by step
//! - Feature-level frame recomputation

use ferro_locedit::transform::{adjust_feature_for_insert, adjust_feature_for_trim};
use ferro_locedit::{
    adjust_for_insert, adjust_for_trim, Feature, Frame, GeneticCode, Interval, LocEditError,
    Location, SeqId, Strand,
};
use rstest::rstest;

fn id() -> SeqId {
    SeqId::new("nuc1")
}

fn iv(from: u64, to: u64) -> Interval {
    Interval::new("nuc1", from, to).unwrap()
}

fn packed(ranges: &[(u64, u64)]) -> Location {
    Location::packed_intervals(ranges.iter().map(|&(f, t)| iv(f, t)).collect())
}

fn ranges(loc: &Location) -> Vec<(u64, u64)> {
    match loc {
        Location::Interval(iv) => vec![(iv.from, iv.to)],
        Location::PackedIntervals(ivs) => ivs.iter().map(|iv| (iv.from, iv.to)).collect(),
        other => panic!("unexpected location {other:?}"),
    }
}

// =============================================================================
// Trim
// =============================================================================

#[test]
fn test_trim_interval_sequence() {
    let mut loc = Location::Interval(iv(10, 50));
    // (cut, expected, left trim)
    let steps = [
        ((0, 4), (5, 45), 0),
        ((10, 19), (5, 35), 0),
        ((0, 9), (0, 25), 5),
        ((20, 25), (0, 19), 0),
    ];
    for ((from, to), expected, trim5) in steps {
        let outcome = adjust_for_trim(&loc, from, to, &id()).unwrap();
        assert!(outcome.adjusted);
        assert_eq!(outcome.left_trim_amount, trim5, "cut [{from}, {to}]");
        loc = outcome.location.unwrap();
        assert_eq!(ranges(&loc), vec![expected]);
    }
}

#[test]
fn test_trim_covering_range_cuts() {
    let loc = Location::Interval(iv(10, 50));
    let outcome = adjust_for_trim(&loc, 0, 60, &id()).unwrap();
    assert!(outcome.is_cut());
    assert!(outcome.location.is_none());

    let loc = Location::Interval(iv(0, 25));
    assert!(adjust_for_trim(&loc, 0, 25, &id()).unwrap().is_cut());
}

#[test]
fn test_trim_point() {
    let loc = Location::point("nuc1", 10);
    let outcome = adjust_for_trim(&loc, 0, 4, &id()).unwrap();
    let moved = outcome.location.unwrap();
    assert_eq!(moved, Location::point("nuc1", 5));

    let outcome = adjust_for_trim(&moved, 0, 10, &id()).unwrap();
    assert!(outcome.is_cut());
}

#[test]
fn test_trim_packed_sequence() {
    let mut loc = packed(&[(10, 30), (50, 70), (90, 110)]);
    let steps: [((u64, u64), Vec<(u64, u64)>, u64); 5] = [
        ((106, 120), vec![(10, 30), (50, 70), (90, 105)], 0),
        ((85, 94), vec![(10, 30), (50, 70), (85, 95)], 0),
        ((72, 76), vec![(10, 30), (50, 70), (80, 90)], 0),
        ((50, 70), vec![(10, 30), (59, 69)], 0),
        ((5, 14), vec![(5, 20), (49, 59)], 5),
    ];
    for ((from, to), expected, trim5) in steps {
        let outcome = adjust_for_trim(&loc, from, to, &id()).unwrap();
        assert_eq!(outcome.left_trim_amount, trim5, "cut [{from}, {to}]");
        loc = outcome.location.unwrap();
        assert_eq!(ranges(&loc), expected, "cut [{from}, {to}]");
    }

    let outcome = adjust_for_trim(&loc, 5, 59, &id()).unwrap();
    assert!(outcome.is_cut());
}

#[test]
fn test_trim_packed_collapses_to_interval() {
    let loc = packed(&[(10, 30), (50, 70)]);
    let outcome = adjust_for_trim(&loc, 45, 75, &id()).unwrap();
    assert_eq!(outcome.location, Some(Location::Interval(iv(10, 30))));
}

#[test]
fn test_trim_minus_leading_elements() {
    // the biologically first element of a minus-strand location is the highest
    let minus = |f, t| iv(f, t).with_strand(Strand::Minus);
    let loc = Location::packed_intervals(vec![minus(50, 70), minus(10, 30)]);
    let outcome = adjust_for_trim(&loc, 45, 60, &id()).unwrap();
    // [50,70] loses [50,60] on its 3' side; nothing leaves the 5' end
    assert_eq!(outcome.left_trim_amount, 0);
    let outcome = adjust_for_trim(&loc, 65, 80, &id()).unwrap();
    assert_eq!(outcome.left_trim_amount, 6);
    assert_eq!(ranges(&outcome.location.unwrap()), vec![(50, 64), (10, 30)]);
}

#[rstest]
#[case(20, 10)]
#[case(5, 0)]
fn test_trim_rejects_inverted_range(#[case] from: u64, #[case] to: u64) {
    let loc = Location::Interval(iv(10, 50));
    let err = adjust_for_trim(&loc, from, to, &id()).unwrap_err();
    assert_eq!(err, LocEditError::InvalidRange { from, to });
}

#[test]
fn test_trim_feature_keeps_register() {
    let loc = Location::Interval(iv(10, 50).with_strand(Strand::Plus));
    let cds = Feature::coding_region(loc, Frame::NotSet, GeneticCode::Standard);
    // removing 5 bases in front of the start leaves the first codon short by 5 % 3
    let outcome = adjust_feature_for_trim(&cds, 5, 14, &id()).unwrap();
    assert_eq!(outcome.left_trim_amount, 5);
    let trimmed = outcome.feature.unwrap();
    assert_eq!(trimmed.frame(), Some(Frame::Two));
    assert!(trimmed.location.is_partial_start());
    assert!(trimmed.partial);
}

// =============================================================================
// Insert
// =============================================================================

#[test]
fn test_insert_interval_sequence() {
    let loc = Location::Interval(iv(10, 50));
    let loc = adjust_for_insert(&loc, 20, 29, &id()).unwrap();
    assert_eq!(ranges(&loc), vec![(10, 60)]);
    let loc = adjust_for_insert(&loc, 5, 9, &id()).unwrap();
    assert_eq!(ranges(&loc), vec![(15, 65)]);
}

#[test]
fn test_insert_point() {
    let loc = Location::point("nuc1", 10);
    assert_eq!(
        adjust_for_insert(&loc, 5, 7, &id()).unwrap(),
        Location::point("nuc1", 13)
    );
}

#[rstest]
#[case::before_all((1, 5), vec![(15, 35), (55, 75), (95, 115)])]
#[case::before_last((80, 84), vec![(10, 30), (50, 70), (95, 115)])]
#[case::inside_first((20, 24), vec![(10, 35), (55, 75), (95, 115)])]
#[case::after_all((200, 210), vec![(10, 30), (50, 70), (90, 110)])]
fn test_insert_packed(#[case] insert: (u64, u64), #[case] expected: Vec<(u64, u64)>) {
    let loc = packed(&[(10, 30), (50, 70), (90, 110)]);
    let shifted = adjust_for_insert(&loc, insert.0, insert.1, &id()).unwrap();
    assert_eq!(ranges(&shifted), expected);
}

#[test]
fn test_insert_then_trim_restores() {
    let loc = packed(&[(10, 30), (50, 70), (90, 110)]);
    let shifted = adjust_for_insert(&loc, 40, 44, &id()).unwrap();
    let outcome = adjust_for_trim(&shifted, 40, 44, &id()).unwrap();
    assert_eq!(outcome.location, Some(loc));
}

#[test]
fn test_insert_feature_moves_code_break() {
    let loc = Location::Interval(iv(0, 26).with_strand(Strand::Plus));
    let code_break = Location::Interval(iv(3, 5).with_strand(Strand::Plus));
    let cds = Feature::coding_region(loc, Frame::NotSet, GeneticCode::Standard)
        .with_code_break(code_break, 'U');
    let shifted = adjust_feature_for_insert(&cds, 0, 9, &id()).unwrap();
    assert_eq!(ranges(&shifted.location), vec![(10, 36)]);
    let cb = &shifted.cds().unwrap().code_breaks[0];
    assert_eq!(ranges(&cb.location), vec![(13, 15)]);
}
