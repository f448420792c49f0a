//! Coordinate transforms
//!
//! Keep locations consistent with edits to the sequences they point at:
//! residues removed ([`adjust_for_trim`]) or inserted
//! ([`adjust_for_insert`]), a gap splitting a sequence in two
//! ([`split_for_gap`]), or the sequence being flipped
//! ([`reverse_complement_location`]). [`correct_interval_order`] restores
//! canonical element order afterwards.
//!
//! Transforms take a location by reference and return a new one.

mod feature;
mod gap;
mod insert;
mod order;
mod revcomp;
mod trim;

pub use feature::{
    adjust_feature_for_insert, adjust_feature_for_trim, reverse_complement_feature,
    FeatureTrimOutcome,
};
pub use gap::{split_for_gap, GapSplit, GapSplitOptions};
pub use insert::adjust_for_insert;
pub use order::correct_interval_order;
pub use revcomp::reverse_complement_location;
pub use trim::{adjust_for_trim, TrimOutcome};
