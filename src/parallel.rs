//! Parallel processing support for ferro-locedit
//!
//! This module provides parallel variants of the feature-level edits
//! using rayon. Enable with the `parallel` feature. Every function keeps
//! the order of its input.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_locedit::parallel::apply_policy_parallel;
//! use ferro_locedit::policy::{LocationEditPolicy, PartialPolicy};
//! use ferro_locedit::{Feature, Location, MockProvider};
//!
//! let provider = MockProvider::with_test_data();
//! let mut features = vec![Feature::gene(Location::interval("nuc1", 2, 26).unwrap())];
//! let policy = LocationEditPolicy::default().with_partial5(PartialPolicy::Set);
//!
//! let changed = apply_policy_parallel(&policy, &mut features, &provider);
//! assert_eq!(changed, vec![true]);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::feature::Feature;
use crate::policy::{apply_policy_to_feature, LocationEditPolicy};
use crate::reference::SequenceProvider;
use crate::transform::reverse_complement_feature;

/// Apply `policy` to every feature in parallel
///
/// Returns, for each feature, whether it changed.
pub fn apply_policy_parallel<P: SequenceProvider + Sync>(
    policy: &LocationEditPolicy,
    features: &mut [Feature],
    provider: &P,
) -> Vec<bool> {
    features
        .par_iter_mut()
        .map(|feature| apply_policy_to_feature(policy, feature, provider))
        .collect()
}

/// Reverse complement every feature in parallel
pub fn reverse_complement_parallel<P: SequenceProvider + Sync>(
    features: &[Feature],
    provider: &P,
) -> Vec<Feature> {
    features
        .par_iter()
        .map(|feature| reverse_complement_feature(feature, provider))
        .collect()
}

/// Statistics from a parallel policy run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelStats {
    /// Total features processed
    pub total: usize,
    /// Features the policy changed
    pub changed: usize,
}

impl ParallelStats {
    /// Summarise the result of [`apply_policy_parallel`]
    pub fn from_changes(changes: &[bool]) -> Self {
        Self {
            total: changes.len(),
            changed: changes.iter().filter(|c| **c).count(),
        }
    }

    /// Percentage of features that changed
    pub fn change_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.changed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Frame;
    use crate::location::{Interval, Location, Strand};
    use crate::policy::PartialPolicy;
    use crate::reference::MockProvider;
    use crate::translate::GeneticCode;

    fn cds(from: u64, to: u64) -> Feature {
        let iv = Interval::new("nuc1", from, to).unwrap().with_strand(Strand::Plus);
        Feature::coding_region(Location::Interval(iv), Frame::NotSet, GeneticCode::Standard)
    }

    #[test]
    fn test_apply_policy_parallel_matches_serial() {
        let provider = MockProvider::with_test_data();
        let policy = LocationEditPolicy::default()
            .with_partial5(PartialPolicy::SetForBadEnd)
            .with_extend5(true);
        let features: Vec<Feature> = (0..20).map(|i| cds(i, 26)).collect();

        let mut serial = features.clone();
        let expected: Vec<bool> = serial
            .iter_mut()
            .map(|f| apply_policy_to_feature(&policy, f, &provider))
            .collect();

        let mut parallel = features;
        let changed = apply_policy_parallel(&policy, &mut parallel, &provider);
        assert_eq!(changed, expected);
        assert_eq!(parallel, serial);
        // only the feature already at the start codon stays put
        assert!(!changed[0]);
        assert_eq!(ParallelStats::from_changes(&changed).changed, 19);
    }

    #[test]
    fn test_reverse_complement_parallel_order_preserved() {
        let provider = MockProvider::with_test_data();
        let features: Vec<Feature> = (0..100).map(|i| cds(i % 30, 40)).collect();
        let flipped = reverse_complement_parallel(&features, &provider);
        assert_eq!(flipped.len(), features.len());
        for (original, flipped) in features.iter().zip(&flipped) {
            assert_eq!(*flipped, reverse_complement_feature(original, &provider));
        }
    }

    #[test]
    fn test_empty_input() {
        let provider = MockProvider::with_test_data();
        let policy = LocationEditPolicy::default().with_partial5(PartialPolicy::Set);
        assert!(apply_policy_parallel(&policy, &mut [], &provider).is_empty());
        assert!(reverse_complement_parallel(&[], &provider).is_empty());
    }

    #[test]
    fn test_parallel_stats() {
        let stats = ParallelStats::from_changes(&[true, false, true, true]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.changed, 3);
        assert!((stats.change_rate() - 75.0).abs() < 0.01);
        assert_eq!(ParallelStats::default().change_rate(), 0.0);
    }
}
