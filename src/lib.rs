// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-locedit: location editing for sequence features
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Keeps feature locations consistent while the underlying sequences are
//! edited: partial-end policies, extension to sequence boundaries with
//! frame preservation, and coordinate transforms for trimming, insertion,
//! gap splitting and reverse complementing.
//!
//! # Example
//!
//! ```
//! use ferro_locedit::policy::{apply_policy_to_feature, LocationEditPolicy, PartialPolicy};
//! use ferro_locedit::{Feature, Frame, GeneticCode, Location, MockProvider, Strand};
//!
//! let provider = MockProvider::with_test_data();
//! let location = Location::interval("nuc1", 2, 26).unwrap().with_strand(Strand::Plus);
//! let mut cds = Feature::coding_region(location, Frame::Two, GeneticCode::Standard);
//!
//! // Mark the missing start as partial and extend it to the sequence end
//! let policy = LocationEditPolicy::default()
//!     .with_partial5(PartialPolicy::SetForBadEnd)
//!     .with_extend5(true);
//! assert!(apply_policy_to_feature(&policy, &mut cds, &provider));
//! assert_eq!(cds.location.start(), Some(0));
//! assert_eq!(cds.frame(), Some(Frame::NotSet));
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod feature;
pub mod location;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod policy;
pub mod reference;
pub mod transform;
pub mod translate;

// Re-export commonly used types
pub use config::LocEditConfig;
pub use coords::SeqRange;
pub use error::LocEditError;
pub use feature::{Feature, FeatureData, Frame};
pub use location::{Interval, Location, PackedPoints, Point, SeqId, Strand};
pub use policy::{apply_policy_to_feature, LocationEditPolicy, MergePolicy, PartialPolicy};
pub use reference::{MockProvider, SequenceProvider};
pub use transform::{
    adjust_for_insert, adjust_for_trim, correct_interval_order, reverse_complement_location,
    split_for_gap, GapSplitOptions,
};
pub use translate::GeneticCode;

/// Result type alias for ferro-locedit operations
pub type Result<T> = std::result::Result<T, LocEditError>;
