//! Location edit policy
//!
//! A [`LocationEditPolicy`] says, for each end of a feature, whether its
//! partial flag should be set or cleared and under which conditions, and
//! whether a newly partial end is extended to the nearest sequence
//! terminus or gap edge. Conditions that depend on the sequence (is the
//! end at a boundary, is there a start codon) are answered through a
//! [`SequenceProvider`](crate::reference::SequenceProvider); when the
//! provider cannot answer, the policy leaves that end alone.

mod apply;
mod config;
mod ends;
mod extend;
mod interpret;

pub use apply::{apply_policy_to_feature, merge_location};
pub use config::{LocationEditPolicy, MergePolicy, PartialPolicy};
pub use ends::{is_3_at_end, is_5_at_end};
pub use extend::{extend_3, extend_5, extend_partial_ends, is_extendable};
pub use interpret::{interpret_3_policy, interpret_5_policy, PartialDecision};
