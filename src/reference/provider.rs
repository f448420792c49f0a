//! Sequence context provider trait
//!
//! Location edits need a few facts about the sequences a location points
//! at: their length, topology, residues and gap layout. Every query can
//! fail; callers in this crate treat failures as "unknown" and leave the
//! affected decision unchanged.

use crate::coords::SeqRange;
use crate::error::LocEditError;
use crate::location::SeqId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a sequence molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Linear => write!(f, "linear"),
            Topology::Circular => write!(f, "circular"),
        }
    }
}

/// Sorted, disjoint ranges of unknown residues on one sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeqRange>", into = "Vec<SeqRange>")]
pub struct GapMap {
    gaps: Vec<SeqRange>,
}

impl GapMap {
    /// Build a gap map, sorting the ranges and rejecting overlaps
    pub fn new(mut gaps: Vec<SeqRange>) -> Result<Self, LocEditError> {
        gaps.sort();
        for pair in gaps.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(LocEditError::invalid_location(format!(
                    "overlapping gaps {} and {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { gaps })
    }

    pub fn gaps(&self) -> &[SeqRange] {
        &self.gaps
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Whether `pos` lies inside a gap
    pub fn contains(&self, pos: u64) -> bool {
        self.gaps.iter().any(|g| g.contains(pos))
    }

    /// The closest gap ending strictly before `pos`
    pub fn last_gap_before(&self, pos: u64) -> Option<&SeqRange> {
        self.gaps.iter().rev().find(|g| g.to < pos)
    }

    /// The closest gap starting strictly after `pos`
    pub fn first_gap_after(&self, pos: u64) -> Option<&SeqRange> {
        self.gaps.iter().find(|g| g.from > pos)
    }
}

impl TryFrom<Vec<SeqRange>> for GapMap {
    type Error = LocEditError;

    fn try_from(gaps: Vec<SeqRange>) -> Result<Self, Self::Error> {
        GapMap::new(gaps)
    }
}

impl From<GapMap> for Vec<SeqRange> {
    fn from(map: GapMap) -> Self {
        map.gaps
    }
}

/// Trait for providing sequence context
///
/// Implementations might include:
/// - MockProvider for testing
/// - a provider backed by an annotation database or FASTA index
pub trait SequenceProvider {
    /// Number of residues in the sequence
    fn get_length(&self, id: &SeqId) -> Result<u64, LocEditError>;

    /// Get residues of a sequence region on the plus strand
    ///
    /// # Arguments
    ///
    /// * `id` - Sequence identifier
    /// * `start` - 0-based start position
    /// * `end` - 0-based end position (exclusive)
    fn get_residues(&self, id: &SeqId, start: u64, end: u64) -> Result<String, LocEditError>;

    /// Topology of the sequence; linear unless the provider knows better
    fn get_topology(&self, id: &SeqId) -> Result<Topology, LocEditError> {
        let _ = id;
        Ok(Topology::Linear)
    }

    /// Gaps of unknown residues; none unless the provider knows better
    fn get_gap_map(&self, id: &SeqId) -> Result<GapMap, LocEditError> {
        let _ = id;
        Ok(GapMap::default())
    }

    /// Check if the sequence is known
    fn has_sequence(&self, id: &SeqId) -> bool {
        self.get_length(id).is_ok()
    }
}

/// Blanket implementation for boxed trait objects
impl SequenceProvider for Box<dyn SequenceProvider> {
    fn get_length(&self, id: &SeqId) -> Result<u64, LocEditError> {
        (**self).get_length(id)
    }

    fn get_residues(&self, id: &SeqId, start: u64, end: u64) -> Result<String, LocEditError> {
        (**self).get_residues(id, start, end)
    }

    fn get_topology(&self, id: &SeqId) -> Result<Topology, LocEditError> {
        (**self).get_topology(id)
    }

    fn get_gap_map(&self, id: &SeqId) -> Result<GapMap, LocEditError> {
        (**self).get_gap_map(id)
    }

    fn has_sequence(&self, id: &SeqId) -> bool {
        (**self).has_sequence(id)
    }
}

/// Blanket implementation for boxed thread-safe trait objects
impl SequenceProvider for Box<dyn SequenceProvider + Send + Sync> {
    fn get_length(&self, id: &SeqId) -> Result<u64, LocEditError> {
        (**self).get_length(id)
    }

    fn get_residues(&self, id: &SeqId, start: u64, end: u64) -> Result<String, LocEditError> {
        (**self).get_residues(id, start, end)
    }

    fn get_topology(&self, id: &SeqId) -> Result<Topology, LocEditError> {
        (**self).get_topology(id)
    }

    fn get_gap_map(&self, id: &SeqId) -> Result<GapMap, LocEditError> {
        (**self).get_gap_map(id)
    }

    fn has_sequence(&self, id: &SeqId) -> bool {
        (**self).has_sequence(id)
    }
}
