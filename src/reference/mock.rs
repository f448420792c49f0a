//! In-memory sequence provider for testing

use crate::coords::SeqRange;
use crate::error::LocEditError;
use crate::location::SeqId;
use crate::reference::provider::{GapMap, SequenceProvider, Topology};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One sequence held by [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: SeqId,
    /// Plus-strand residues; gap positions are usually `N`
    pub residues: String,
    #[serde(default)]
    pub gaps: GapMap,
    #[serde(default)]
    pub topology: Topology,
}

/// Mock sequence provider backed by a map of [`SequenceRecord`]s
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    sequences: HashMap<SeqId, SequenceRecord>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self {
            sequences: HashMap::new(),
        }
    }

    /// Load sequence records from a JSON array
    pub fn from_json(path: &Path) -> Result<Self, LocEditError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<SequenceRecord> = serde_json::from_str(&content)?;

        let mut provider = Self::new();
        for record in records {
            provider.add_record(record)?;
        }
        Ok(provider)
    }

    /// Add a record, checking that its gaps fit on the sequence
    pub fn add_record(&mut self, record: SequenceRecord) -> Result<(), LocEditError> {
        let len = record.residues.len() as u64;
        if let Some(gap) = record.gaps.gaps().iter().find(|g| g.to >= len) {
            return Err(LocEditError::invalid_location(format!(
                "gap {} extends past the end of {} (length {})",
                gap, record.id, len
            )));
        }
        self.sequences.insert(record.id.clone(), record);
        Ok(())
    }

    /// Add a linear sequence without gaps
    pub fn add_sequence(&mut self, id: impl Into<SeqId>, residues: impl Into<String>) {
        let id = id.into();
        self.sequences.insert(
            id.clone(),
            SequenceRecord {
                id,
                residues: residues.into(),
                gaps: GapMap::default(),
                topology: Topology::Linear,
            },
        );
    }

    /// Add a linear sequence containing gaps of unknown residues
    pub fn add_gapped_sequence(
        &mut self,
        id: impl Into<SeqId>,
        residues: impl Into<String>,
        gaps: Vec<SeqRange>,
    ) -> Result<(), LocEditError> {
        self.add_record(SequenceRecord {
            id: id.into(),
            residues: residues.into(),
            gaps: GapMap::new(gaps)?,
            topology: Topology::Linear,
        })
    }

    /// Change the topology of a sequence already in the provider
    pub fn set_topology(&mut self, id: &SeqId, topology: Topology) -> Result<(), LocEditError> {
        let record = self.record(id)?;
        record.topology = topology;
        Ok(())
    }

    fn record(&mut self, id: &SeqId) -> Result<&mut SequenceRecord, LocEditError> {
        self.sequences
            .get_mut(id)
            .ok_or_else(|| LocEditError::SequenceNotFound { id: id.to_string() })
    }

    fn lookup(&self, id: &SeqId) -> Result<&SequenceRecord, LocEditError> {
        self.sequences
            .get(id)
            .ok_or_else(|| LocEditError::SequenceNotFound { id: id.to_string() })
    }

    /// Number of sequences held
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Create a provider with some test sequences
    ///
    /// - `nuc1`: 60 bases holding the coding region `[0, 26]` (`MPRKTEIN*`)
    ///   followed by a second copy of it at `[30, 56]`
    /// - `delta1`: 34 bases with a gap at `[12, 21]`
    /// - `plasmid1`: a 30-base circular sequence
    pub fn with_test_data() -> Self {
        let mut provider = Self::new();

        provider.add_sequence(
            "nuc1",
            "ATGCCCAGAAAAACAGAGATAAACTAAGGGATGCCCAGAAAAACAGAGATAAACTAAGGG",
        );

        provider.sequences.insert(
            SeqId::from("delta1"),
            SequenceRecord {
                id: SeqId::from("delta1"),
                residues: "ATGCCCAGAAAANNNNNNNNNNAAACAGAGATAA".to_string(),
                gaps: GapMap::new(vec![SeqRange { from: 12, to: 21 }]).unwrap_or_default(),
                topology: Topology::Linear,
            },
        );

        provider.sequences.insert(
            SeqId::from("plasmid1"),
            SequenceRecord {
                id: SeqId::from("plasmid1"),
                residues: "ATGAAACCCGGGTTTAAACCCGGGTTTTAA".to_string(),
                gaps: GapMap::default(),
                topology: Topology::Circular,
            },
        );

        provider
    }
}

impl SequenceProvider for MockProvider {
    fn get_length(&self, id: &SeqId) -> Result<u64, LocEditError> {
        Ok(self.lookup(id)?.residues.len() as u64)
    }

    fn get_residues(&self, id: &SeqId, start: u64, end: u64) -> Result<String, LocEditError> {
        let record = self.lookup(id)?;
        let len = record.residues.len() as u64;
        if start > end || end > len {
            return Err(LocEditError::ResiduesNotAvailable {
                id: id.to_string(),
                start,
                end,
            });
        }
        record
            .residues
            .get(start as usize..end as usize)
            .map(|s| s.to_ascii_uppercase())
            .ok_or_else(|| LocEditError::ResiduesNotAvailable {
                id: id.to_string(),
                start,
                end,
            })
    }

    fn get_topology(&self, id: &SeqId) -> Result<Topology, LocEditError> {
        Ok(self.lookup(id)?.topology)
    }

    fn get_gap_map(&self, id: &SeqId) -> Result<GapMap, LocEditError> {
        Ok(self.lookup(id)?.gaps.clone())
    }
}
