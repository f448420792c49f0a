//! Annotated features
//!
//! A [`Feature`] couples a [`Location`] with a feature-level partial flag
//! and type-specific data. Coding regions carry a reading frame, a genetic
//! code and code-break sub-locations; RNAs may carry an anticodon
//! sub-location. Sub-locations move in lock-step with the main location
//! under every coordinate transform.

mod frame;

pub use frame::Frame;

use crate::location::Location;
use crate::translate::GeneticCode;
use serde::{Deserialize, Serialize};

/// Non-standard translation of one codon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBreak {
    pub location: Location,
    /// One-letter amino acid code
    pub amino_acid: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingRegion {
    #[serde(default)]
    pub frame: Frame,
    pub genetic_code: GeneticCode,
    #[serde(default)]
    pub code_breaks: Vec<CodeBreak>,
}

impl CodingRegion {
    pub fn new(frame: Frame, genetic_code: GeneticCode) -> Self {
        Self {
            frame,
            genetic_code,
            code_breaks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RnaKind {
    Mrna,
    Trna,
    Rrna,
    Ncrna,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rna {
    pub kind: RnaKind,
    #[serde(default)]
    pub anticodon: Option<Location>,
}

/// Type-specific payload of a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureData {
    CodingRegion(CodingRegion),
    Rna(Rna),
    Gene,
    /// Any other feature type, by name
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub location: Location,
    /// True when either end of the location is partial
    #[serde(default)]
    pub partial: bool,
    pub data: FeatureData,
}

impl Feature {
    /// Create a feature with its partial flag derived from the location
    pub fn new(location: Location, data: FeatureData) -> Self {
        let mut feature = Self {
            location,
            partial: false,
            data,
        };
        feature.sync_partial();
        feature
    }

    pub fn coding_region(location: Location, frame: Frame, genetic_code: GeneticCode) -> Self {
        Self::new(
            location,
            FeatureData::CodingRegion(CodingRegion::new(frame, genetic_code)),
        )
    }

    pub fn rna(location: Location, kind: RnaKind) -> Self {
        Self::new(location, FeatureData::Rna(Rna { kind, anticodon: None }))
    }

    pub fn gene(location: Location) -> Self {
        Self::new(location, FeatureData::Gene)
    }

    pub fn with_code_break(mut self, location: Location, amino_acid: char) -> Self {
        if let FeatureData::CodingRegion(cds) = &mut self.data {
            cds.code_breaks.push(CodeBreak {
                location,
                amino_acid,
            });
        }
        self
    }

    pub fn with_anticodon(mut self, anticodon: Location) -> Self {
        if let FeatureData::Rna(rna) = &mut self.data {
            rna.anticodon = Some(anticodon);
        }
        self
    }

    pub fn is_coding(&self) -> bool {
        matches!(self.data, FeatureData::CodingRegion(_))
    }

    pub fn cds(&self) -> Option<&CodingRegion> {
        match &self.data {
            FeatureData::CodingRegion(cds) => Some(cds),
            _ => None,
        }
    }

    pub fn cds_mut(&mut self) -> Option<&mut CodingRegion> {
        match &mut self.data {
            FeatureData::CodingRegion(cds) => Some(cds),
            _ => None,
        }
    }

    /// Reading frame of a coding region
    pub fn frame(&self) -> Option<Frame> {
        self.cds().map(|cds| cds.frame)
    }

    /// Recompute the feature-level partial flag from the location.
    ///
    /// Returns true if the flag changed.
    pub fn sync_partial(&mut self) -> bool {
        let partial = self.location.is_partial_start() || self.location.is_partial_stop();
        let changed = partial != self.partial;
        self.partial = partial;
        changed
    }
}
