//! Leaf elements of a location: sequence ids, strands, points and intervals

use crate::coords::SeqRange;
use crate::error::LocEditError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of one sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeqId(String);

impl SeqId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeqId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SeqId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&SeqId> for SeqId {
    fn from(id: &SeqId) -> Self {
        id.clone()
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strand orientation of a location element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = ".")]
    #[default]
    Unknown,
    #[serde(rename = "b")]
    Both,
}

impl Strand {
    /// Only `Minus` reads right-to-left; every other strand reads like `Plus`.
    #[inline]
    pub fn is_minus(self) -> bool {
        matches!(self, Strand::Minus)
    }

    /// Strand after reverse complementation
    pub fn reversed(self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
            other => other,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
            Strand::Both => write!(f, "b"),
        }
    }
}

/// A contiguous stretch `[from, to]` of one sequence
///
/// `partial_start` and `partial_stop` describe the biological 5' and 3'
/// ends, so on the minus strand `partial_start` qualifies `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub id: SeqId,
    pub from: u64,
    pub to: u64,
    #[serde(default)]
    pub strand: Strand,
    #[serde(default)]
    pub partial_start: bool,
    #[serde(default)]
    pub partial_stop: bool,
}

impl Interval {
    /// Create an interval with unknown strand and no partial ends
    pub fn new(id: impl Into<SeqId>, from: u64, to: u64) -> Result<Self, LocEditError> {
        SeqRange::new(from, to)?;
        Ok(Self {
            id: id.into(),
            from,
            to,
            strand: Strand::Unknown,
            partial_start: false,
            partial_stop: false,
        })
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    pub fn with_partial(mut self, partial_start: bool, partial_stop: bool) -> Self {
        self.partial_start = partial_start;
        self.partial_stop = partial_stop;
        self
    }

    /// Number of residues covered
    #[inline]
    pub fn len(&self) -> u64 {
        self.to.saturating_sub(self.from).saturating_add(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn is_minus(&self) -> bool {
        self.strand.is_minus()
    }

    /// Biological start: `to` on the minus strand, `from` otherwise
    #[inline]
    pub fn start(&self) -> u64 {
        if self.is_minus() {
            self.to
        } else {
            self.from
        }
    }

    /// Biological stop: `from` on the minus strand, `to` otherwise
    #[inline]
    pub fn stop(&self) -> u64 {
        if self.is_minus() {
            self.from
        } else {
            self.to
        }
    }

    pub(crate) fn set_start(&mut self, pos: u64) {
        if self.is_minus() {
            self.to = pos;
        } else {
            self.from = pos;
        }
    }

    pub(crate) fn set_stop(&mut self, pos: u64) {
        if self.is_minus() {
            self.from = pos;
        } else {
            self.to = pos;
        }
    }

    /// Partial flag attached to the `from` coordinate
    #[inline]
    pub fn partial_low(&self) -> bool {
        if self.is_minus() {
            self.partial_stop
        } else {
            self.partial_start
        }
    }

    /// Partial flag attached to the `to` coordinate
    #[inline]
    pub fn partial_high(&self) -> bool {
        if self.is_minus() {
            self.partial_start
        } else {
            self.partial_stop
        }
    }

    pub(crate) fn set_partial_low(&mut self, value: bool) {
        if self.is_minus() {
            self.partial_stop = value;
        } else {
            self.partial_start = value;
        }
    }

    pub(crate) fn set_partial_high(&mut self, value: bool) {
        if self.is_minus() {
            self.partial_start = value;
        } else {
            self.partial_stop = value;
        }
    }

    pub(crate) fn validate(&self) -> Result<(), LocEditError> {
        SeqRange::new(self.from, self.to).map(|_| ())
    }
}

/// A single residue position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub id: SeqId,
    pub position: u64,
    #[serde(default)]
    pub strand: Strand,
    #[serde(default)]
    pub partial: bool,
}

impl Point {
    pub fn new(id: impl Into<SeqId>, position: u64) -> Self {
        Self {
            id: id.into(),
            position,
            strand: Strand::Unknown,
            partial: false,
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Widen this point into a one-residue interval carrying the same flags
    pub fn to_interval(&self) -> Interval {
        Interval {
            id: self.id.clone(),
            from: self.position,
            to: self.position,
            strand: self.strand,
            partial_start: self.partial,
            partial_stop: self.partial,
        }
    }
}

/// Several positions on one sequence sharing a strand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedPoints {
    pub id: SeqId,
    pub points: Vec<u64>,
    #[serde(default)]
    pub strand: Strand,
}

impl PackedPoints {
    pub fn new(id: impl Into<SeqId>, points: Vec<u64>) -> Self {
        Self {
            id: id.into(),
            points,
            strand: Strand::Unknown,
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }
}
