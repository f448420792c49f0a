//! Genetic codes and codon tables.

use crate::error::LocEditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A single nucleotide base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    T,
    C,
    A,
    G,
}

impl Base {
    /// Parse a base from a character.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'T' | 'U' => Some(Base::T), // U is treated as T
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            _ => None,
        }
    }

    /// Convert to character.
    pub fn to_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
        }
    }

    /// Watson-Crick partner
    pub fn complement(self) -> Self {
        match self {
            Base::A => Base::T,
            Base::T => Base::A,
            Base::G => Base::C,
            Base::C => Base::G,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A codon (three nucleotides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codon([Base; 3]);

impl Codon {
    /// Create a new codon from three bases.
    pub fn new(b1: Base, b2: Base, b3: Base) -> Self {
        Self([b1, b2, b3])
    }

    /// Parse a codon from a string. Ambiguity codes yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let b1 = Base::from_char(chars.next()?)?;
        let b2 = Base::from_char(chars.next()?)?;
        let b3 = Base::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self([b1, b2, b3]))
    }

    /// Get the three bases.
    pub fn bases(&self) -> &[Base; 3] {
        &self.0
    }

    /// Position in the TCAG-ordered 64-entry tables
    fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, b| acc * 4 + *b as usize)
    }

    fn from_index(index: usize) -> Self {
        const BASES: [Base; 4] = [Base::T, Base::C, Base::A, Base::G];
        Self([
            BASES[(index / 16) % 4],
            BASES[(index / 4) % 4],
            BASES[index % 4],
        ])
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Codon-to-amino-acid table of one genetic code.
///
/// Amino acids are one-letter codes with `*` for stop.
#[derive(Debug, Clone)]
pub struct CodonTable {
    amino_acids: [u8; 64],
    starts: [bool; 64],
}

impl CodonTable {
    /// Build a table from 64-character amino-acid and start rows in TCAG order
    fn from_rows(amino_acids: &str, starts: &str) -> Self {
        let mut table = Self {
            amino_acids: [b'X'; 64],
            starts: [false; 64],
        };
        for (i, aa) in amino_acids.bytes().take(64).enumerate() {
            table.amino_acids[i] = aa;
        }
        for (i, s) in starts.bytes().take(64).enumerate() {
            table.starts[i] = s == b'M';
        }
        table
    }

    /// Get the amino acid encoded by a codon.
    pub fn amino_acid_for(&self, codon: &Codon) -> char {
        self.amino_acids[codon.index()] as char
    }

    /// Translate a three-letter string; anything unreadable becomes `X`.
    pub fn translate_codon(&self, codon: &str) -> char {
        Codon::parse(codon).map_or('X', |c| self.amino_acid_for(&c))
    }

    /// Check if a codon is a stop codon.
    pub fn is_stop(&self, codon: &Codon) -> bool {
        self.amino_acid_for(codon) == '*'
    }

    /// Check if a codon may initiate translation, alternative starts included.
    pub fn is_start(&self, codon: &Codon) -> bool {
        self.starts[codon.index()]
    }

    /// Get all stop codons.
    pub fn stop_codons(&self) -> Vec<Codon> {
        (0..64)
            .map(Codon::from_index)
            .filter(|c| self.is_stop(c))
            .collect()
    }

    /// Get all start codons.
    pub fn start_codons(&self) -> Vec<Codon> {
        (0..64)
            .map(Codon::from_index)
            .filter(|c| self.is_start(c))
            .collect()
    }
}

/// Genetic codes with a built-in codon table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GeneticCode {
    /// Table 1
    Standard,
    /// Table 2
    VertebrateMitochondrial,
    /// Table 11, bacterial, archaeal and plant plastid
    Bacterial,
}

static STANDARD: OnceLock<CodonTable> = OnceLock::new();
static VERTEBRATE_MITO: OnceLock<CodonTable> = OnceLock::new();
static BACTERIAL: OnceLock<CodonTable> = OnceLock::new();

impl GeneticCode {
    /// Look up a code by its numeric table id
    pub fn from_id(id: u8) -> Result<Self, LocEditError> {
        match id {
            1 => Ok(GeneticCode::Standard),
            2 => Ok(GeneticCode::VertebrateMitochondrial),
            11 => Ok(GeneticCode::Bacterial),
            code => Err(LocEditError::UnknownGeneticCode { code }),
        }
    }

    /// Numeric table id
    pub fn id(self) -> u8 {
        match self {
            GeneticCode::Standard => 1,
            GeneticCode::VertebrateMitochondrial => 2,
            GeneticCode::Bacterial => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneticCode::Standard => "Standard",
            GeneticCode::VertebrateMitochondrial => "Vertebrate Mitochondrial",
            GeneticCode::Bacterial => "Bacterial, Archaeal and Plant Plastid",
        }
    }

    /// Codon table for this code, built on first use
    pub fn table(self) -> &'static CodonTable {
        match self {
            GeneticCode::Standard => STANDARD.get_or_init(|| {
                CodonTable::from_rows(
                    "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                    "---M------**--*----M---------------M----------------------------",
                )
            }),
            GeneticCode::VertebrateMitochondrial => VERTEBRATE_MITO.get_or_init(|| {
                CodonTable::from_rows(
                    "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
                    "----------**--------------------MMMM----------**---M------------",
                )
            }),
            GeneticCode::Bacterial => BACTERIAL.get_or_init(|| {
                CodonTable::from_rows(
                    "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
                    "---M------**--*----M------------MMMM---------------M------------",
                )
            }),
        }
    }
}

impl TryFrom<u8> for GeneticCode {
    type Error = LocEditError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        GeneticCode::from_id(id)
    }
}

impl From<GeneticCode> for u8 {
    fn from(code: GeneticCode) -> Self {
        code.id()
    }
}

impl fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}
