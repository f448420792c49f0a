//! Residue access and translation over locations
//!
//! Used by the partial-end policies to tell whether a coding region has a
//! proper start and stop, and by callers checking that an edit kept the
//! protein intact.

mod codon;

pub use codon::{Base, Codon, CodonTable, GeneticCode};

use crate::error::LocEditError;
use crate::feature::Feature;
use crate::location::Location;
use crate::reference::SequenceProvider;

/// Reverse complement of a nucleotide string; unknown characters become `N`.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| Base::from_char(c).map_or('N', |b| b.complement().to_char()))
        .collect()
}

/// Residues of a location read 5' to 3', across every sequence it touches
pub fn location_residues<P: SequenceProvider + ?Sized>(
    location: &Location,
    provider: &P,
) -> Result<String, LocEditError> {
    let mut out = String::new();
    for leaf in location.leaves() {
        let residues = provider.get_residues(leaf.id, leaf.from, leaf.to + 1)?;
        if leaf.strand.is_minus() {
            out.push_str(&reverse_complement(&residues));
        } else {
            out.push_str(&residues);
        }
    }
    Ok(out)
}

/// Translate complete codons of `seq`; a trailing partial codon is dropped.
pub fn translate(seq: &str, table: &CodonTable) -> String {
    seq.as_bytes()
        .chunks_exact(3)
        .map(|chunk| {
            std::str::from_utf8(chunk).map_or('X', |codon| table.translate_codon(codon))
        })
        .collect()
}

/// Coding sequence of a coding region with the frame offset skipped
pub(crate) fn coding_sequence<P: SequenceProvider + ?Sized>(
    feature: &Feature,
    provider: &P,
) -> Option<String> {
    let cds = feature.cds()?;
    let residues = match location_residues(&feature.location, provider) {
        Ok(r) => r,
        Err(e) => {
            log::debug!("cannot read residues of {}: {}", feature.location, e);
            return None;
        }
    };
    let offset = cds.frame.offset() as usize;
    Some(residues.get(offset..).unwrap_or_default().to_string())
}

/// Translate a coding region
///
/// Honors the frame and genetic code. A complete start (not partial at the
/// 5' end) whose first codon is an initiator translates as `M`, alternative
/// start codons included. Returns `None` for non-coding features or when
/// residues are unavailable.
pub fn translate_cds<P: SequenceProvider + ?Sized>(feature: &Feature, provider: &P) -> Option<String> {
    let cds = feature.cds()?;
    let table = cds.genetic_code.table();
    let seq = coding_sequence(feature, provider)?;
    let mut protein = translate(&seq, table);

    if !feature.location.is_partial_start() && cds.frame.offset() == 0 {
        let starts_with_initiator = seq
            .get(..3)
            .and_then(Codon::parse)
            .is_some_and(|c| table.is_start(&c));
        if starts_with_initiator {
            protein.replace_range(..1, "M");
        }
    }
    Some(protein)
}
