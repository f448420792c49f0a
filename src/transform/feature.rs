//! Coordinate transforms applied to whole features
//!
//! Code breaks and anticodons are sub-locations of a feature and must move
//! together with the feature's own location.

use super::insert::adjust_for_insert;
use super::revcomp::reverse_complement_location;
use super::trim::adjust_for_trim;
use crate::error::LocEditError;
use crate::feature::{CodeBreak, Feature, FeatureData};
use crate::location::SeqId;
use crate::reference::SequenceProvider;

/// Result of [`adjust_feature_for_trim`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTrimOutcome {
    /// The trimmed feature, or `None` when its location was cut away
    pub feature: Option<Feature>,
    pub left_trim_amount: u64,
    pub adjusted: bool,
}

/// Trim a feature and its sub-locations for the removal of `[trim_from, trim_to]`
///
/// Code breaks that fall inside the removed range are dropped and a removed
/// anticodon is cleared. When residues were removed in front of a coding
/// region's start, its frame is recomputed so the reading register is kept
/// and its start is marked partial.
pub fn adjust_feature_for_trim(
    feature: &Feature,
    trim_from: u64,
    trim_to: u64,
    target: &SeqId,
) -> Result<FeatureTrimOutcome, LocEditError> {
    let outcome = adjust_for_trim(&feature.location, trim_from, trim_to, target)?;
    let Some(location) = outcome.location else {
        return Ok(FeatureTrimOutcome {
            feature: None,
            left_trim_amount: outcome.left_trim_amount,
            adjusted: true,
        });
    };

    let mut trimmed = feature.clone();
    trimmed.location = location;
    let mut adjusted = outcome.adjusted;

    match &mut trimmed.data {
        FeatureData::CodingRegion(cds) => {
            let mut kept = Vec::with_capacity(cds.code_breaks.len());
            for cb in cds.code_breaks.drain(..) {
                let sub = adjust_for_trim(&cb.location, trim_from, trim_to, target)?;
                adjusted |= sub.adjusted;
                if let Some(location) = sub.location {
                    kept.push(CodeBreak {
                        location,
                        amino_acid: cb.amino_acid,
                    });
                }
            }
            cds.code_breaks = kept;

            if outcome.left_trim_amount > 0 {
                cds.frame = cds.frame.after_trim(outcome.left_trim_amount);
                trimmed.location.set_partial_start(true);
            }
        }
        FeatureData::Rna(rna) => {
            if let Some(anticodon) = rna.anticodon.take() {
                let sub = adjust_for_trim(&anticodon, trim_from, trim_to, target)?;
                adjusted |= sub.adjusted;
                rna.anticodon = sub.location;
            }
        }
        FeatureData::Gene | FeatureData::Other(_) => {}
    }

    adjusted |= trimmed.sync_partial();
    Ok(FeatureTrimOutcome {
        feature: Some(trimmed),
        left_trim_amount: outcome.left_trim_amount,
        adjusted,
    })
}

/// Shift a feature and its sub-locations for residues inserted at `[insert_from, insert_to]`
pub fn adjust_feature_for_insert(
    feature: &Feature,
    insert_from: u64,
    insert_to: u64,
    target: &SeqId,
) -> Result<Feature, LocEditError> {
    let mut shifted = feature.clone();
    shifted.location = adjust_for_insert(&feature.location, insert_from, insert_to, target)?;
    match &mut shifted.data {
        FeatureData::CodingRegion(cds) => {
            for cb in &mut cds.code_breaks {
                cb.location = adjust_for_insert(&cb.location, insert_from, insert_to, target)?;
            }
        }
        FeatureData::Rna(rna) => {
            if let Some(anticodon) = &rna.anticodon {
                rna.anticodon = Some(adjust_for_insert(anticodon, insert_from, insert_to, target)?);
            }
        }
        FeatureData::Gene | FeatureData::Other(_) => {}
    }
    Ok(shifted)
}

/// Reverse complement a feature together with its code breaks and anticodon
pub fn reverse_complement_feature<P: SequenceProvider + ?Sized>(
    feature: &Feature,
    provider: &P,
) -> Feature {
    let mut flipped = feature.clone();
    flipped.location = reverse_complement_location(&feature.location, provider);
    match &mut flipped.data {
        FeatureData::CodingRegion(cds) => {
            for cb in &mut cds.code_breaks {
                cb.location = reverse_complement_location(&cb.location, provider);
            }
        }
        FeatureData::Rna(rna) => {
            if let Some(anticodon) = &rna.anticodon {
                rna.anticodon = Some(reverse_complement_location(anticodon, provider));
            }
        }
        FeatureData::Gene | FeatureData::Other(_) => {}
    }
    flipped.sync_partial();
    flipped
}
