use rand::Rng;
use serde::{Deserialize, Serialize};

use super::convert::reading_text;
use super::units::{contains_digit, fuse_units, unit_width};
use crate::error::ProsodyError;
use crate::ScriptConverter;

/// Raw decoder output: text plus one log probability per generated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    pub text: String,
    #[serde(default)]
    pub token_log_probs: Vec<f32>,
}

impl GeneratedSequence {
    /// Product of the per-token probabilities.
    pub fn probability(&self) -> f64 {
        self.token_log_probs
            .iter()
            .map(|&lp| lp as f64)
            .sum::<f64>()
            .exp()
    }
}

/// A generated lyric with its reading split into mora units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub probability: f64,
    pub units: Vec<String>,
}

impl Candidate {
    /// Build a candidate whose `text` is already a phonetic reading.
    pub fn from_reading(text: impl Into<String>, probability: f64) -> Self {
        let text = text.into();
        let units = fuse_units(&text);
        Self {
            text,
            probability,
            units,
        }
    }

    /// Convert a generated sequence to its reading and fuse it into units.
    pub fn from_generated<C>(sequence: &GeneratedSequence, converter: &C) -> Result<Self, ProsodyError>
    where
        C: ScriptConverter + ?Sized,
    {
        let reading = reading_text(&converter.convert(&sequence.text)?);

        let units = fuse_units(&reading);
        Ok(Self {
            text: sequence.text.clone(),
            probability: sequence.probability(),
            units,
        })
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Enough units for the target and no digits in the reading.
    pub fn is_eligible(&self, target_count: usize) -> bool {
        self.unit_count() >= target_count && !self.units.iter().any(|u| contains_digit(u))
    }
}

/// The candidate chosen for a target count.
///
/// Only [`adjust`] changes `units` after selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub text: String,
    pub probability: f64,
    pub units: Vec<String>,
}

impl SelectionResult {
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

impl From<Candidate> for SelectionResult {
    fn from(candidate: Candidate) -> Self {
        Self {
            text: candidate.text,
            probability: candidate.probability,
            units: candidate.units,
        }
    }
}

/// Pick the eligible candidate with the fewest units not below `target_count`.
///
/// Ties go to the earliest candidate; probability is not consulted.
pub fn select(candidates: &[Candidate], target_count: usize) -> Result<SelectionResult, ProsodyError> {
    let mut best: Option<&Candidate> = None;

    for candidate in candidates {
        if !candidate.is_eligible(target_count) {
            log::debug!(
                "Ineligible candidate ({} units, target {target_count}): {:?}",
                candidate.unit_count(),
                candidate.text
            );
            continue;
        }
        if best.map_or(true, |b| candidate.unit_count() < b.unit_count()) {
            best = Some(candidate);
        }
    }

    let chosen = best.ok_or(ProsodyError::NoEligibleCandidate {
        target_count,
        candidates: candidates.len(),
    })?;

    log::info!(
        "Selected {:?} with {} units (target {target_count}, p={:.4})",
        chosen.text,
        chosen.unit_count(),
        chosen.probability
    );
    Ok(chosen.clone().into())
}

/// Merge adjacent units until exactly `target_count` remain.
///
/// Each step merges a randomly chosen single-character unit with its right
/// neighbour; already fused units are never extended. Fails with
/// [`ProsodyError::TargetAboveUnitCount`] when there are fewer units than the
/// target, and with [`ProsodyError::AdjustmentStalled`] when merges are still
/// needed but no single-character unit with a right neighbour is left.
pub fn adjust<R>(
    mut result: SelectionResult,
    target_count: usize,
    rng: &mut R,
) -> Result<SelectionResult, ProsodyError>
where
    R: Rng,
{
    if result.unit_count() < target_count {
        return Err(ProsodyError::TargetAboveUnitCount {
            unit_count: result.unit_count(),
            target_count,
        });
    }

    let mut remaining = result.unit_count() - target_count;
    let mut merges = 0usize;

    while remaining > 0 {
        let shrinkable = shrinkable_indices(&result.units);
        if shrinkable.is_empty() {
            return Err(ProsodyError::AdjustmentStalled {
                remaining,
                units: result.units,
            });
        }

        let index = shrinkable[rng.gen_range(0..shrinkable.len())];
        let next = result.units.remove(index + 1);
        result.units[index].push_str(&next);
        remaining -= 1;
        merges += 1;
    }

    if merges > 0 {
        log::info!("Merged {merges} unit pairs: {:?}", result.units);
    }
    Ok(result)
}

/// Indices `i` with a right neighbour whose unit is a single character.
fn shrinkable_indices(units: &[String]) -> Vec<usize> {
    let last_pair = units.len().saturating_sub(1);
    (0..last_pair)
        .filter(|&i| unit_width(&units[i]) < 2)
        .collect()
}
