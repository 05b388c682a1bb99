//! Data-quality scoring from per-block confidence.

use serde::Serialize;

use crate::record::{Block, BrandRecord, Dna};

/// Minimum overall confidence kept by the "hide unknown" quality filter.
pub const QUALITY_THRESHOLD: f64 = 0.5;

/// Mean of the present confidences over the primary blocks (`season_intent`
/// excluded). Blocks without a confidence contribute nothing; 0.0 when none
/// carry one.
pub fn overall_confidence(record: &BrandRecord) -> f64 {
    dna_confidence(&record.dna)
}

pub(crate) fn dna_confidence(dna: &Dna) -> f64 {
    mean(Block::PRIMARY.iter().filter_map(|b| dna.confidence(*b)))
}

/// Arithmetic mean; 0.0 for an empty sequence.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    High,
    Mid,
    Low,
}

impl QualityTier {
    /// Lower bounds are inclusive: 0.75 is `High`, 0.5 is `Mid`.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Self::High
        } else if score >= QUALITY_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Complete",
            Self::Mid => "Medium",
            Self::Low => "Low",
        }
    }

    /// Short class name for styling (`high` / `mid` / `low`).
    pub fn class(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
        }
    }
}

pub fn quality_label(score: f64) -> &'static str {
    QualityTier::from_score(score).label()
}
