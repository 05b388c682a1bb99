//! Brand-to-brand similarity.
//!
//! A fixed weighted sum of independent sub-scores: set overlap (Jaccard) for
//! list-like features, exact match for scalar codes. Mutual absence never
//! scores: two empty sets have Jaccard 0 and two missing scalars are unequal.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::record::BrandRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityWeights {
    pub style: f64,
    pub price: f64,
    pub gender: f64,
    pub identity: f64,
    pub trend: f64,
    pub model: f64,
    pub channels: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            style: 0.25,
            price: 0.15,
            gender: 0.10,
            identity: 0.20,
            trend: 0.10,
            model: 0.10,
            channels: 0.10,
        }
    }
}

impl SimilarityWeights {
    pub fn total(&self) -> f64 {
        self.style
            + self.price
            + self.gender
            + self.identity
            + self.trend
            + self.model
            + self.channels
    }
}

/// Per-feature sub-scores, each in [0, 1] before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SimilarityBreakdown {
    pub style: f64,
    pub price: f64,
    pub gender: f64,
    pub identity: f64,
    pub trend: f64,
    pub model: f64,
    pub channels: f64,
}

/// Weighted sums are snapped to this many decimal places, so summing the
/// default weights yields exactly 1.0.
const SCORE_DECIMALS: i32 = 12;

fn snap(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    (score * scale).round() / scale
}

impl SimilarityBreakdown {
    pub fn weighted(&self, w: &SimilarityWeights) -> f64 {
        let score = w.style * self.style
            + w.price * self.price
            + w.gender * self.gender
            + w.identity * self.identity
            + w.trend * self.trend
            + w.model * self.model
            + w.channels * self.channels;
        snap(score).clamp(0.0, 1.0)
    }
}

/// |A ∩ B| / |A ∪ B| over distinct elements; 0 when both are empty.
pub fn jaccard<'a>(
    a: impl IntoIterator<Item = &'a str>,
    b: impl IntoIterator<Item = &'a str>,
) -> f64 {
    let a: BTreeSet<&str> = a.into_iter().filter(|s| !s.is_empty()).collect();
    let b: BTreeSet<&str> = b.into_iter().filter(|s| !s.is_empty()).collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

fn exact(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

fn styles(record: &BrandRecord) -> impl Iterator<Item = &str> {
    record
        .dna
        .style_primary()
        .into_iter()
        .chain(record.dna.style_secondary().iter().map(String::as_str))
}

pub fn similarity_breakdown(a: &BrandRecord, b: &BrandRecord) -> SimilarityBreakdown {
    let (da, db) = (&a.dna, &b.dna);
    SimilarityBreakdown {
        style: jaccard(styles(a), styles(b)),
        price: exact(da.price_segment(), db.price_segment()),
        gender: exact(da.gender_focus(), db.gender_focus()),
        identity: jaccard(
            da.identity_categories().iter().map(String::as_str),
            db.identity_categories().iter().map(String::as_str),
        ),
        trend: exact(da.trend_adoption_type(), db.trend_adoption_type()),
        model: exact(da.business_model(), db.business_model()),
        channels: jaccard(
            da.channels().iter().map(String::as_str),
            db.channels().iter().map(String::as_str),
        ),
    }
}

pub fn similarity_with(weights: &SimilarityWeights, a: &BrandRecord, b: &BrandRecord) -> f64 {
    similarity_breakdown(a, b).weighted(weights)
}

/// Similarity in [0, 1] with the default weights.
pub fn similarity(a: &BrandRecord, b: &BrandRecord) -> f64 {
    similarity_with(&SimilarityWeights::default(), a, b)
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarBrand<'a> {
    pub brand: &'a BrandRecord,
    pub score: f64,
}

pub const DEFAULT_TOP_N: usize = 5;

/// The `n` brands most similar to `record`, best first.
///
/// The record itself (matched by name) is excluded; equal scores keep their
/// collection order.
pub fn top_similar<'a>(
    record: &BrandRecord,
    collection: &'a [BrandRecord],
    n: usize,
) -> Vec<SimilarBrand<'a>> {
    let mut ranked: Vec<SimilarBrand<'a>> = collection
        .iter()
        .filter(|other| other.name() != record.name())
        .map(|other| SimilarBrand {
            brand: other,
            score: similarity(record, other),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}
