//! Faceted query over a brand collection.
//!
//! The query is an immutable [`QueryState`] value; [`apply`] derives the
//! filtered list and [`facet_counts`] derives chip counts from the *full*
//! collection, so counts never shrink as filters are toggled.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::confidence::{overall_confidence, QUALITY_THRESHOLD};
use crate::insight::{tally, ValueCount};
use crate::record::BrandRecord;

// ============================================================================
// Facets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDef {
    pub key: String,
    pub label: String,
    /// Dotted path from the record root.
    pub path: String,
    /// The attribute is list-valued.
    #[serde(default)]
    pub multi: bool,
}

impl FacetDef {
    pub fn new(key: &str, label: &str, path: &str, multi: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            path: path.to_string(),
            multi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    pub facets: Vec<FacetDef>,
}

impl Default for FacetCatalog {
    fn default() -> Self {
        Self {
            facets: vec![
                FacetDef::new("price_segment", "Price segment", "dna.positioning.price_segment", false),
                FacetDef::new("style_primary", "Primary style", "dna.style.style_primary", false),
                FacetDef::new("gender_focus", "Gender", "dna.audience.gender_focus", false),
                FacetDef::new("archetype_primary", "Archetype", "dna.essence.archetype_primary", false),
                FacetDef::new("business_model", "Business model", "dna.operations.business_model", false),
                FacetDef::new("channels", "Channels", "dna.operations.channels", true),
                FacetDef::new("geography", "Geography", "dna.operations.geography", false),
                FacetDef::new("promo_dependency", "Promo dependency", "dna.positioning.promo_dependency", false),
                FacetDef::new("trend_adoption_type", "Trend adoption", "dna.trend_behavior.trend_adoption_type", false),
                FacetDef::new("occasion_focus", "Occasion", "dna.product.occasion_focus", true),
                FacetDef::new("identity_categories", "Identity categories", "dna.product.identity_categories", true),
            ],
        }
    }
}

impl FacetCatalog {
    pub fn get(&self, key: &str) -> Option<&FacetDef> {
        self.facets.iter().find(|f| f.key == key)
    }
}

// ============================================================================
// Query state
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hide_unknown: bool,
    /// Facet key → selected values. Empty sets impose no constraint.
    #[serde(default)]
    pub selections: BTreeMap<String, BTreeSet<String>>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_hide_unknown(mut self, hide: bool) -> Self {
        self.hide_unknown = hide;
        self
    }

    pub fn with_selection<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections
            .entry(key.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// A copy with `value` flipped in the selection for `key`.
    pub fn toggled(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        let selected = next.selections.entry(key.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected.is_empty() {
            next.selections.remove(key);
        }
        next
    }

    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        self.selections
            .get(key)
            .is_some_and(|values| values.contains(value))
    }

    /// True when any stage would drop records.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.hide_unknown
            || self.selections.values().any(|v| !v.is_empty())
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    Search,
    Quality,
    Facets,
}

impl FilterStage {
    pub const PIPELINE: [FilterStage; 3] =
        [FilterStage::Search, FilterStage::Quality, FilterStage::Facets];

    pub fn keeps(self, record: &BrandRecord, catalog: &FacetCatalog, state: &QueryState) -> bool {
        match self {
            FilterStage::Search => matches_search(record, &state.search),
            FilterStage::Quality => !state.hide_unknown || passes_quality(record),
            FilterStage::Facets => matches_facets(record, catalog, state),
        }
    }
}

fn matches_search(record: &BrandRecord, query: &str) -> bool {
    query.is_empty()
        || record
            .name()
            .to_lowercase()
            .contains(&query.to_lowercase())
}

fn passes_quality(record: &BrandRecord) -> bool {
    overall_confidence(record) >= QUALITY_THRESHOLD
}

fn matches_facets(record: &BrandRecord, catalog: &FacetCatalog, state: &QueryState) -> bool {
    state.selections.iter().all(|(key, selected)| {
        if selected.is_empty() {
            return true;
        }
        let Some(facet) = catalog.get(key) else {
            return true;
        };
        record
            .resolve(&facet.path)
            .map(|value| value.categories())
            .unwrap_or_default()
            .into_iter()
            .any(|code| selected.contains(code))
    })
}

/// Run `stages` in the given order.
pub fn apply_stages<'a>(
    collection: &'a [BrandRecord],
    catalog: &FacetCatalog,
    state: &QueryState,
    stages: &[FilterStage],
) -> Vec<&'a BrandRecord> {
    let mut result: Vec<&'a BrandRecord> = collection.iter().collect();
    for stage in stages {
        result.retain(|record| stage.keeps(record, catalog, state));
    }
    result
}

/// Search, then quality, then facets. Collection order is preserved.
pub fn apply<'a>(
    collection: &'a [BrandRecord],
    catalog: &FacetCatalog,
    state: &QueryState,
) -> Vec<&'a BrandRecord> {
    apply_stages(collection, catalog, state, &FilterStage::PIPELINE)
}

// ============================================================================
// Facet counts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCounts {
    pub key: String,
    pub label: String,
    pub values: Vec<ValueCount>,
}

impl FacetCounts {
    pub fn count_of(&self, value: &str) -> usize {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map_or(0, |v| v.count)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Value counts for every facet over the unfiltered collection.
///
/// List attributes count once per element; values are ordered by count,
/// ties by first appearance.
pub fn facet_counts(collection: &[BrandRecord], catalog: &FacetCatalog) -> Vec<FacetCounts> {
    catalog
        .facets
        .iter()
        .map(|facet| FacetCounts {
            key: facet.key.clone(),
            label: facet.label.clone(),
            values: tally(collection, &facet.path, true),
        })
        .collect()
}
