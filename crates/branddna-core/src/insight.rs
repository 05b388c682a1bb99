//! Collection-wide aggregates: distributions, cross-tabs, block completeness.
//!
//! Every function here is total over sparse input. Absent attributes are
//! skipped, never counted under a placeholder category.

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;

use crate::confidence::mean;
use crate::levels::{PriceSegment, PromoDependency};
use crate::record::{Block, BrandRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Count category codes at `path`.
///
/// With `count_lists`, list values contribute one count per element;
/// otherwise only scalar text values are counted. Output is ordered by count
/// descending, ties by first appearance.
pub(crate) fn tally<R: Borrow<BrandRecord>>(
    collection: &[R],
    path: &str,
    count_lists: bool,
) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in collection {
        let Some(value) = record.borrow().resolve(path) else {
            continue;
        };
        if value.as_list().is_some() && !count_lists {
            continue;
        }
        for code in value.categories() {
            match index.get(code) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(code.to_string(), counts.len());
                    counts.push(ValueCount {
                        value: code.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable: ties keep first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Frequency distribution of the values at `path`.
///
/// `multi` marks a list-valued attribute whose elements are counted
/// individually; list values at a non-`multi` path are ignored.
pub fn frequency<R: Borrow<BrandRecord>>(
    collection: &[R],
    path: &str,
    multi: bool,
) -> Vec<ValueCount> {
    tally(collection, path, multi)
}

/// Count of records whose scalar at `path_a` equals `values_a[i]` and whose
/// scalar at `path_b` equals `values_b[j]`, as `matrix[i][j]`.
pub fn cross_tab<R: Borrow<BrandRecord>>(
    collection: &[R],
    path_a: &str,
    values_a: &[&str],
    path_b: &str,
    values_b: &[&str],
) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; values_b.len()]; values_a.len()];
    for record in collection {
        let record = record.borrow();
        let a = record.resolve(path_a).and_then(|v| v.as_text());
        let b = record.resolve(path_b).and_then(|v| v.as_text());
        let (Some(a), Some(b)) = (a, b) else {
            continue;
        };
        let rows = values_a.iter().enumerate().filter(|(_, v)| **v == a);
        for (i, _) in rows {
            for (j, _) in values_b.iter().enumerate().filter(|(_, v)| **v == b) {
                matrix[i][j] += 1;
            }
        }
    }
    matrix
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockAverage {
    pub block: Block,
    pub average: f64,
    /// Records that carry a confidence for this block.
    pub samples: usize,
}

/// Mean confidence per primary block over the records that report one.
pub fn block_confidence_averages<R: Borrow<BrandRecord>>(collection: &[R]) -> Vec<BlockAverage> {
    Block::PRIMARY
        .iter()
        .map(|&block| {
            let values: Vec<f64> = collection
                .iter()
                .filter_map(|r| r.borrow().dna.confidence(block))
                .collect();
            BlockAverage {
                block,
                samples: values.len(),
                average: mean(values),
            }
        })
        .collect()
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub title: String,
    pub path: String,
    pub values: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub title: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

/// The full insights dashboard for a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub total: usize,
    pub distributions: Vec<Distribution>,
    pub completeness: Vec<BlockAverage>,
    pub promo_by_price: CrossTab,
}

const DISTRIBUTIONS: [(&str, &str, bool); 5] = [
    ("Price segment distribution", "dna.positioning.price_segment", false),
    ("Top primary styles", "dna.style.style_primary", false),
    ("Top identity categories", "dna.product.identity_categories", true),
    ("Gender mix", "dna.audience.gender_focus", false),
    ("Trend adoption type", "dna.trend_behavior.trend_adoption_type", false),
];

impl InsightReport {
    pub fn build(collection: &[&BrandRecord]) -> Self {
        let distributions = DISTRIBUTIONS
            .iter()
            .map(|&(title, path, multi)| Distribution {
                title: title.to_string(),
                path: path.to_string(),
                values: frequency(collection, path, multi),
            })
            .collect();

        let rows: Vec<&str> = PriceSegment::LADDER.iter().map(|p| p.code()).collect();
        let columns: Vec<&str> = PromoDependency::LADDER.iter().map(|p| p.code()).collect();
        let counts = cross_tab(
            collection,
            "dna.positioning.price_segment",
            &rows,
            "dna.positioning.promo_dependency",
            &columns,
        );

        Self {
            total: collection.len(),
            distributions,
            completeness: block_confidence_averages(collection),
            promo_by_price: CrossTab {
                title: "Promo dependency vs price segment".to_string(),
                rows: rows.iter().map(|s| s.to_string()).collect(),
                columns: columns.iter().map(|s| s.to_string()).collect(),
                counts,
            },
        }
    }
}
