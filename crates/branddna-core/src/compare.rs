//! Side-by-side comparison table.

use serde::Serialize;

use crate::confidence::overall_confidence;
use crate::record::BrandRecord;
use crate::taxonomy::display_label;
use crate::value::AttrValue;

pub const MISSING: &str = "—";

#[derive(Debug, Clone, Copy)]
enum Cell {
    Label(&'static str),
    Labels(&'static str),
    Number(&'static str),
    OverallConfidence,
}

const ROWS: [(&str, Cell); 15] = [
    ("Price segment", Cell::Label("dna.positioning.price_segment")),
    ("Primary style", Cell::Label("dna.style.style_primary")),
    ("Secondary style", Cell::Labels("dna.style.style_secondary")),
    ("Gender", Cell::Label("dna.audience.gender_focus")),
    ("Archetype", Cell::Label("dna.essence.archetype_primary")),
    ("Identity categories", Cell::Labels("dna.product.identity_categories")),
    ("Preferred fit", Cell::Label("dna.style.fit_preference")),
    ("Branding visibility", Cell::Label("dna.style.branding_visibility")),
    ("Promo dependency", Cell::Label("dna.positioning.promo_dependency")),
    ("Trend adoption", Cell::Label("dna.trend_behavior.trend_adoption_type")),
    ("Business model", Cell::Label("dna.operations.business_model")),
    ("Channels", Cell::Labels("dna.operations.channels")),
    ("Creative risk", Cell::Label("dna.essence.creative_risk_level")),
    ("Novelty tolerance", Cell::Number("dna.essence.novelty_tolerance")),
    ("Overall confidence", Cell::OverallConfidence),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRow {
    pub label: String,
    pub values: Vec<String>,
    /// Every brand shows the same value in this row.
    pub all_same: bool,
}

fn render(cell: Cell, brand: &BrandRecord) -> String {
    match cell {
        Cell::Label(path) => brand
            .resolve(path)
            .and_then(AttrValue::as_text)
            .filter(|s| !s.is_empty())
            .map(display_label)
            .unwrap_or_else(|| MISSING.to_string()),
        Cell::Labels(path) => {
            let labels: Vec<String> = brand
                .resolve(path)
                .map(|v| v.categories())
                .unwrap_or_default()
                .into_iter()
                .map(display_label)
                .collect();
            if labels.is_empty() {
                MISSING.to_string()
            } else {
                labels.join(", ")
            }
        }
        Cell::Number(path) => brand
            .resolve(path)
            .and_then(AttrValue::as_number)
            .map(|n| n.to_string())
            .unwrap_or_else(|| MISSING.to_string()),
        Cell::OverallConfidence => {
            format!("{}%", (overall_confidence(brand) * 100.0).round())
        }
    }
}

/// Comparison rows for `brands`, in the order given.
pub fn compare_rows(brands: &[&BrandRecord]) -> Vec<CompareRow> {
    ROWS.iter()
        .map(|&(label, cell)| {
            let values: Vec<String> = brands.iter().map(|b| render(cell, b)).collect();
            let all_same = values.windows(2).all(|w| w[0] == w[1]);
            CompareRow {
                label: label.to_string(),
                values,
                all_same,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand(name: &str, dna: serde_json::Value) -> BrandRecord {
        BrandRecord::from_json(json!({ "identity": { "name": name }, "dna": dna })).unwrap()
    }

    #[test]
    fn rows_render_labels_lists_and_numbers() {
        let a = brand(
            "A",
            json!({
                "positioning": { "price_segment": "ultra_lujo", "confidence": 0.9 },
                "operations": { "channels": ["dtc", "marketplace_first"] },
                "essence": { "novelty_tolerance": 0.35 }
            }),
        );
        let b = brand(
            "B",
            json!({ "positioning": { "price_segment": "ultra_lujo", "confidence": 0.9 } }),
        );
        let rows = compare_rows(&[&a, &b]);
        assert_eq!(rows.len(), 15);

        let price = &rows[0];
        assert_eq!(price.values, vec!["Ultra Lujo", "Ultra Lujo"]);
        assert!(price.all_same);

        let channels = rows.iter().find(|r| r.label == "Channels").unwrap();
        assert_eq!(channels.values, vec!["Dtc, Marketplace First", MISSING]);
        assert!(!channels.all_same);

        let novelty = rows.iter().find(|r| r.label == "Novelty tolerance").unwrap();
        assert_eq!(novelty.values, vec!["0.35", MISSING]);

        let conf = rows.last().unwrap();
        assert_eq!(conf.values, vec!["90%", "90%"]);
    }
}
