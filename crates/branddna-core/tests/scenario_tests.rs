//! Worked examples over small hand-built collections.

use approx::assert_abs_diff_eq;
use branddna_core::filter::{apply, facet_counts};
use branddna_core::insight::InsightReport;
use branddna_core::viz::{radar_series, ScatterPlot, ScatterXAxis};
use branddna_core::{similarity, BrandRecord, FacetCatalog, QueryState};
use serde_json::{json, Value};

fn brand(name: &str, dna: Value) -> BrandRecord {
    BrandRecord::from_json(json!({ "brand": { "name": name }, "dna": dna })).unwrap()
}

#[test]
fn two_premium_brands_out_of_three() {
    let brands = vec![
        brand("Alpha", json!({ "positioning": { "price_segment": "premium" } })),
        brand("Beta", json!({ "positioning": { "price_segment": "masivo" } })),
        brand("Gamma", json!({ "positioning": { "price_segment": "premium" } })),
    ];
    let catalog = FacetCatalog::default();
    let filtered = apply(&brands, &catalog, &QueryState::new().with_search(""));
    assert_eq!(filtered.len(), 3);

    let counts = facet_counts(&brands, &catalog);
    let price = counts.iter().find(|c| c.key == "price_segment").unwrap();
    assert_eq!(price.count_of("premium"), 2);
}

#[test]
fn shared_primary_style_with_disjoint_categories() {
    let a = brand(
        "Alpha",
        json!({
            "style": { "style_primary": "minimalista" },
            "product": { "identity_categories": ["sastreria"] }
        }),
    );
    let b = brand(
        "Beta",
        json!({
            "style": { "style_primary": "minimalista" },
            "product": { "identity_categories": ["denim", "punto"] }
        }),
    );
    assert_abs_diff_eq!(similarity(&a, &b), 0.25, epsilon = 1e-12);
}

#[test]
fn quality_filter_boundary() {
    let brands = vec![
        brand("Low", json!({ "essence": { "confidence": 0.49 } })),
        brand("Edge", json!({ "essence": { "confidence": 0.5 } })),
    ];
    let state = QueryState::new().with_hide_unknown(true);
    let kept: Vec<&str> = apply(&brands, &FacetCatalog::default(), &state)
        .into_iter()
        .map(|b| b.name())
        .collect();
    assert_eq!(kept, vec!["Edge"]);
}

#[test]
fn scatter_falls_back_when_any_p50_is_missing() {
    let brands = vec![
        brand(
            "Alpha",
            json!({ "positioning": { "price_segment": "lujo", "price_zone": { "p50": 400.0 } } }),
        ),
        brand(
            "Beta",
            json!({ "positioning": { "price_segment": "entry", "price_zone": { "currency": "EUR" } } }),
        ),
    ];
    let refs: Vec<&BrandRecord> = brands.iter().collect();
    let plot = ScatterPlot::build(&refs);
    assert_eq!(plot.x_axis, ScatterXAxis::PriceSegment);
    assert_eq!(plot.points[0].x, 5.0);
    assert_eq!(plot.points[1].x, 1.0);
}

#[test]
fn sparse_collection_aggregates_without_panicking() {
    let brands = vec![
        brand("Empty", json!({})),
        brand("Half", json!({ "style": { "confidence": 0.3 } })),
    ];
    let refs: Vec<&BrandRecord> = brands.iter().collect();
    let report = InsightReport::build(&refs);
    assert_eq!(report.total, 2);
    let series = radar_series(&refs);
    assert!(series
        .iter()
        .all(|s| s.values.iter().all(|v| (0.0..=1.0).contains(v))));
}

#[test]
fn charts_and_insights_read_a_filtered_view_in_place() {
    let brands = vec![
        brand(
            "Alpha",
            json!({ "positioning": { "price_segment": "lujo", "price_zone": { "p50": 400.0 } } }),
        ),
        brand("Beta", json!({ "positioning": { "price_segment": "entry" } })),
        brand(
            "Gamma",
            json!({ "positioning": { "price_segment": "lujo", "price_zone": { "p50": 250.0 } } }),
        ),
    ];
    let catalog = FacetCatalog::default();
    let view = apply(
        &brands,
        &catalog,
        &QueryState::new().with_selection("price_segment", ["lujo"]),
    );

    let plot = ScatterPlot::build(&view);
    assert_eq!(plot.x_axis, ScatterXAxis::PriceP50);
    assert_eq!((plot.x_min, plot.x_max), (250.0, 400.0));

    let report = InsightReport::build(&view);
    assert_eq!(report.total, 2);
    assert_eq!(report.distributions[0].values[0].count, 2);
}
