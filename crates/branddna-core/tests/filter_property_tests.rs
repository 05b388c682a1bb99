//! Property tests for the filter pipeline and facet counts.

mod common;

use branddna_core::filter::{apply, apply_stages, facet_counts, FilterStage};
use branddna_core::{overall_confidence, BrandRecord, FacetCatalog, QueryState};
use common::collection;
use proptest::prelude::*;

fn query() -> impl Strategy<Value = QueryState> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z ]{1,3}", Just("BRAND 1".to_string())],
        any::<bool>(),
        proptest::option::of(proptest::sample::subsequence(
            vec!["premium", "masivo", "lujo", "desconocido"],
            0..3,
        )),
        proptest::option::of(proptest::sample::subsequence(
            vec!["ecommerce", "marketplace", "multimarca"],
            0..3,
        )),
    )
        .prop_map(|(search, hide, prices, channels)| {
            let mut q = QueryState::new().with_search(search).with_hide_unknown(hide);
            if let Some(prices) = prices {
                q = q.with_selection("price_segment", prices);
            }
            if let Some(channels) = channels {
                q = q.with_selection("channels", channels);
            }
            q
        })
}

fn names(records: Vec<&BrandRecord>) -> Vec<String> {
    records.into_iter().map(|r| r.name().to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn stage_order_does_not_change_the_result(brands in collection(10), q in query()) {
        let catalog = FacetCatalog::default();
        let expected = names(apply(&brands, &catalog, &q));
        let orders = [
            [FilterStage::Facets, FilterStage::Quality, FilterStage::Search],
            [FilterStage::Quality, FilterStage::Search, FilterStage::Facets],
            [FilterStage::Facets, FilterStage::Search, FilterStage::Quality],
        ];
        for order in orders {
            prop_assert_eq!(&names(apply_stages(&brands, &catalog, &q, &order)), &expected);
        }
    }

    #[test]
    fn filtered_is_an_ordered_subset(brands in collection(10), q in query()) {
        let filtered = apply(&brands, &FacetCatalog::default(), &q);
        prop_assert!(filtered.len() <= brands.len());
        let positions: Vec<usize> = filtered
            .iter()
            .map(|f| brands.iter().position(|b| b.name() == f.name()).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        if q.hide_unknown {
            prop_assert!(filtered.iter().all(|b| overall_confidence(b) >= 0.5));
        }
    }

    #[test]
    fn facet_counts_ignore_the_query(brands in collection(10), q in query()) {
        let catalog = FacetCatalog::default();
        let before = facet_counts(&brands, &catalog);
        let _ = apply(&brands, &catalog, &q);
        prop_assert_eq!(facet_counts(&brands, &catalog), before);
    }

    #[test]
    fn scalar_facet_counts_never_exceed_collection(brands in collection(10)) {
        for facet in facet_counts(&brands, &FacetCatalog::default()) {
            if facet.key == "price_segment" {
                let total: usize = facet.values.iter().map(|v| v.count).sum();
                prop_assert!(total <= brands.len());
            }
            prop_assert!(facet.values.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
