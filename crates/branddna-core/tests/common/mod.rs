//! Shared strategies for the property tests.

#![allow(dead_code)]

use branddna_core::BrandRecord;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

pub fn code(options: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::sample::select(options).prop_map(str::to_string))
}

pub fn codes(options: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(proptest::sample::select(options).prop_map(str::to_string), 0..4)
}

pub fn confidence() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0f64..=1.0f64)
}

const STYLES: &[&str] = &["minimalista", "boho", "streetwear", "clasico", "y2k"];
const PRICES: &[&str] = &["entry", "masivo", "medio", "premium", "lujo", "ultra_lujo", "desconocido"];
const GENDERS: &[&str] = &["mujer", "hombre", "unisex"];
const CATEGORIES: &[&str] = &["denim", "punto", "sastreria", "vestidos", "calzado"];
const TRENDS: &[&str] = &["early_adopter", "mid_adopter", "selective_adopter", "anti_trend"];
const MODELS: &[&str] = &["dtc", "wholesale", "marketplace_first"];
const CHANNELS: &[&str] = &["ecommerce", "retail_propio", "multimarca", "marketplace"];
const PROMOS: &[&str] = &["nula", "baja", "media", "alta", "desconocida"];

fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

/// Sparse brand documents: any attribute or block confidence may be absent.
pub fn brand_doc() -> impl Strategy<Value = Value> {
    (
        (code(STYLES), codes(STYLES), code(PRICES), code(GENDERS)),
        (codes(CATEGORIES), code(TRENDS), code(MODELS), codes(CHANNELS)),
        (code(PROMOS), proptest::option::of(0.0f64..=1.0), proptest::option::of(10.0f64..500.0)),
        proptest::collection::vec(confidence(), 7),
    )
        .prop_map(
            |(
                (style, secondary, price, gender),
                (categories, trend, model, channels),
                (promo, novelty, p50),
                confidences,
            )| {
                let blocks = [
                    "essence",
                    "audience",
                    "product",
                    "style",
                    "positioning",
                    "operations",
                    "trend_behavior",
                ];
                let mut dna = Map::new();
                for (block, conf) in blocks.iter().zip(confidences) {
                    let mut b = Map::new();
                    put(&mut b, "confidence", conf.map(Value::from));
                    dna.insert(block.to_string(), Value::Object(b));
                }
                let block = |dna: &mut Map<String, Value>, name: &str| -> Map<String, Value> {
                    match dna.remove(name) {
                        Some(Value::Object(m)) => m,
                        _ => Map::new(),
                    }
                };

                let mut s = block(&mut dna, "style");
                put(&mut s, "style_primary", style.map(Value::from));
                s.insert("style_secondary".into(), json!(secondary));
                dna.insert("style".into(), Value::Object(s));

                let mut p = block(&mut dna, "positioning");
                put(&mut p, "price_segment", price.map(Value::from));
                put(&mut p, "promo_dependency", promo.map(Value::from));
                put(&mut p, "price_zone", p50.map(|v| json!({ "p50": v })));
                dna.insert("positioning".into(), Value::Object(p));

                let mut a = block(&mut dna, "audience");
                put(&mut a, "gender_focus", gender.map(Value::from));
                dna.insert("audience".into(), Value::Object(a));

                let mut pr = block(&mut dna, "product");
                pr.insert("identity_categories".into(), json!(categories));
                dna.insert("product".into(), Value::Object(pr));

                let mut t = block(&mut dna, "trend_behavior");
                put(&mut t, "trend_adoption_type", trend.map(Value::from));
                dna.insert("trend_behavior".into(), Value::Object(t));

                let mut o = block(&mut dna, "operations");
                put(&mut o, "business_model", model.map(Value::from));
                o.insert("channels".into(), json!(channels));
                dna.insert("operations".into(), Value::Object(o));

                let mut e = block(&mut dna, "essence");
                put(&mut e, "novelty_tolerance", novelty.map(Value::from));
                dna.insert("essence".into(), Value::Object(e));

                json!({ "identity": { "name": "placeholder" }, "dna": Value::Object(dna) })
            },
        )
}

pub fn named(mut doc: Value, name: &str) -> BrandRecord {
    doc["identity"]["name"] = json!(name);
    BrandRecord::from_json(doc).expect("generated document is valid")
}

pub fn brand() -> impl Strategy<Value = BrandRecord> {
    brand_doc().prop_map(|doc| named(doc, "Generated"))
}

pub fn collection(max: usize) -> impl Strategy<Value = Vec<BrandRecord>> {
    proptest::collection::vec(brand_doc(), 0..max).prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, doc)| named(doc, &format!("Brand {i}")))
            .collect()
    })
}
