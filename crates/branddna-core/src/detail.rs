//! Per-block brand detail.
//!
//! Flattens one DNA block into titled fields ready for display. Category codes
//! carry their display label and tooltip; numbers are pre-formatted. Missing
//! or empty attributes produce no field, so a sparse block stays short.

use serde::Serialize;

use crate::confidence::quality_label;
use crate::record::{Block, BlockMeta, BrandRecord, Dna, Evidence};
use crate::taxonomy::{display_label, tooltip};

/// One displayed value: a category chip or a formatted number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailValue {
    pub code: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    /// Attribute path relative to the block (`price_zone.p50`).
    pub key: &'static str,
    pub title: &'static str,
    pub values: Vec<DetailValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDetail {
    pub block: Block,
    pub fields: Vec<DetailField>,
    pub confidence: Option<f64>,
    /// Quality label for `confidence`, absent when the block states none.
    pub quality: Option<&'static str>,
    pub evidence: Vec<Evidence>,
}

impl BlockDetail {
    pub fn field(&self, key: &str) -> Option<&DetailField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[derive(Default)]
struct Fields(Vec<DetailField>);

impl Fields {
    fn push(&mut self, key: &'static str, title: &'static str, values: Vec<DetailValue>) {
        if !values.is_empty() {
            self.0.push(DetailField { key, title, values });
        }
    }

    fn code(&mut self, key: &'static str, title: &'static str, value: &Option<String>) {
        let values = value.iter().filter(|s| !s.is_empty()).map(|s| chip(s)).collect();
        self.push(key, title, values);
    }

    fn codes(&mut self, key: &'static str, title: &'static str, values: &[String]) {
        let values = values.iter().filter(|s| !s.is_empty()).map(|s| chip(s)).collect();
        self.push(key, title, values);
    }

    /// Free text such as a currency code: shown verbatim.
    fn plain(&mut self, key: &'static str, title: &'static str, value: &Option<String>) {
        let values = value
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| DetailValue {
                code: s.clone(),
                label: s.clone(),
                tooltip: None,
            })
            .collect();
        self.push(key, title, values);
    }

    fn number(&mut self, key: &'static str, title: &'static str, value: Option<f64>) {
        let values = finite(value).map(|n| numeric(n.to_string())).into_iter().collect();
        self.push(key, title, values);
    }

    fn percent(&mut self, key: &'static str, title: &'static str, value: Option<f64>) {
        let values = finite(value)
            .map(|n| numeric(format!("{}%", (n * 100.0).round())))
            .into_iter()
            .collect();
        self.push(key, title, values);
    }
}

fn chip(code: &str) -> DetailValue {
    DetailValue {
        code: code.to_string(),
        label: display_label(code),
        tooltip: tooltip(code),
    }
}

fn numeric(text: String) -> DetailValue {
    DetailValue {
        code: text.clone(),
        label: text,
        tooltip: None,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn block_fields_of(dna: &Dna, block: Block) -> Option<Vec<DetailField>> {
    let mut f = Fields::default();
    match block {
        Block::Essence => {
            let e = dna.essence.as_ref()?;
            f.code("archetype_primary", "Primary archetype", &e.archetype_primary);
            f.code("archetype_secondary", "Secondary archetype", &e.archetype_secondary);
            f.code("creative_risk_level", "Creative risk", &e.creative_risk_level);
            f.number("novelty_tolerance", "Novelty tolerance", e.novelty_tolerance);
            if let Some(contract) = &e.emotional_contract {
                f.codes(
                    "emotional_contract.must_generate",
                    "Must generate",
                    &contract.must_generate,
                );
                f.codes("emotional_contract.must_avoid", "Must avoid", &contract.must_avoid);
            }
        }
        Block::Audience => {
            let a = dna.audience.as_ref()?;
            f.code("gender_focus", "Gender", &a.gender_focus);
            f.code("age_focus", "Age focus", &a.age_focus);
            f.codes("customer_motivation", "Customer motivation", &a.customer_motivation);
        }
        Block::Product => {
            let p = dna.product.as_ref()?;
            f.code("macro_category_primary", "Primary macro category", &p.macro_category_primary);
            f.codes(
                "macro_category_secondary",
                "Secondary macro categories",
                &p.macro_category_secondary,
            );
            f.codes("identity_categories", "Identity categories", &p.identity_categories);
            f.codes("tactical_categories", "Tactical categories", &p.tactical_categories);
            f.codes("occasion_focus", "Occasion focus", &p.occasion_focus);
            f.code("seasonality", "Seasonality", &p.seasonality);
        }
        Block::Style => {
            let s = dna.style.as_ref()?;
            f.code("style_primary", "Primary style", &s.style_primary);
            f.codes("style_secondary", "Secondary style", &s.style_secondary);
            f.code("fit_preference", "Preferred fit", &s.fit_preference);
            f.codes("silhouette_signatures", "Signature silhouettes", &s.silhouette_signatures);
            f.codes("color_palette_stable", "Stable palette", &s.color_palette_stable);
            f.codes(
                "color_palette_experimental",
                "Experimental palette",
                &s.color_palette_experimental,
            );
            f.code("print_intensity", "Print intensity", &s.print_intensity);
            f.code("branding_visibility", "Branding visibility", &s.branding_visibility);
            f.codes("material_focus", "Materials", &s.material_focus);
            f.code("complexity_level", "Complexity", &s.complexity_level);
        }
        Block::Positioning => {
            let p = dna.positioning.as_ref()?;
            f.code("price_segment", "Price segment", &p.price_segment);
            f.codes("value_driver", "Value drivers", &p.value_driver);
            f.code("decision_type", "Decision type", &p.decision_type);
            f.code("elasticity", "Elasticity", &p.elasticity);
            f.code("promo_dependency", "Promo dependency", &p.promo_dependency);
            f.code("competitive_posture", "Competitive posture", &p.competitive_posture);
            if let Some(zone) = &p.price_zone {
                f.plain("price_zone.currency", "Currency", &zone.currency);
                f.number("price_zone.p25", "Price p25", zone.p25);
                f.number("price_zone.p50", "Price p50", zone.p50);
                f.number("price_zone.p75", "Price p75", zone.p75);
            }
        }
        Block::Operations => {
            let o = dna.operations.as_ref()?;
            f.code("business_model", "Business model", &o.business_model);
            f.codes("channels", "Channels", &o.channels);
            f.code("geography", "Geography", &o.geography);
            f.code("manufacturing", "Manufacturing", &o.manufacturing);
        }
        Block::TrendBehavior => {
            let t = dna.trend_behavior.as_ref()?;
            f.code("trend_adoption_type", "Trend adoption", &t.trend_adoption_type);
            if let Some(mix) = &t.innovation_mix_hint {
                f.percent("innovation_mix_hint.core", "Innovation mix: core", mix.core);
                f.percent(
                    "innovation_mix_hint.evolution",
                    "Innovation mix: evolution",
                    mix.evolution,
                );
                f.percent(
                    "innovation_mix_hint.exploration",
                    "Innovation mix: exploration",
                    mix.exploration,
                );
            }
        }
        Block::SeasonIntent => {
            let s = dna.season_intent.as_ref()?;
            f.code("season_primary_goal", "Primary goal", &s.season_primary_goal);
            f.number(
                "experimentation_quota",
                "Experimentation quota",
                s.experimentation_quota,
            );
        }
    }
    Some(f.0)
}

/// Detail of one block, or `None` when the record lacks it.
pub fn block_fields(record: &BrandRecord, block: Block) -> Option<BlockDetail> {
    let fields = block_fields_of(&record.dna, block)?;
    let meta: BlockMeta = record.dna.meta(block).cloned().unwrap_or_default();
    let confidence = finite(meta.confidence);
    Some(BlockDetail {
        block,
        fields,
        confidence,
        quality: confidence.map(quality_label),
        evidence: meta.evidence,
    })
}

/// Detail of every block the record carries, in [`Block::ALL`] order.
pub fn brand_detail(record: &BrandRecord) -> Vec<BlockDetail> {
    Block::ALL
        .iter()
        .filter_map(|&block| block_fields(record, block))
        .collect()
}
