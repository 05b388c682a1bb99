//! Brand records: identity plus typed DNA blocks.
//!
//! Each record is held twice: as typed blocks (compile-time coverage for the
//! similarity and chart code) and as an [`AttrValue`] tree (dotted-path
//! access for facets and ad-hoc insight queries). Both views are built from
//! the same JSON document and never diverge, since records are immutable.

use serde::{Deserialize, Serialize};

use crate::value::AttrValue;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("brand document is not a JSON object")]
    NotAnObject,
    #[error("malformed brand document: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("brand document has no name")]
    MissingName,
    #[error("confidence {value} in block `{block}` is outside [0, 1]")]
    ConfidenceOutOfRange { block: &'static str, value: f64 },
}

// ============================================================================
// Blocks
// ============================================================================

/// The fixed set of DNA blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Essence,
    Audience,
    Product,
    Style,
    Positioning,
    Operations,
    TrendBehavior,
    SeasonIntent,
}

impl Block {
    /// Blocks that count toward a brand's overall confidence.
    pub const PRIMARY: [Block; 7] = [
        Block::Essence,
        Block::Audience,
        Block::Product,
        Block::Style,
        Block::Positioning,
        Block::Operations,
        Block::TrendBehavior,
    ];

    pub const ALL: [Block; 8] = [
        Block::Essence,
        Block::Audience,
        Block::Product,
        Block::Style,
        Block::Positioning,
        Block::Operations,
        Block::TrendBehavior,
        Block::SeasonIntent,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Block::Essence => "essence",
            Block::Audience => "audience",
            Block::Product => "product",
            Block::Style => "style",
            Block::Positioning => "positioning",
            Block::Operations => "operations",
            Block::TrendBehavior => "trend_behavior",
            Block::SeasonIntent => "season_intent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Block::ALL.into_iter().find(|b| b.key() == s)
    }
}

/// A citation backing a block's attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Fields every block may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionalContract {
    pub must_generate: Vec<String>,
    pub must_avoid: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Essence {
    pub archetype_primary: Option<String>,
    pub archetype_secondary: Option<String>,
    pub creative_risk_level: Option<String>,
    pub novelty_tolerance: Option<f64>,
    pub emotional_contract: Option<EmotionalContract>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audience {
    pub gender_focus: Option<String>,
    pub age_focus: Option<String>,
    pub customer_motivation: Vec<String>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub macro_category_primary: Option<String>,
    pub macro_category_secondary: Vec<String>,
    pub identity_categories: Vec<String>,
    pub tactical_categories: Vec<String>,
    pub occasion_focus: Vec<String>,
    pub seasonality: Option<String>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub style_primary: Option<String>,
    pub style_secondary: Vec<String>,
    pub fit_preference: Option<String>,
    pub silhouette_signatures: Vec<String>,
    pub color_palette_stable: Vec<String>,
    pub color_palette_experimental: Vec<String>,
    pub print_intensity: Option<String>,
    pub branding_visibility: Option<String>,
    pub material_focus: Vec<String>,
    pub complexity_level: Option<String>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

/// Observed price percentiles in the brand's currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceZone {
    pub currency: Option<String>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Positioning {
    pub price_segment: Option<String>,
    pub value_driver: Vec<String>,
    pub decision_type: Option<String>,
    pub elasticity: Option<String>,
    pub promo_dependency: Option<String>,
    pub competitive_posture: Option<String>,
    pub price_zone: Option<PriceZone>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operations {
    pub business_model: Option<String>,
    pub channels: Vec<String>,
    pub geography: Option<String>,
    pub manufacturing: Option<String>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

/// Share of the collection devoted to core, evolution and exploration lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnovationMix {
    pub core: Option<f64>,
    pub evolution: Option<f64>,
    pub exploration: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendBehavior {
    pub trend_adoption_type: Option<String>,
    pub innovation_mix_hint: Option<InnovationMix>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonIntent {
    pub season_primary_goal: Option<String>,
    pub experimentation_quota: Option<f64>,
    #[serde(flatten)]
    pub meta: BlockMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dna {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essence: Option<Essence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioning: Option<Positioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Operations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_behavior: Option<TrendBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_intent: Option<SeasonIntent>,
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Dna {
    pub fn meta(&self, block: Block) -> Option<&BlockMeta> {
        match block {
            Block::Essence => self.essence.as_ref().map(|b| &b.meta),
            Block::Audience => self.audience.as_ref().map(|b| &b.meta),
            Block::Product => self.product.as_ref().map(|b| &b.meta),
            Block::Style => self.style.as_ref().map(|b| &b.meta),
            Block::Positioning => self.positioning.as_ref().map(|b| &b.meta),
            Block::Operations => self.operations.as_ref().map(|b| &b.meta),
            Block::TrendBehavior => self.trend_behavior.as_ref().map(|b| &b.meta),
            Block::SeasonIntent => self.season_intent.as_ref().map(|b| &b.meta),
        }
    }

    pub fn confidence(&self, block: Block) -> Option<f64> {
        self.meta(block).and_then(|m| m.confidence)
    }

    pub fn style_primary(&self) -> Option<&str> {
        self.style.as_ref().and_then(|s| text(&s.style_primary))
    }

    pub fn style_secondary(&self) -> &[String] {
        self.style
            .as_ref()
            .map(|s| s.style_secondary.as_slice())
            .unwrap_or_default()
    }

    pub fn price_segment(&self) -> Option<&str> {
        self.positioning.as_ref().and_then(|p| text(&p.price_segment))
    }

    pub fn promo_dependency(&self) -> Option<&str> {
        self.positioning
            .as_ref()
            .and_then(|p| text(&p.promo_dependency))
    }

    pub fn price_p50(&self) -> Option<f64> {
        self.positioning
            .as_ref()
            .and_then(|p| p.price_zone.as_ref())
            .and_then(|z| z.p50)
            .filter(|v| v.is_finite())
    }

    pub fn gender_focus(&self) -> Option<&str> {
        self.audience.as_ref().and_then(|a| text(&a.gender_focus))
    }

    pub fn identity_categories(&self) -> &[String] {
        self.product
            .as_ref()
            .map(|p| p.identity_categories.as_slice())
            .unwrap_or_default()
    }

    pub fn trend_adoption_type(&self) -> Option<&str> {
        self.trend_behavior
            .as_ref()
            .and_then(|t| text(&t.trend_adoption_type))
    }

    pub fn business_model(&self) -> Option<&str> {
        self.operations.as_ref().and_then(|o| text(&o.business_model))
    }

    pub fn channels(&self) -> &[String] {
        self.operations
            .as_ref()
            .map(|o| o.channels.as_slice())
            .unwrap_or_default()
    }

    pub fn creative_risk_level(&self) -> Option<&str> {
        self.essence
            .as_ref()
            .and_then(|e| text(&e.creative_risk_level))
    }

    pub fn novelty_tolerance(&self) -> Option<f64> {
        self.essence
            .as_ref()
            .and_then(|e| e.novelty_tolerance)
            .filter(|v| v.is_finite())
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Deserialize)]
struct RawRecord {
    identity: Identity,
    #[serde(default)]
    dna: Dna,
}

/// One brand profile. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct BrandRecord {
    pub identity: Identity,
    pub dna: Dna,
    #[serde(skip)]
    document: AttrValue,
}

impl PartialEq for BrandRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity && self.dna == other.dna
    }
}

impl BrandRecord {
    /// Build a record from one brand document.
    ///
    /// The identity object may be spelled `identity` or `brand`; in the value
    /// tree it is always reachable under `identity`. JSON nulls read as absent.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        let serde_json::Value::Object(mut obj) = strip_nulls(value) else {
            return Err(RecordError::NotAnObject);
        };
        if !obj.contains_key("identity") {
            if let Some(brand) = obj.remove("brand") {
                obj.insert("identity".to_string(), brand);
            }
        }
        let value = serde_json::Value::Object(obj);

        let raw: RawRecord = serde_json::from_value(value.clone())?;
        let record = BrandRecord {
            identity: raw.identity,
            dna: raw.dna,
            document: AttrValue::from(&value),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecordError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_json(value)
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.identity.name.trim().is_empty() {
            return Err(RecordError::MissingName);
        }
        for block in Block::ALL {
            if let Some(value) = self.dna.confidence(block) {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(RecordError::ConfidenceOutOfRange {
                        block: block.key(),
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn document(&self) -> &AttrValue {
        &self.document
    }

    /// Resolve a dotted path from the document root, e.g. `dna.style.style_primary`.
    pub fn resolve(&self, path: &str) -> Option<&AttrValue> {
        self.document.resolve(path)
    }
}

fn strip_nulls(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}
