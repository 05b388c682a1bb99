//! Brand DNA analytics core
//!
//! Pure derivations over an immutable collection of brand profiles:
//!
//! ```text
//!   BrandRecord[] ──► confidence ──► filter (search / quality / facets)
//!        │                │
//!        ├──► similarity ─┴──► top-N ranking
//!        ├──► detail (per-block fields, evidence, tooltips)
//!        ├──► insight (frequency, cross-tab, block completeness)
//!        └──► viz (radar tuples, landscape scatter)
//! ```
//!
//! Nothing in this crate performs IO. Loading lives in `branddna-ingest`;
//! rendering is left to the caller. The only mutable state is the thin
//! [`session::Session`] owner, which holds the current query and compare-set.

pub mod compare;
pub mod confidence;
pub mod detail;
pub mod filter;
pub mod insight;
pub mod levels;
pub mod record;
pub mod session;
pub mod similarity;
pub mod taxonomy;
pub mod value;
pub mod viz;

pub use confidence::{overall_confidence, quality_label, QualityTier};
pub use detail::{block_fields, brand_detail, BlockDetail, DetailField, DetailValue};
pub use filter::{FacetCatalog, FacetCounts, FacetDef, QueryState};
pub use record::{Block, BlockMeta, BrandRecord, Dna, Evidence, Identity, RecordError};
pub use similarity::{similarity, top_similar, SimilarBrand, SimilarityWeights};
pub use value::AttrValue;

/// Resolve a dotted path (`dna.positioning.price_segment`) against a record.
///
/// Shorthand for [`BrandRecord::resolve`].
pub fn resolve<'a>(record: &'a BrandRecord, path: &str) -> Option<&'a AttrValue> {
    record.resolve(path)
}
