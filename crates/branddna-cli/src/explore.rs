//! Browsing: filtered list, facet counts and the brand detail view.

use anyhow::{anyhow, Result};
use serde::Serialize;

use branddna_core::compare::{compare_rows, CompareRow};
use branddna_core::detail::{block_fields, BlockDetail};
use branddna_core::filter::facet_counts;
use branddna_core::record::Block;
use branddna_core::session::Session;
use branddna_core::similarity::DEFAULT_TOP_N;
use branddna_core::taxonomy::display_label;
use branddna_core::{overall_confidence, quality_label, top_similar, FacetCatalog, FacetCounts};

use crate::render::{emit, fixed, table};
use crate::{find_brand, load_brands, OutputArgs, QueryArgs};

#[derive(Debug, Serialize)]
pub struct BrandRow {
    pub name: String,
    pub country: Option<String>,
    pub style_primary: Option<String>,
    pub price_segment: Option<String>,
    pub overall_confidence: f64,
    pub quality: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub total: usize,
    pub shown: usize,
    pub brands: Vec<BrandRow>,
}

pub fn cmd_list(output: &OutputArgs, query: &QueryArgs) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let mut session = Session::new(FacetCatalog::default());
    session.set_query(query.to_query(&session.catalog)?);

    let rows: Vec<BrandRow> = session
        .view(&brands)
        .into_iter()
        .map(|b| {
            let score = overall_confidence(b);
            BrandRow {
                name: b.name().to_string(),
                country: b.identity.country.clone(),
                style_primary: b.dna.style_primary().map(str::to_string),
                price_segment: b.dna.price_segment().map(str::to_string),
                overall_confidence: score,
                quality: quality_label(score),
            }
        })
        .collect();
    let view = ListView {
        total: brands.len(),
        shown: rows.len(),
        brands: rows,
    };

    emit(&output.format, output.out.as_ref(), &view, render_list_text)
}

fn label_or_dash(code: Option<&str>) -> String {
    code.map(display_label).unwrap_or_else(|| "-".to_string())
}

fn render_list_text(view: &ListView) -> String {
    let rows: Vec<Vec<String>> = view
        .brands
        .iter()
        .map(|b| {
            vec![
                b.name.clone(),
                b.country.clone().unwrap_or_else(|| "-".to_string()),
                label_or_dash(b.style_primary.as_deref()),
                label_or_dash(b.price_segment.as_deref()),
                fixed(b.overall_confidence),
                b.quality.to_string(),
            ]
        })
        .collect();
    format!(
        "{} of {} brands\n\n{}",
        view.shown,
        view.total,
        table(
            &["Brand", "Country", "Style", "Price", "Confidence", "Quality"],
            &rows
        )
    )
}

pub fn cmd_facets(output: &OutputArgs) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let counts = facet_counts(&brands, &FacetCatalog::default());
    emit(&output.format, output.out.as_ref(), &counts, |c| render_facets_text(c))
}

fn render_facets_text(counts: &[FacetCounts]) -> String {
    let mut out = String::new();
    for facet in counts.iter().filter(|f| !f.is_empty()) {
        out.push_str(&format!("{} ({})\n", facet.label, facet.key));
        for value in &facet.values {
            out.push_str(&format!(
                "  {:<28} {:>4}\n",
                display_label(&value.value),
                value.count
            ));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[derive(Debug, Serialize)]
pub struct BlockConfidence {
    pub block: Block,
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SimilarEntry {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct DetailView {
    pub name: String,
    pub country: Option<String>,
    pub overall_confidence: f64,
    pub quality: &'static str,
    pub attributes: Vec<CompareRow>,
    pub blocks: Vec<BlockConfidence>,
    pub details: Vec<BlockDetail>,
    pub similar: Vec<SimilarEntry>,
}

fn parse_block(s: &str) -> Result<Block> {
    Block::parse(s).ok_or_else(|| {
        let keys: Vec<&str> = Block::ALL.iter().map(|b| b.key()).collect();
        anyhow!("unknown --block `{s}` (expected {})", keys.join("|"))
    })
}

pub fn cmd_show(output: &OutputArgs, name: &str, block: Option<&str>) -> Result<()> {
    let blocks: Vec<Block> = match block {
        Some(s) => vec![parse_block(s)?],
        None => Block::ALL.to_vec(),
    };
    let brands = load_brands(&output.data)?;
    let mut session = Session::new(FacetCatalog::default());
    let found = find_brand(&brands, name)?.name().to_string();
    session.select(&brands, &found);
    let Some(brand) = session.selected(&brands) else {
        return Err(anyhow!("unknown brand `{name}`"));
    };

    let score = overall_confidence(brand);
    let view = DetailView {
        name: brand.name().to_string(),
        country: brand.identity.country.clone(),
        overall_confidence: score,
        quality: quality_label(score),
        attributes: compare_rows(&[brand]),
        blocks: blocks
            .iter()
            .map(|&block| BlockConfidence {
                block,
                confidence: brand.dna.confidence(block),
            })
            .collect(),
        details: blocks
            .iter()
            .filter_map(|&block| block_fields(brand, block))
            .collect(),
        similar: top_similar(brand, &brands, DEFAULT_TOP_N)
            .into_iter()
            .map(|s| SimilarEntry {
                name: s.brand.name().to_string(),
                score: s.score,
            })
            .collect(),
    };

    emit(&output.format, output.out.as_ref(), &view, render_detail_text)
}

fn render_detail_text(view: &DetailView) -> String {
    let mut out = String::new();
    out.push_str(&view.name);
    if let Some(country) = &view.country {
        out.push_str(&format!(" ({country})"));
    }
    out.push_str(&format!(
        "\nOverall confidence: {} [{}]\n\n",
        fixed(view.overall_confidence),
        view.quality
    ));

    let attributes: Vec<Vec<String>> = view
        .attributes
        .iter()
        .map(|row| vec![row.label.clone(), row.values.join(", ")])
        .collect();
    out.push_str(&table(&["Attribute", "Value"], &attributes));

    let blocks: Vec<Vec<String>> = view
        .blocks
        .iter()
        .map(|b| {
            vec![
                display_label(b.block.key()),
                b.confidence.map(fixed).unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    out.push_str("\n\n");
    out.push_str(&table(&["Block", "Confidence"], &blocks));

    for detail in &view.details {
        out.push_str("\n\n");
        out.push_str(&render_block_text(detail));
    }

    if !view.similar.is_empty() {
        let similar: Vec<Vec<String>> = view
            .similar
            .iter()
            .map(|s| vec![s.name.clone(), fixed(s.score)])
            .collect();
        out.push_str("\n\n");
        out.push_str(&table(&["Similar brand", "Score"], &similar));
    }
    out
}

fn render_block_text(detail: &BlockDetail) -> String {
    let mut out = display_label(detail.block.key());
    if let (Some(confidence), Some(quality)) = (detail.confidence, detail.quality) {
        out.push_str(&format!("  {} [{quality}]", fixed(confidence)));
    }
    out.push('\n');
    if detail.fields.is_empty() {
        out.push_str("  (no attributes)\n");
    }

    let width = detail
        .fields
        .iter()
        .map(|f| f.title.chars().count())
        .max()
        .unwrap_or(0);
    let mut notes: Vec<(&str, &str)> = Vec::new();
    for field in &detail.fields {
        let values: Vec<&str> = field.values.iter().map(|v| v.label.as_str()).collect();
        out.push_str(&format!("  {:<width$}  {}\n", field.title, values.join(", ")));
        for value in &field.values {
            if let Some(tip) = value.tooltip {
                if !notes.iter().any(|(label, _)| *label == value.label) {
                    notes.push((value.label.as_str(), tip));
                }
            }
        }
    }
    for (label, tip) in notes {
        out.push_str(&format!("  * {label}: {tip}\n"));
    }

    if !detail.evidence.is_empty() {
        out.push_str(&format!("  Evidence ({})\n", detail.evidence.len()));
        for item in &detail.evidence {
            out.push_str(&format!("    - {}", item.source_type));
            if let Some(note) = &item.note {
                out.push_str(&format!(": {note}"));
            }
            out.push('\n');
            if let Some(reference) = &item.reference {
                out.push_str(&format!("      {reference}\n"));
            }
        }
    }
    out.trim_end().to_string()
}
