//! Similarity ranking and side-by-side comparison.

use anyhow::{anyhow, Result};
use serde::Serialize;

use branddna_core::compare::{compare_rows, CompareRow};
use branddna_core::session::{CompareSet, CompareToggle, COMPARE_CAPACITY};
use branddna_core::similarity::similarity_breakdown;
use branddna_core::{top_similar, BrandRecord};

use crate::render::{emit, fixed, table};
use crate::{find_brand, load_brands, OutputArgs};

#[derive(Debug, Serialize)]
pub struct RankedBrand {
    pub name: String,
    pub score: f64,
    pub style_overlap: f64,
    pub category_overlap: f64,
}

#[derive(Debug, Serialize)]
pub struct SimilarView {
    pub query: String,
    pub results: Vec<RankedBrand>,
}

pub fn cmd_similar(output: &OutputArgs, name: &str, top: usize) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let brand = find_brand(&brands, name)?;

    let results = top_similar(brand, &brands, top)
        .into_iter()
        .map(|s| {
            let parts = similarity_breakdown(brand, s.brand);
            RankedBrand {
                name: s.brand.name().to_string(),
                score: s.score,
                style_overlap: parts.style,
                category_overlap: parts.identity,
            }
        })
        .collect();
    let view = SimilarView {
        query: brand.name().to_string(),
        results,
    };

    emit(&output.format, output.out.as_ref(), &view, |v| {
        let rows: Vec<Vec<String>> = v
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                vec![
                    format!("{}", i + 1),
                    r.name.clone(),
                    fixed(r.score),
                    fixed(r.style_overlap),
                    fixed(r.category_overlap),
                ]
            })
            .collect();
        format!(
            "Brands similar to {}\n\n{}",
            v.query,
            table(&["#", "Brand", "Score", "Style overlap", "Category overlap"], &rows)
        )
    })
}

/// Resolve names into a compare-set, rejecting unknowns and repeats.
pub fn build_compare_set(brands: &[BrandRecord], names: &[String]) -> Result<CompareSet> {
    let mut set = CompareSet::new();
    for name in names {
        let brand = find_brand(brands, name)?;
        match set.toggle(brand.name()) {
            CompareToggle::Added => {}
            CompareToggle::Removed => {
                return Err(anyhow!("brand `{}` listed more than once", brand.name()));
            }
            CompareToggle::Full => {
                return Err(anyhow!("at most {COMPARE_CAPACITY} brands can be compared"));
            }
        }
    }
    Ok(set)
}

#[derive(Debug, Serialize)]
pub struct CompareView {
    pub brands: Vec<String>,
    pub rows: Vec<CompareRow>,
}

pub fn cmd_compare(output: &OutputArgs, names: &[String]) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let set = build_compare_set(&brands, names)?;
    if !set.is_comparable() {
        return Err(anyhow!("compare needs at least two brands"));
    }
    let selected = set.selected(&brands);
    let view = CompareView {
        brands: selected.iter().map(|b| b.name().to_string()).collect(),
        rows: compare_rows(&selected),
    };

    emit(&output.format, output.out.as_ref(), &view, |v| {
        let mut header: Vec<&str> = vec!["Attribute"];
        header.extend(v.brands.iter().map(String::as_str));
        let rows: Vec<Vec<String>> = v
            .rows
            .iter()
            .map(|row| {
                let marker = if row.all_same { " =" } else { "" };
                let mut cells = vec![format!("{}{marker}", row.label)];
                cells.extend(row.values.iter().cloned());
                cells
            })
            .collect();
        table(&header, &rows)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> BrandRecord {
        BrandRecord::from_json(json!({ "identity": { "name": name } })).unwrap()
    }

    #[test]
    fn compare_set_rejects_repeats_and_unknowns() {
        let brands = vec![named("Alpha"), named("Beta")];
        let set = build_compare_set(&brands, &["beta".into(), "Alpha".into()]).unwrap();
        assert_eq!(set.names(), ["Beta", "Alpha"]);

        assert!(build_compare_set(&brands, &["Alpha".into(), "ALPHA".into()]).is_err());
        assert!(build_compare_set(&brands, &["Gamma".into()]).is_err());
    }
}
