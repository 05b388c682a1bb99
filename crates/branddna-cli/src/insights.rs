//! Collection insights: distributions, block completeness and the
//! promo/price cross-tab.

use anyhow::Result;

use branddna_core::insight::InsightReport;
use branddna_core::session::Session;
use branddna_core::taxonomy::display_label;
use branddna_core::FacetCatalog;

use crate::render::{emit, fixed, table};
use crate::{load_brands, OutputArgs, QueryArgs};

pub fn cmd_insights(output: &OutputArgs, query: &QueryArgs) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let mut session = Session::new(FacetCatalog::default());
    session.set_query(query.to_query(&session.catalog)?);
    let report = InsightReport::build(&session.view(&brands));

    emit(&output.format, output.out.as_ref(), &report, render_insights_text)
}

pub fn render_insights_text(report: &InsightReport) -> String {
    let mut out = format!("{} brands\n", report.total);

    for dist in &report.distributions {
        out.push_str(&format!("\n{}\n", dist.title));
        if dist.values.is_empty() {
            out.push_str("  (no data)\n");
            continue;
        }
        for value in &dist.values {
            out.push_str(&format!(
                "  {:<28} {:>4}\n",
                display_label(&value.value),
                value.count
            ));
        }
    }

    let completeness: Vec<Vec<String>> = report
        .completeness
        .iter()
        .map(|b| {
            vec![
                display_label(b.block.key()),
                fixed(b.average),
                b.samples.to_string(),
            ]
        })
        .collect();
    out.push_str("\nBlock completeness\n");
    out.push_str(&table(&["Block", "Avg confidence", "Brands"], &completeness));

    let tab = &report.promo_by_price;
    let mut header: Vec<String> = vec!["Price \\ Promo".to_string()];
    header.extend(tab.columns.iter().map(|c| display_label(c)));
    let header: Vec<&str> = header.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = tab
        .rows
        .iter()
        .zip(&tab.counts)
        .map(|(row, counts)| {
            let mut cells = vec![display_label(row)];
            cells.extend(counts.iter().map(|c| c.to_string()));
            cells
        })
        .collect();
    out.push_str(&format!("\n\n{}\n", tab.title));
    out.push_str(&table(&header, &rows));
    out
}
