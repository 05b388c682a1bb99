//! Chart data: radar series and the price/novelty landscape.
//!
//! Both commands emit the numbers a renderer needs. JSON output is meant for
//! plotting; text output is a quick table.

use anyhow::Result;
use serde::Serialize;

use branddna_core::session::Session;
use branddna_core::viz::{radar_series, RadarSeries, ScatterPlot, RADAR_AXES};
use branddna_core::FacetCatalog;

use crate::render::{emit, fixed, table};
use crate::similar::build_compare_set;
use crate::{load_brands, OutputArgs, QueryArgs};

#[derive(Debug, Serialize)]
pub struct RadarView {
    pub axes: Vec<&'static str>,
    pub series: Vec<RadarSeries>,
}

pub fn cmd_radar(output: &OutputArgs, names: &[String]) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let set = build_compare_set(&brands, names)?;
    let view = RadarView {
        axes: RADAR_AXES.to_vec(),
        series: radar_series(&set.selected(&brands)),
    };

    emit(&output.format, output.out.as_ref(), &view, |v| {
        let mut header: Vec<&str> = vec!["Axis"];
        header.extend(v.series.iter().map(|s| s.name.as_str()));
        let rows: Vec<Vec<String>> = v
            .axes
            .iter()
            .enumerate()
            .map(|(i, axis)| {
                let mut row = vec![axis.to_string()];
                row.extend(v.series.iter().map(|s| fixed(s.values[i])));
                row
            })
            .collect();
        table(&header, &rows)
    })
}

pub fn cmd_landscape(output: &OutputArgs, query: &QueryArgs) -> Result<()> {
    let brands = load_brands(&output.data)?;
    let mut session = Session::new(FacetCatalog::default());
    session.set_query(query.to_query(&session.catalog)?);
    let plot = ScatterPlot::build(&session.view(&brands));

    emit(&output.format, output.out.as_ref(), &plot, render_landscape_text)
}

fn render_landscape_text(plot: &ScatterPlot) -> String {
    let rows: Vec<Vec<String>> = plot
        .points
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                fixed(p.x),
                fixed(p.y),
                format!("{:.1}", p.radius),
                p.style.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let x_title = plot.x_axis.title();
    let mut out = format!(
        "x: {x_title} [{} .. {}]  y: Novelty tolerance\n\n",
        fixed(plot.x_min),
        fixed(plot.x_max)
    );
    out.push_str(&table(&["Brand", x_title, "Novelty", "Radius", "Style"], &rows));
    if !plot.legend.is_empty() {
        out.push_str("\n\nLegend\n");
        for entry in &plot.legend {
            out.push_str(&format!("  {} {}\n", entry.color, entry.label));
        }
    }
    out.trim_end().to_string()
}
