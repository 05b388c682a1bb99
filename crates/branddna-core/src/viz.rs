//! Chart data: radar tuples and the landscape scatter.
//!
//! Output is plain numbers; pixel mapping and drawing belong to the renderer.

use serde::Serialize;
use std::f64::consts::PI;

use crate::confidence::overall_confidence;
use crate::levels::{CreativeRisk, PriceSegment, PromoDependency};
use crate::record::BrandRecord;
use crate::taxonomy::{display_label, series_color, style_color};

// ============================================================================
// Radar
// ============================================================================

pub const RADAR_AXES: [&str; 5] = [
    "Creative risk",
    "Novelty tolerance",
    "Promo dependency (inv)",
    "Price",
    "Confidence",
];

/// Five radar coordinates in [0, 1], in [`RADAR_AXES`] order.
pub fn radar_values(record: &BrandRecord) -> [f64; 5] {
    let dna = &record.dna;
    [
        CreativeRisk::from_code(dna.creative_risk_level()).scale(),
        dna.novelty_tolerance().unwrap_or(0.0).clamp(0.0, 1.0),
        1.0 - PromoDependency::from_code(dna.promo_dependency()).scale(),
        PriceSegment::from_code(dna.price_segment()).scale(),
        overall_confidence(record),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub color: String,
    pub values: [f64; 5],
}

impl RadarSeries {
    /// Polygon vertices relative to the chart centre, first axis at 12
    /// o'clock and proceeding clockwise (screen coordinates, y down).
    pub fn vertices(&self, radius: f64) -> [(f64, f64); 5] {
        let step = 2.0 * PI / self.values.len() as f64;
        let mut out = [(0.0, 0.0); 5];
        for (i, value) in self.values.iter().enumerate() {
            let angle = -PI / 2.0 + i as f64 * step;
            out[i] = (radius * value * angle.cos(), radius * value * angle.sin());
        }
        out
    }
}

/// One series per brand, coloured by position.
pub fn radar_series(brands: &[&BrandRecord]) -> Vec<RadarSeries> {
    brands
        .iter()
        .enumerate()
        .map(|(i, brand)| RadarSeries {
            name: brand.name().to_string(),
            color: series_color(i).to_string(),
            values: radar_values(brand),
        })
        .collect()
}

// ============================================================================
// Landscape scatter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterXAxis {
    /// Median observed price, used when every brand reports one.
    PriceP50,
    /// Price segment rank 1..=6 (0 unknown).
    PriceSegment,
}

impl ScatterXAxis {
    pub fn title(self) -> &'static str {
        match self {
            Self::PriceP50 => "Price (p50)",
            Self::PriceSegment => "Price segment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub x: f64,
    /// `x` rescaled to [0, 1] over the plot's x range.
    pub x_norm: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub style: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub x_axis: ScatterXAxis,
    pub x_min: f64,
    pub x_max: f64,
    pub points: Vec<ScatterPoint>,
    pub legend: Vec<LegendEntry>,
}

pub const MIN_POINT_RADIUS: f64 = 6.0;
pub const POINT_RADIUS_SPAN: f64 = 14.0;

impl ScatterPlot {
    /// Price against novelty tolerance, sized by promo dependency and
    /// coloured by primary style.
    ///
    /// The x axis is all-or-nothing: if any brand lacks a numeric p50, every
    /// brand is placed by price segment rank instead.
    pub fn build(collection: &[&BrandRecord]) -> Self {
        let x_axis = if !collection.is_empty()
            && collection.iter().all(|b| b.dna.price_p50().is_some())
        {
            ScatterXAxis::PriceP50
        } else {
            ScatterXAxis::PriceSegment
        };

        let xs: Vec<f64> = collection
            .iter()
            .map(|b| match x_axis {
                ScatterXAxis::PriceP50 => b.dna.price_p50().unwrap_or(0.0),
                ScatterXAxis::PriceSegment => {
                    f64::from(PriceSegment::from_code(b.dna.price_segment()).rank())
                }
            })
            .collect();

        let (x_min, x_max) = if xs.is_empty() {
            (0.0, 0.0)
        } else {
            xs.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                })
        };
        let range = if x_max - x_min == 0.0 { 1.0 } else { x_max - x_min };

        let points = collection
            .iter()
            .zip(&xs)
            .map(|(brand, &x)| {
                let style = brand.dna.style_primary();
                let promo = PromoDependency::from_code(brand.dna.promo_dependency()).scale();
                ScatterPoint {
                    name: brand.name().to_string(),
                    x,
                    x_norm: (x - x_min) / range,
                    y: brand.dna.novelty_tolerance().unwrap_or(0.0),
                    radius: MIN_POINT_RADIUS + promo * POINT_RADIUS_SPAN,
                    color: style_color(style).to_string(),
                    style: style.map(str::to_string),
                }
            })
            .collect::<Vec<_>>();

        let mut legend: Vec<LegendEntry> = Vec::new();
        for style in points.iter().filter_map(|p| p.style.as_deref()) {
            if legend.iter().all(|e| e.style != style) {
                legend.push(LegendEntry {
                    style: style.to_string(),
                    label: display_label(style),
                    color: style_color(Some(style)).to_string(),
                });
            }
        }

        Self {
            x_axis,
            x_min,
            x_max,
            points,
            legend,
        }
    }
}
