use serde::Serialize;

use crate::config::BinSpec;
use crate::dataset::Dataset;

const LOW_RISK_COLOR: &str = "#1f77b4";
const HIGH_RISK_COLOR: &str = "#ff7f0e";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBand {
    pub label: String,
    pub lo: f64,
    pub hi: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskPoint {
    pub row: usize,
    pub risk: f64,
    pub percentile: f64,
}

/// Risk probability against percentile rank. Rendered once; never follows
/// the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub threshold: f64,
    pub bands: Vec<RiskBand>,
    pub points: Vec<RiskPoint>,
}

pub fn build_risk_view(dataset: &Dataset, bins: &BinSpec, threshold: f64) -> RiskView {
    let cut = threshold.clamp(bins.lo, bins.hi);
    let bands = vec![
        RiskBand {
            label: "Low Risk".to_string(),
            lo: bins.lo,
            hi: cut,
            color: LOW_RISK_COLOR.to_string(),
        },
        RiskBand {
            label: "High Risk".to_string(),
            lo: cut,
            hi: bins.hi,
            color: HIGH_RISK_COLOR.to_string(),
        },
    ];

    let points = dataset
        .percentile
        .iter()
        .enumerate()
        .filter_map(|(row, p)| match (p, dataset.risk[row]) {
            (Some(percentile), Some(risk)) => Some(RiskPoint {
                row,
                risk,
                percentile: *percentile,
            }),
            _ => None,
        })
        .collect();

    RiskView {
        threshold,
        bands,
        points,
    }
}
