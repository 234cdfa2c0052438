use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub scatter_height: u32,
    pub histogram_height: u32,
    pub risk_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axes {
    pub x_label: String,
    pub y_label: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub risk_label: String,
}

/// Per-row columns the viewer needs for drawing and recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rows {
    /// `null` where the risk cell was missing.
    pub risk: Vec<Option<f64>>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub percentile: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterPanel {
    pub column: String,
    pub factors: Vec<String>,
    pub colors: Vec<String>,
    /// Index into `factors` per row, -1 when missing.
    pub codes: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramPanel {
    pub title: String,
    pub edges: Vec<f64>,
    pub inclusive_top: bool,
    pub initial: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownRow {
    pub partition: String,
    pub counts: [u64; 2],
    pub percentages: [f64; 2],
    pub total: u64,
    pub other: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownPanel {
    pub partition_column: String,
    pub category_column: String,
    pub values: [String; 2],
    pub partitions: Vec<String>,
    /// Index into `partitions` per row, -1 when missing.
    pub row_partition: Vec<i32>,
    /// 0 or 1 for the recognised values, -1 otherwise.
    pub row_category: Vec<i8>,
    pub initial: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub label: String,
    pub lo: f64,
    pub hi: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskPanel {
    pub title: String,
    pub threshold: f64,
    pub bands: Vec<Band>,
    /// `[row, risk, percentile]` triples.
    pub points: Vec<(usize, f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
    pub row: usize,
    pub label: String,
}

/// Payload embedded in the interactive document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub title: String,
    pub layout: Layout,
    pub axes: Axes,
    pub rows: Rows,
    pub scatter: Vec<ScatterPanel>,
    pub histogram: HistogramPanel,
    pub breakdown: Option<BreakdownPanel>,
    pub risk: RiskPanel,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSummary {
    pub path: String,
    pub n_rows: usize,
    pub n_with_outcome: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramSummary {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Whole-dataset aggregates written next to the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryV1 {
    pub tool: ToolMeta,
    pub schema_version: String,
    pub input: InputSummary,
    pub categories: BTreeMap<String, BTreeMap<String, usize>>,
    pub histogram: HistogramSummary,
    pub breakdown: Option<Vec<BreakdownRow>>,
    pub warnings: Vec<String>,
}
