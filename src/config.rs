use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE: [&str; 30] = [
    "#ff7f0e", "#1f77b4", "#2ca02c", "#d62728", "#9467bd", "#7f7f7f", "#e377c2", "#e7ba52",
    "#bcbd22", "#17becf", "#393b79", "#8c564b", "#f7b6d2", "#c49c94", "#a2769e", "#dbdb8d",
    "#9edae5", "#c5b0d5", "#c7c7c7", "#ff9896", "#637939", "#aec7e8", "#ffbb78", "#98df8a",
    "#7c231e", "#3d6a3d", "#f96502", "#6d3f7d", "#6b4423", "#d956a6",
];

pub const DEFAULT_FACET_COLUMNS: [&str; 9] = [
    "AL Epigenomic Subtype",
    "WHO 2022 Diagnosis",
    "Hematopoietic Entity",
    "Vital Status",
    "AML Epigenomic Risk",
    "Risk Group AAML1831",
    "Clinical Trial",
    "Race or ethnic group",
    "Age (group years)",
];

/// Histogram parameters: `count` equal-width bins over `[lo, hi)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinSpec {
    pub count: usize,
    pub lo: f64,
    pub hi: f64,
    /// When set, a value equal to `hi` lands in the last bin.
    pub inclusive_top: bool,
}

impl Default for BinSpec {
    fn default() -> Self {
        Self {
            count: 50,
            lo: 0.15,
            hi: 0.85,
            inclusive_top: false,
        }
    }
}

/// Two-valued category split per partition value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownSpec {
    pub partition: String,
    pub category: String,
    pub values: [String; 2],
}

impl Default for BreakdownSpec {
    fn default() -> Self {
        Self {
            partition: "Race or ethnic group".to_string(),
            category: "AML Epigenomic Risk".to_string(),
            values: ["High".to_string(), "Low".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub title: String,
    pub palette: Vec<String>,
    pub width: u32,
    pub scatter_height: u32,
    pub histogram_height: u32,
    pub risk_height: u32,
    pub bins: BinSpec,
    pub risk_threshold: f64,
    pub risk_column: String,
    pub outcome_column: String,
    pub x_column: String,
    pub y_column: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub sample_id_column: Option<String>,
    pub facet_columns: Vec<String>,
    pub breakdown: Option<BreakdownSpec>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            title: "ALMA".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            width: 1000,
            scatter_height: 810,
            histogram_height: 300,
            risk_height: 300,
            bins: BinSpec::default(),
            risk_threshold: 0.5,
            risk_column: "P(Death) at 5y".to_string(),
            outcome_column: "Vital Status at 5y".to_string(),
            x_column: "PaCMAP 1 of 2".to_string(),
            y_column: "PaCMAP 2 of 2".to_string(),
            x_label: None,
            y_label: None,
            x_range: (-45.0, 45.0),
            y_range: (-45.0, 45.0),
            sample_id_column: None,
            facet_columns: DEFAULT_FACET_COLUMNS.iter().map(|c| c.to_string()).collect(),
            breakdown: Some(BreakdownSpec::default()),
        }
    }
}

impl VizConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: VizConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn x_label(&self) -> &str {
        self.x_label.as_deref().unwrap_or(&self.x_column)
    }

    pub fn y_label(&self) -> &str {
        self.y_label.as_deref().unwrap_or(&self.y_column)
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            bail!("palette must contain at least one colour");
        }
        if self.width == 0
            || self.scatter_height == 0
            || self.histogram_height == 0
            || self.risk_height == 0
        {
            bail!("layout dimensions must be positive");
        }
        if self.bins.count == 0 {
            bail!("bin count must be positive");
        }
        if !self.bins.lo.is_finite() || !self.bins.hi.is_finite() || self.bins.lo >= self.bins.hi
        {
            bail!(
                "invalid bin range [{}, {}): lo must be below hi",
                self.bins.lo,
                self.bins.hi
            );
        }
        if !self.risk_threshold.is_finite() {
            bail!("risk threshold must be finite");
        }
        if self.x_range.0 >= self.x_range.1 || self.y_range.0 >= self.y_range.1 {
            bail!("axis ranges must be increasing");
        }
        if self.facet_columns.is_empty() {
            bail!("at least one facet column is required");
        }
        if let Some(b) = &self.breakdown {
            if b.values[0] == b.values[1] {
                bail!(
                    "breakdown values must differ (both are '{}')",
                    b.values[0]
                );
            }
        }
        Ok(())
    }
}
