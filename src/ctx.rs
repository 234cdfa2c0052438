use std::path::PathBuf;

use crate::config::VizConfig;
use crate::dataset::Dataset;
use crate::io::table::TableFormat;
use crate::schema::v1::DocumentV1;
use crate::views::{BinDistribution, BreakdownPlan, CategoryBreakdown, RiskView, ScatterView};

pub const HTML_FILE: &str = "index.html";
pub const SUMMARY_FILE: &str = "alma_summary.json";

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub html_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub input_format: TableFormat,
    pub config: VizConfig,
    pub test_sample: Option<String>,
    pub write_json: bool,
    pub tool_version: String,
    pub warnings: Vec<String>,
    pub dataset: Option<Dataset>,
    pub highlight_row: Option<usize>,
    pub scatter_views: Vec<ScatterView>,
    pub risk_view: Option<RiskView>,
    pub histogram: Option<BinDistribution>,
    pub breakdown_plan: Option<BreakdownPlan>,
    pub breakdown: Option<CategoryBreakdown>,
    pub document: Option<DocumentV1>,
    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        config: VizConfig,
        test_sample: Option<String>,
        write_json: bool,
        tool_version: &str,
    ) -> Self {
        let html_path = out_dir.join(HTML_FILE);
        let json_path = out_dir.join(SUMMARY_FILE);
        Self {
            input_format: TableFormat::detect(&input),
            input,
            config,
            test_sample,
            write_json,
            tool_version: tool_version.to_string(),
            warnings: Vec::new(),
            dataset: None,
            highlight_row: None,
            scatter_views: Vec::new(),
            risk_view: None,
            histogram: None,
            breakdown_plan: None,
            breakdown: None,
            document: None,
            output: OutputPaths {
                out_dir,
                html_path,
                json_path,
            },
        }
    }

    pub fn dataset(&self) -> anyhow::Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("dataset not loaded"))
    }
}
