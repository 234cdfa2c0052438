use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::io::html_writer::breakdown_row;
use crate::schema::v1::{HistogramSummary, InputSummary, SummaryV1, ToolMeta};

pub fn build_summary(ctx: &Ctx) -> Result<SummaryV1> {
    let dataset = ctx.dataset()?;
    let histogram = ctx.histogram.as_ref().context("histogram missing")?;

    let mut categories = BTreeMap::new();
    for column in &dataset.categorical {
        let counts: BTreeMap<String, usize> = column
            .factors
            .iter()
            .cloned()
            .zip(column.counts())
            .collect();
        categories.insert(column.name.clone(), counts);
    }

    Ok(SummaryV1 {
        tool: ToolMeta {
            name: "alma-plot".to_string(),
            version: ctx.tool_version.clone(),
        },
        schema_version: "v1".to_string(),
        input: InputSummary {
            path: ctx.input.display().to_string(),
            n_rows: dataset.len(),
            n_with_outcome: dataset.n_with_outcome(),
        },
        categories,
        histogram: HistogramSummary {
            edges: histogram.edges.clone(),
            counts: histogram.counts.clone(),
        },
        breakdown: ctx
            .breakdown
            .as_ref()
            .map(|b| b.rows.iter().map(breakdown_row).collect()),
        warnings: ctx.warnings.clone(),
    })
}

/// Pretty JSON text of the summary; written by the output stage together
/// with the document.
pub fn render_summary_json(ctx: &Ctx) -> Result<String> {
    let summary = build_summary(ctx)?;
    let mut json = serde_json::to_string_pretty(&summary)?;
    json.push('\n');
    Ok(json)
}
