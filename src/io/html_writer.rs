use std::fmt::Write;

use anyhow::{Context, Result, anyhow};
use crc::{CRC_64_ECMA_182, Crc};

use crate::ctx::Ctx;
use crate::schema::v1::{
    Axes, Band, BreakdownPanel, BreakdownRow, DocumentV1, HistogramPanel, Highlight, Layout,
    RiskPanel, Rows, ScatterPanel,
};
use crate::views::PartitionBreakdown;

const VIEWER_JS: &str = include_str!("../../assets/viewer.js");
const VIEWER_CSS: &str = include_str!("../../assets/viewer.css");
const THEME_CSS: &str = include_str!("../../assets/theme.css");

pub const ROOT_MARKER_ATTR: &str = "data-alma-root";
pub const ROOT_ID_PREFIX: &str = "alma-root-";
pub const DATA_SCRIPT_ID: &str = "alma-data";
pub const INIT_SCRIPT_ID: &str = "alma-init";
pub const THEME_STYLE_ID: &str = "alma-theme";

const HISTOGRAM_TITLE: &str =
    "AML Epigenomic Risk - Select clusters on the map and their prognosis will appear here";
const RISK_TITLE: &str = "AML Epigenomic Risk";

const CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_ECMA_182);

pub fn build_document(ctx: &Ctx) -> Result<DocumentV1> {
    let dataset = ctx.dataset()?;
    let config = &ctx.config;
    let histogram = ctx.histogram.as_ref().context("histogram missing")?;
    let risk_view = ctx.risk_view.as_ref().context("risk view missing")?;

    let mut scatter = Vec::with_capacity(ctx.scatter_views.len());
    for view in &ctx.scatter_views {
        let column = dataset
            .column(&view.column)
            .ok_or_else(|| anyhow!("facet column '{}' not loaded", view.column))?;
        scatter.push(ScatterPanel {
            column: view.column.clone(),
            factors: view.factors().iter().map(|s| s.to_string()).collect(),
            colors: view.colors().iter().map(|s| s.to_string()).collect(),
            codes: column
                .codes
                .iter()
                .map(|c| c.map(|v| v as i32).unwrap_or(-1))
                .collect(),
        });
    }

    let breakdown = match (&ctx.breakdown_plan, &ctx.breakdown) {
        (Some(plan), Some(initial)) => Some(BreakdownPanel {
            partition_column: plan.partition_column.clone(),
            category_column: plan.category_column.clone(),
            values: plan.values.clone(),
            partitions: plan.partitions.clone(),
            row_partition: plan
                .row_partition
                .iter()
                .map(|c| c.map(|v| v as i32).unwrap_or(-1))
                .collect(),
            row_category: plan
                .row_category
                .iter()
                .map(|c| c.map(|v| v as i8).unwrap_or(-1))
                .collect(),
            initial: initial.rows.iter().map(breakdown_row).collect(),
        }),
        _ => None,
    };

    let highlight = match (ctx.highlight_row, &ctx.test_sample) {
        (Some(row), Some(label)) => Some(Highlight {
            row,
            label: label.clone(),
        }),
        _ => None,
    };

    Ok(DocumentV1 {
        tool: "alma-plot".to_string(),
        version: ctx.tool_version.clone(),
        schema_version: "v1".to_string(),
        title: config.title.clone(),
        layout: Layout {
            width: config.width,
            scatter_height: config.scatter_height,
            histogram_height: config.histogram_height,
            risk_height: config.risk_height,
        },
        axes: Axes {
            x_label: config.x_label().to_string(),
            y_label: config.y_label().to_string(),
            x_range: [config.x_range.0, config.x_range.1],
            y_range: [config.y_range.0, config.y_range.1],
            risk_label: config.risk_column.clone(),
        },
        rows: Rows {
            risk: dataset.risk.clone(),
            x: dataset.x.clone(),
            y: dataset.y.clone(),
            percentile: dataset.percentile.clone(),
        },
        scatter,
        histogram: HistogramPanel {
            title: HISTOGRAM_TITLE.to_string(),
            edges: histogram.edges.clone(),
            inclusive_top: config.bins.inclusive_top,
            initial: histogram.counts.clone(),
        },
        breakdown,
        risk: RiskPanel {
            title: RISK_TITLE.to_string(),
            threshold: risk_view.threshold,
            bands: risk_view
                .bands
                .iter()
                .map(|b| Band {
                    label: b.label.clone(),
                    lo: b.lo,
                    hi: b.hi,
                    color: b.color.clone(),
                })
                .collect(),
            points: risk_view
                .points
                .iter()
                .map(|p| (p.row, p.risk, p.percentile))
                .collect(),
        },
        highlight,
    })
}

pub(crate) fn breakdown_row(row: &PartitionBreakdown) -> BreakdownRow {
    BreakdownRow {
        partition: row.partition.clone(),
        counts: row.counts,
        percentages: row.percentages,
        total: row.total,
        other: row.other,
    }
}

/// Stable root identifier: the same payload always renders under the same id.
pub fn root_id_for(payload_json: &str) -> String {
    format!("{}{:016x}", ROOT_ID_PREFIX, CRC64.checksum(payload_json.as_bytes()))
}

pub fn render_html(doc: &DocumentV1) -> Result<String> {
    let payload = serde_json::to_string(doc)?;
    let root_id = root_id_for(&payload);
    // '<' only occurs inside JSON strings, so the escape keeps the payload valid.
    let payload = payload.replace('<', "\\u003c");

    let mut html = String::with_capacity(payload.len() + VIEWER_JS.len() + 16 * 1024);
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
    )?;
    writeln!(html, "<title>{}</title>", escape_html(&doc.title))?;
    writeln!(html, "<style id=\"alma-style\">\n{}</style>", VIEWER_CSS)?;
    writeln!(html, "<style id=\"{}\">\n{}</style>", THEME_STYLE_ID, THEME_CSS)?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(
        html,
        "<div id=\"{}\" class=\"alma-root\" {}=\"true\"></div>",
        root_id, ROOT_MARKER_ATTR
    )?;
    writeln!(
        html,
        "<script type=\"application/json\" id=\"{}\">{}</script>",
        DATA_SCRIPT_ID, payload
    )?;
    writeln!(html, "<script id=\"alma-viewer\">\n{}</script>", VIEWER_JS)?;
    writeln!(
        html,
        "<script id=\"{}\">AlmaViewer.mount({{\"root_id\":\"{}\",\"data_id\":\"{}\"}});</script>",
        INIT_SCRIPT_ID, root_id, DATA_SCRIPT_ID
    )?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
