use anyhow::Result;

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let dataset = ctx.dataset()?;

    let mut out = String::new();
    out.push_str(&format!("alma-plot v{}\n", ctx.tool_version));
    out.push_str(&format!(
        "Input: {} rows, {} with known outcome\n",
        dataset.len(),
        dataset.n_with_outcome()
    ));

    let tabs: Vec<String> = ctx
        .scatter_views
        .iter()
        .map(|v| format!("{} ({})", v.column, v.layers.len()))
        .collect();
    out.push_str(&format!("Maps: {}\n", tabs.join(", ")));

    if let Some(h) = &ctx.histogram {
        out.push_str(&format!(
            "Histogram: {} bins, {} rows binned\n",
            h.counts.len(),
            h.total()
        ));
    }
    if let Some(b) = &ctx.breakdown {
        out.push_str(&format!(
            "Breakdown: {} by {} ({} groups)\n",
            b.category_column,
            b.partition_column,
            b.rows.len()
        ));
    }
    out.push_str(&format!("Output: {}\n", ctx.output.html_path.display()));

    Ok(out)
}
