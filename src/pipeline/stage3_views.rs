use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::views::{build_risk_view, build_scatter_view};

pub struct Stage3Views;

impl Stage3Views {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Views {
    fn name(&self) -> &'static str {
        "stage3_views"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = ctx.dataset.as_ref().context("dataset not loaded")?;
        let mut views = Vec::with_capacity(ctx.config.facet_columns.len());
        for column in &ctx.config.facet_columns {
            let view = build_scatter_view(dataset, column, &ctx.config.palette)?;
            if view.layers.len() > ctx.config.palette.len() {
                ctx.warnings.push(format!(
                    "column '{}' has {} categories for {} colours; colours repeat",
                    column,
                    view.layers.len(),
                    ctx.config.palette.len()
                ));
            }
            info!(
                column = %column,
                layers = view.layers.len(),
                unassigned = view.unassigned,
                "scatter_view_ready"
            );
            views.push(view);
        }

        let risk_view = build_risk_view(dataset, &ctx.config.bins, ctx.config.risk_threshold);
        info!(points = risk_view.points.len(), "risk_view_ready");

        ctx.scatter_views = views;
        ctx.risk_view = Some(risk_view);
        Ok(())
    }
}
