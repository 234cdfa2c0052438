use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::math::stats::percentile_ranks;
use crate::pipeline::Stage;

pub struct Stage2Percentile;

impl Stage2Percentile {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Percentile {
    fn name(&self) -> &'static str {
        "stage2_percentile"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = ctx.dataset.as_mut().context("dataset not loaded")?;
        dataset.percentile = percentile_ranks(&dataset.risk, &dataset.outcome_known);
        info!(
            ranked = dataset.n_with_outcome(),
            rows = dataset.len(),
            "percentiles_ready"
        );
        Ok(())
    }
}
