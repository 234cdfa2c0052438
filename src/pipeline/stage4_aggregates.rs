use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::views::{CrossFilter, Selection};

pub struct Stage4Aggregates;

impl Stage4Aggregates {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Aggregates {
    fn name(&self) -> &'static str {
        "stage4_aggregates"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let dataset = ctx.dataset.as_ref().context("dataset not loaded")?;
        let mut session =
            CrossFilter::new(dataset, &ctx.config.bins, ctx.config.breakdown.as_ref())?;
        // Before the first gesture the panels summarise every row.
        session.select(Selection::all(dataset.len()))?;

        let histogram = session.distribution();
        let outside = dataset.n_with_risk() as u64 - histogram.total();
        if outside > 0 {
            ctx.warnings.push(format!(
                "{} rows fall outside the histogram range [{}, {})",
                outside, ctx.config.bins.lo, ctx.config.bins.hi
            ));
        }
        info!(
            binned = histogram.total(),
            outside,
            bins = histogram.counts.len(),
            "histogram_ready"
        );

        let breakdown = session.breakdown();
        if let Some(b) = &breakdown {
            let other: u64 = b.rows.iter().map(|r| r.other).sum();
            info!(
                partitions = b.rows.len(),
                other,
                "breakdown_ready"
            );
        }

        ctx.breakdown_plan = session.breakdown_plan();
        ctx.histogram = Some(histogram);
        ctx.breakdown = breakdown;
        Ok(())
    }
}
