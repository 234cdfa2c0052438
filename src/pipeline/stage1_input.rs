use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::table::{TableSchema, read_table};
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let schema = TableSchema::from_config(&ctx.config);
        info!(
            input = %ctx.input.display(),
            format = ?ctx.input_format,
            categorical = schema.categorical.len(),
            "input_schema"
        );
        let dataset = read_table(&ctx.input, ctx.input_format, &schema)?;

        for col in &dataset.categorical {
            if col.factors.is_empty() {
                warn!(column = %col.name, "categorical column has no values");
                ctx.warnings
                    .push(format!("column '{}' has no non-missing values", col.name));
            }
        }

        if let Some(id) = &ctx.test_sample {
            match dataset.row_of_sample(id) {
                Some(row) => {
                    info!(sample = %id, row, "test_sample_found");
                    ctx.highlight_row = Some(row);
                }
                None => bail!("test sample '{}' not found in input table", id),
            }
        }

        let no_risk = dataset.len() - dataset.n_with_risk();
        if no_risk > 0 {
            warn!(rows = no_risk, column = %ctx.config.risk_column, "risk values missing");
            ctx.warnings.push(format!(
                "{} rows have no '{}'; they appear on the maps only",
                no_risk, ctx.config.risk_column
            ));
        }

        if dataset.n_with_outcome() == 0 {
            ctx.warnings.push(format!(
                "no rows with a known '{}'; risk panel will be empty",
                ctx.config.outcome_column
            ));
        }

        ctx.dataset = Some(dataset);
        Ok(())
    }
}
