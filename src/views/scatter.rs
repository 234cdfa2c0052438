use anyhow::{Result, anyhow, bail};
use serde::Serialize;

use crate::dataset::Dataset;

/// One colour layer of a scatter view: every row carrying `factor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayer {
    pub factor: String,
    pub color: String,
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub column: String,
    pub layers: Vec<ScatterLayer>,
    /// Rows with a missing value in `column`; drawn in no layer.
    pub unassigned: usize,
}

impl ScatterView {
    pub fn factors(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.factor.as_str()).collect()
    }

    pub fn colors(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.color.as_str()).collect()
    }
}

/// Colour for the `index`-th category. Wraps around when categories outnumber
/// the palette.
pub fn palette_color(palette: &[String], index: usize) -> Result<&str> {
    if palette.is_empty() {
        bail!("palette is empty");
    }
    Ok(palette[index % palette.len()].as_str())
}

pub fn build_scatter_view(
    dataset: &Dataset,
    column: &str,
    palette: &[String],
) -> Result<ScatterView> {
    let col = dataset
        .column(column)
        .ok_or_else(|| anyhow!("facet column '{}' not loaded", column))?;

    let mut layers = col
        .factors
        .iter()
        .enumerate()
        .map(|(i, factor)| {
            Ok(ScatterLayer {
                factor: factor.clone(),
                color: palette_color(palette, i)?.to_string(),
                rows: Vec::new(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut unassigned = 0;
    for (row, code) in col.codes.iter().enumerate() {
        match code {
            Some(c) => layers[*c as usize].rows.push(row),
            None => unassigned += 1,
        }
    }

    Ok(ScatterView {
        column: column.to_string(),
        layers,
        unassigned,
    })
}
