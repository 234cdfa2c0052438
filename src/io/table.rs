use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::VizConfig;
use crate::dataset::{CategoricalColumn, Dataset, SchemaError, is_missing};
use crate::io::open_maybe_gz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    /// Picks the delimiter from the extension, looking through a trailing `.gz`.
    pub fn detect(path: &Path) -> Self {
        let mut name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if let Some(stripped) = name.strip_suffix(".gz") {
            name = stripped.to_string();
        }
        if name.ends_with(".tsv") || name.ends_with(".txt") {
            Self::Tsv
        } else {
            Self::Csv
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Columns the table must provide, resolved from the configuration.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub risk_column: String,
    pub outcome_column: String,
    pub x_column: String,
    pub y_column: String,
    pub categorical: Vec<String>,
    pub sample_id_column: Option<String>,
}

impl TableSchema {
    pub fn from_config(config: &VizConfig) -> Self {
        let mut categorical: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !categorical.iter().any(|c| c == name) {
                categorical.push(name.to_string());
            }
        };
        for col in &config.facet_columns {
            push(col);
        }
        if let Some(b) = &config.breakdown {
            push(&b.partition);
            push(&b.category);
        }
        Self {
            risk_column: config.risk_column.clone(),
            outcome_column: config.outcome_column.clone(),
            x_column: config.x_column.clone(),
            y_column: config.y_column.clone(),
            categorical,
            sample_id_column: config.sample_id_column.clone(),
        }
    }
}

pub fn read_table(path: &Path, format: TableFormat, schema: &TableSchema) -> Result<Dataset> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open table {}", path.display()))?;
    let dataset = parse_table(reader, format, schema)
        .with_context(|| format!("failed to load table {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        with_risk = dataset.n_with_risk(),
        with_outcome = dataset.n_with_outcome(),
        "table_loaded"
    );
    Ok(dataset)
}

pub fn parse_table<R: Read>(
    reader: R,
    format: TableFormat,
    schema: &TableSchema,
) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().context("failed to read table header")?.clone();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, name) in headers.iter().enumerate() {
        if index.insert(name.to_string(), i).is_some() {
            return Err(SchemaError::DuplicateColumn(name.to_string()).into());
        }
    }
    let lookup = |name: &str| -> Result<usize, SchemaError> {
        index
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    };

    let risk_idx = lookup(&schema.risk_column)?;
    let outcome_idx = lookup(&schema.outcome_column)?;
    let x_idx = lookup(&schema.x_column)?;
    let y_idx = lookup(&schema.y_column)?;
    let cat_idx = schema
        .categorical
        .iter()
        .map(|c| lookup(c.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let id_idx = schema
        .sample_id_column
        .as_deref()
        .map(lookup)
        .transpose()?;

    let mut risk = Vec::new();
    let mut outcome_known = Vec::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut cat_cells: Vec<Vec<String>> = vec![Vec::new(); cat_idx.len()];
    let mut sample_ids = id_idx.map(|_| Vec::new());

    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.with_context(|| format!("malformed table row {}", row))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let raw_risk = cell(risk_idx);
        if is_missing(raw_risk) {
            risk.push(None);
        } else {
            let p = parse_number(raw_risk, &schema.risk_column, row)?;
            if !(0.0..=1.0).contains(&p) {
                return Err(SchemaError::InvalidValue {
                    column: schema.risk_column.clone(),
                    row,
                    value: raw_risk.to_string(),
                    reason: "risk probability must lie in [0, 1]".to_string(),
                }
                .into());
            }
            risk.push(Some(p));
        }
        outcome_known.push(!is_missing(cell(outcome_idx)));
        x.push(parse_number(cell(x_idx), &schema.x_column, row)?);
        y.push(parse_number(cell(y_idx), &schema.y_column, row)?);
        for (cells, idx) in cat_cells.iter_mut().zip(&cat_idx) {
            cells.push(cell(*idx).to_string());
        }
        if let (Some(ids), Some(idx)) = (sample_ids.as_mut(), id_idx) {
            ids.push(cell(idx).trim().to_string());
        }
    }

    if risk.is_empty() {
        return Err(SchemaError::EmptyTable.into());
    }

    let categorical = schema
        .categorical
        .iter()
        .zip(&cat_cells)
        .map(|(name, cells)| CategoricalColumn::from_cells(name, cells))
        .collect();

    Ok(Dataset {
        percentile: vec![None; risk.len()],
        risk,
        outcome_known,
        x,
        y,
        categorical,
        sample_ids,
    })
}

fn parse_number(raw: &str, column: &str, row: usize) -> Result<f64, SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidValue {
        column: column.to_string(),
        row,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
    if !value.is_finite() {
        return Err(invalid("not a finite number"));
    }
    Ok(value)
}
