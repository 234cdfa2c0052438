use std::collections::HashMap;

use thiserror::Error;

/// Failures at the table boundary. Raised before any rendering happens.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("invalid value '{value}' in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    #[error("table has no data rows")]
    EmptyTable,
}

const MISSING_MARKERS: [&str; 6] = ["", "NA", "NaN", "nan", "None", "N/A"];

pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// A categorical column with values interned into first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColumn {
    pub name: String,
    pub factors: Vec<String>,
    /// Per-row index into `factors`; `None` for missing cells.
    pub codes: Vec<Option<u32>>,
}

impl CategoricalColumn {
    pub fn from_cells<S: AsRef<str>>(name: &str, cells: &[S]) -> Self {
        let mut factors: Vec<String> = Vec::new();
        let mut index: HashMap<String, u32> = HashMap::new();
        let mut codes = Vec::with_capacity(cells.len());
        for cell in cells {
            let cell = cell.as_ref();
            if is_missing(cell) {
                codes.push(None);
                continue;
            }
            let value = cell.trim();
            let code = match index.get(value) {
                Some(code) => *code,
                None => {
                    let code = factors.len() as u32;
                    factors.push(value.to_string());
                    index.insert(value.to_string(), code);
                    code
                }
            };
            codes.push(Some(code));
        }
        Self {
            name: name.to_string(),
            factors,
            codes,
        }
    }

    pub fn value(&self, row: usize) -> Option<&str> {
        self.codes
            .get(row)
            .copied()
            .flatten()
            .map(|c| self.factors[c as usize].as_str())
    }

    /// Number of rows per factor, in factor order.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.factors.len()];
        for code in self.codes.iter().flatten() {
            counts[*code as usize] += 1;
        }
        counts
    }
}

/// Immutable, column-oriented view of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// `None` where the risk cell is missing; such rows still plot on the maps.
    pub risk: Vec<Option<f64>>,
    pub outcome_known: Vec<bool>,
    pub percentile: Vec<Option<f64>>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub categorical: Vec<CategoricalColumn>,
    pub sample_ids: Option<Vec<String>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.risk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risk.is_empty()
    }

    pub fn n_with_risk(&self) -> usize {
        self.risk.iter().filter(|r| r.is_some()).count()
    }

    pub fn n_with_outcome(&self) -> usize {
        self.outcome_known.iter().filter(|k| **k).count()
    }

    pub fn column(&self, name: &str) -> Option<&CategoricalColumn> {
        self.categorical.iter().find(|c| c.name == name)
    }

    pub fn row_of_sample(&self, id: &str) -> Option<usize> {
        self.sample_ids
            .as_ref()
            .and_then(|ids| ids.iter().position(|s| s == id))
    }
}
