use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::config::BreakdownSpec;
use crate::dataset::Dataset;
use crate::math::stats::percent;
use crate::views::selection::Selection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionBreakdown {
    pub partition: String,
    /// Counts for the two recognised category values, in configured order.
    pub counts: [u64; 2],
    pub percentages: [f64; 2],
    /// Rows carrying one of the two recognised values.
    pub total: u64,
    /// Selected rows whose category is missing or unrecognised; not part of `total`.
    pub other: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub partition_column: String,
    pub category_column: String,
    pub values: [String; 2],
    pub rows: Vec<PartitionBreakdown>,
}

impl CategoryBreakdown {
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

/// Per-row codes resolved once at render time. The partition set is closed:
/// only values present in the full dataset ever appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownPlan {
    pub partition_column: String,
    pub category_column: String,
    pub values: [String; 2],
    pub partitions: Vec<String>,
    pub row_partition: Vec<Option<u32>>,
    /// `Some(0)` / `Some(1)` for the recognised values, `None` otherwise.
    pub row_category: Vec<Option<u8>>,
}

impl BreakdownPlan {
    pub fn new(dataset: &Dataset, spec: &BreakdownSpec) -> Result<Self> {
        let partition = dataset
            .column(&spec.partition)
            .ok_or_else(|| {
                anyhow!("breakdown partition column '{}' not loaded", spec.partition)
            })?;
        let category = dataset
            .column(&spec.category)
            .ok_or_else(|| {
                anyhow!("breakdown category column '{}' not loaded", spec.category)
            })?;

        let row_category = (0..dataset.len())
            .map(|row| match category.value(row) {
                Some(v) if v == spec.values[0] => Some(0u8),
                Some(v) if v == spec.values[1] => Some(1u8),
                _ => None,
            })
            .collect();

        Ok(Self {
            partition_column: spec.partition.clone(),
            category_column: spec.category.clone(),
            values: spec.values.clone(),
            partitions: partition.factors.clone(),
            row_partition: partition.codes.clone(),
            row_category,
        })
    }
}

/// Full recomputation of the per-partition split for `selection`.
pub fn category_breakdown(plan: &BreakdownPlan, selection: &Selection) -> CategoryBreakdown {
    let mut counts = vec![[0u64; 2]; plan.partitions.len()];
    let mut other = vec![0u64; plan.partitions.len()];

    for row in selection.iter() {
        let Some(Some(p)) = plan.row_partition.get(row).copied() else {
            continue;
        };
        match plan.row_category.get(row).copied().flatten() {
            Some(c) => counts[p as usize][c as usize] += 1,
            None => other[p as usize] += 1,
        }
    }

    let rows = plan
        .partitions
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let c = counts[i];
            let total = c[0] + c[1];
            PartitionBreakdown {
                partition: name.clone(),
                counts: c,
                percentages: [percent(c[0], total), percent(c[1], total)],
                total,
                other: other[i],
            }
        })
        .collect();

    CategoryBreakdown {
        partition_column: plan.partition_column.clone(),
        category_column: plan.category_column.clone(),
        values: plan.values.clone(),
        rows,
    }
}

#[derive(Debug, Clone)]
pub struct BreakdownView {
    plan: BreakdownPlan,
    breakdown: CategoryBreakdown,
}

impl BreakdownView {
    pub fn new(plan: BreakdownPlan) -> Self {
        let breakdown = category_breakdown(&plan, &Selection::empty());
        Self { plan, breakdown }
    }

    pub fn recompute(&mut self, selection: &Selection) {
        self.breakdown = category_breakdown(&self.plan, selection);
    }

    pub fn plan(&self) -> &BreakdownPlan {
        &self.plan
    }

    pub fn breakdown(&self) -> &CategoryBreakdown {
        &self.breakdown
    }
}
