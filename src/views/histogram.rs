use serde::Serialize;

use crate::config::BinSpec;
use crate::views::selection::Selection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinDistribution {
    /// `count + 1` ascending edges; bin `j` covers `[edges[j], edges[j + 1])`.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl BinDistribution {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Edges are interpolated from both ends so that `edges[0] == lo` and
/// `edges[count] == hi` exactly.
pub fn bin_edges(spec: &BinSpec) -> Vec<f64> {
    let n = spec.count as f64;
    (0..=spec.count)
        .map(|j| match j {
            0 => spec.lo,
            j if j == spec.count => spec.hi,
            j => {
                let j = j as f64;
                (spec.lo * (n - j) + spec.hi * j) / n
            }
        })
        .collect()
}

/// Bin index for `value`: first `j` with `edges[j] <= value < edges[j + 1]`.
/// Values outside `[lo, hi)` have no bin, except `hi` itself when the top bin
/// is inclusive.
pub fn locate_bin(edges: &[f64], value: f64, inclusive_top: bool) -> Option<usize> {
    if edges.len() < 2 {
        return None;
    }
    let last = edges.len() - 2;
    for j in 0..=last {
        if value >= edges[j] && value < edges[j + 1] {
            return Some(j);
        }
    }
    if inclusive_top && value == edges[last + 1] {
        return Some(last);
    }
    None
}

/// Counts selected rows per bin. Always recomputed from scratch; rows
/// without a value land in no bin.
pub fn bin_distribution(
    values: &[Option<f64>],
    selection: &Selection,
    edges: &[f64],
    inclusive_top: bool,
) -> BinDistribution {
    let mut counts = vec![0u64; edges.len().saturating_sub(1)];
    for row in selection.iter() {
        let Some(Some(value)) = values.get(row).copied() else {
            continue;
        };
        if let Some(j) = locate_bin(edges, value, inclusive_top) {
            counts[j] += 1;
        }
    }
    BinDistribution {
        edges: edges.to_vec(),
        counts,
    }
}

/// Selection-driven histogram of the risk column.
#[derive(Debug, Clone)]
pub struct HistogramView {
    edges: Vec<f64>,
    inclusive_top: bool,
    distribution: BinDistribution,
}

impl HistogramView {
    pub fn new(spec: &BinSpec) -> Self {
        let edges = bin_edges(spec);
        let distribution = BinDistribution {
            counts: vec![0; spec.count],
            edges: edges.clone(),
        };
        Self {
            edges,
            inclusive_top: spec.inclusive_top,
            distribution,
        }
    }

    pub fn recompute(&mut self, risk: &[Option<f64>], selection: &Selection) {
        self.distribution = bin_distribution(risk, selection, &self.edges, self.inclusive_top);
    }

    pub fn distribution(&self) -> &BinDistribution {
        &self.distribution
    }
}
