//! Rank statistics over the risk column.

/// Percentile rank of every row with a known outcome and a risk value.
///
/// Rows are ordered by `values` ascending (ties keep table order) and row
/// `k` of `n` in that order gets `k / n`. All other rows get `None`.
pub fn percentile_ranks(values: &[Option<f64>], known: &[bool]) -> Vec<Option<f64>> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(i, _)| known.get(*i).copied().unwrap_or(false))
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let n = order.len();
    let mut out = vec![None; values.len()];
    for (rank, &(row, _)) in order.iter().enumerate() {
        out[row] = Some(rank as f64 / n as f64);
    }
    out
}

/// `100 * part / total`, or 0 when `total` is 0.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * part as f64 / total as f64
}
