use alma_plot::config::BinSpec;
use alma_plot::views::histogram::HistogramView;
use alma_plot::views::{Selection, bin_distribution, bin_edges, locate_bin};

fn some(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

fn spec(count: usize, lo: f64, hi: f64) -> BinSpec {
    BinSpec {
        count,
        lo,
        hi,
        inclusive_top: false,
    }
}

#[test]
fn edges_hit_both_endpoints() {
    let edges = bin_edges(&BinSpec::default());
    assert_eq!(edges.len(), 51);
    assert_eq!(edges[0], 0.15);
    assert_eq!(edges[50], 0.85);
    assert!(edges.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn right_edge_belongs_to_next_bin() {
    let risk = some(&[0.20, 0.50, 0.50, 0.80]);
    let s = spec(2, 0.15, 0.85);
    let edges = bin_edges(&s);
    let dist = bin_distribution(&risk, &Selection::all(4), &edges, false);
    assert_eq!(dist.counts, vec![1, 3]);
}

#[test]
fn total_matches_rows_in_range() {
    let values = [0.01, 0.15, 0.2, 0.49, 0.5, 0.84, 0.85, 0.99, 0.3, 0.7];
    let risk = some(&values);
    let s = BinSpec::default();
    let edges = bin_edges(&s);
    let sel: Selection = [0, 1, 3, 5, 6, 7, 9].into_iter().collect();
    let dist = bin_distribution(&risk, &sel, &edges, false);

    let expected = sel
        .iter()
        .filter(|&r| values[r] >= s.lo && values[r] < s.hi)
        .count() as u64;
    assert_eq!(dist.total(), expected);
    assert_eq!(dist.total(), 4);
}

#[test]
fn recompute_is_idempotent() {
    let risk = some(&[0.2, 0.3, 0.4, 0.6, 0.61, 0.8]);
    let mut view = HistogramView::new(&BinSpec::default());
    let sel: Selection = [1, 3, 4].into_iter().collect();

    view.recompute(&risk, &sel);
    let first = view.distribution().clone();
    view.recompute(&risk, &sel);
    assert_eq!(view.distribution(), &first);
}

#[test]
fn empty_selection_is_all_zero() {
    let risk = some(&[0.2, 0.5, 0.8]);
    let edges = bin_edges(&spec(5, 0.15, 0.85));
    let dist = bin_distribution(&risk, &Selection::empty(), &edges, false);
    assert_eq!(dist.counts, vec![0; 5]);
}

#[test]
fn missing_values_land_in_no_bin() {
    let risk = vec![Some(0.2), None, Some(0.6), None];
    let edges = bin_edges(&spec(2, 0.15, 0.85));
    let dist = bin_distribution(&risk, &Selection::all(4), &edges, false);
    assert_eq!(dist.counts, vec![1, 1]);
}

#[test]
fn top_edge_policy() {
    let edges = bin_edges(&spec(2, 0.0, 1.0));
    assert_eq!(locate_bin(&edges, 1.0, false), None);
    assert_eq!(locate_bin(&edges, 1.0, true), Some(1));
    assert_eq!(locate_bin(&edges, 0.0, false), Some(0));
    assert_eq!(locate_bin(&edges, -0.1, true), None);
}
