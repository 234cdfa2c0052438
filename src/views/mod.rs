//! View models behind the interactive document.
//!
//! Scatter and risk views are built once from the dataset. The histogram and
//! the category breakdown are pure functions of (dataset, selection) and are
//! recomputed in full whenever the selection is replaced.

pub mod breakdown;
pub mod crossfilter;
pub mod histogram;
pub mod risk;
pub mod scatter;
pub mod selection;

pub use breakdown::{BreakdownPlan, CategoryBreakdown, PartitionBreakdown, category_breakdown};
pub use crossfilter::CrossFilter;
pub use histogram::{BinDistribution, bin_distribution, bin_edges, locate_bin};
pub use risk::{RiskView, build_risk_view};
pub use scatter::{ScatterView, build_scatter_view, palette_color};
pub use selection::{Selection, SelectionState, SubscriptionId};
