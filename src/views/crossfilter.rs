use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::config::{BinSpec, BreakdownSpec};
use crate::dataset::Dataset;
use crate::views::breakdown::{BreakdownPlan, BreakdownView, CategoryBreakdown};
use crate::views::histogram::{BinDistribution, HistogramView};
use crate::views::selection::{Selection, SelectionState};

/// A rendering session: shared selection plus the aggregate views that
/// follow it. Mirrors the wiring the browser viewer performs.
#[derive(Debug)]
pub struct CrossFilter {
    state: SelectionState,
    histogram: Rc<RefCell<HistogramView>>,
    breakdown: Option<Rc<RefCell<BreakdownView>>>,
}

impl CrossFilter {
    pub fn new(
        dataset: &Dataset,
        bins: &BinSpec,
        breakdown: Option<&BreakdownSpec>,
    ) -> Result<Self> {
        let mut state = SelectionState::new(dataset.len());

        let risk: Rc<[Option<f64>]> = Rc::from(dataset.risk.as_slice());
        let histogram = Rc::new(RefCell::new(HistogramView::new(bins)));
        {
            let view = Rc::clone(&histogram);
            state.subscribe(move |sel| view.borrow_mut().recompute(&risk, sel));
        }

        let breakdown = match breakdown {
            Some(spec) => {
                let plan = BreakdownPlan::new(dataset, spec)?;
                let view = Rc::new(RefCell::new(BreakdownView::new(plan)));
                let sub = Rc::clone(&view);
                state.subscribe(move |sel| sub.borrow_mut().recompute(sel));
                Some(view)
            }
            None => None,
        };

        Ok(Self {
            state,
            histogram,
            breakdown,
        })
    }

    pub fn select(&mut self, selection: Selection) -> Result<()> {
        self.state.replace(selection)
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn selection(&self) -> &Selection {
        self.state.current()
    }

    pub fn state_mut(&mut self) -> &mut SelectionState {
        &mut self.state
    }

    pub fn distribution(&self) -> BinDistribution {
        self.histogram.borrow().distribution().clone()
    }

    pub fn breakdown(&self) -> Option<CategoryBreakdown> {
        self.breakdown.as_ref().map(|v| v.borrow().breakdown().clone())
    }

    pub fn breakdown_plan(&self) -> Option<BreakdownPlan> {
        self.breakdown.as_ref().map(|v| v.borrow().plan().clone())
    }
}
