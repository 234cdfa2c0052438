use std::collections::BTreeSet;

use anyhow::{Result, bail};
use tracing::debug;

/// Set of selected row indices. Order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all(n_rows: usize) -> Self {
        Self {
            rows: (0..n_rows).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Selection)>;

/// The session's single source of truth for selected rows.
///
/// Listeners run synchronously, in subscription order, after the new set is
/// installed; none of them can observe a half-applied replacement.
pub struct SelectionState {
    n_rows: usize,
    current: Selection,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl SelectionState {
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            current: Selection::empty(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Selection) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Replaces the whole selection. Out-of-range rows reject the gesture and
    /// leave the current selection untouched.
    pub fn replace(&mut self, selection: Selection) -> Result<()> {
        if let Some(bad) = selection.iter().find(|&r| r >= self.n_rows) {
            bail!(
                "selected row {} out of range (dataset has {} rows)",
                bad,
                self.n_rows
            );
        }
        self.current = selection;
        debug!(selected = self.current.len(), "selection_replaced");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.current);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = Selection::empty();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.current);
        }
    }
}

impl std::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionState")
            .field("n_rows", &self.n_rows)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
