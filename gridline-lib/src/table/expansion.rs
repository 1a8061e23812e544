//! Expansion state: which rows show their sub-rows.

use std::collections::HashMap;

use crate::model::{walk, Record, RowId};

/// Either every row is expanded, or a sparse per-row map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expanded {
    All,
    Rows(HashMap<RowId, bool>),
}

impl Default for Expanded {
    fn default() -> Self {
        Self::Rows(HashMap::new())
    }
}

/// Per-row expansion flags with an "expand all" override.
///
/// Absent rows are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: Expanded,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> &Expanded {
        &self.expanded
    }

    /// Whether `id` shows its sub-rows.
    pub fn is_expanded(&self, id: &RowId) -> bool {
        match &self.expanded {
            Expanded::All => true,
            Expanded::Rows(rows) => rows.get(id).copied().unwrap_or(false),
        }
    }

    pub fn is_all_expanded(&self) -> bool {
        matches!(self.expanded, Expanded::All)
    }

    pub fn is_some_expanded(&self) -> bool {
        match &self.expanded {
            Expanded::All => true,
            Expanded::Rows(rows) => rows.values().any(|&flag| flag),
        }
    }

    /// Flips the flag of `id` and returns the new value.
    ///
    /// Under the "all" override the map is first filled with every
    /// expandable row in `records`, so only `id` collapses.
    pub fn toggle(&mut self, id: &RowId, records: &[Record]) -> bool {
        let expanded = !self.is_expanded(id);
        self.set(id, expanded, records);
        expanded
    }

    /// Sets the flag of `id`.
    pub fn set(&mut self, id: &RowId, expanded: bool, records: &[Record]) {
        if let Expanded::All = self.expanded {
            if expanded {
                return;
            }
            self.expanded = Expanded::Rows(
                walk(records)
                    .filter(|record| record.has_children())
                    .map(|record| (record.id.clone(), true))
                    .collect(),
            );
        }
        if let Expanded::Rows(rows) = &mut self.expanded {
            rows.insert(id.clone(), expanded);
        }
    }

    /// Switches between "all expanded" and "none expanded".
    pub fn toggle_all(&mut self) -> bool {
        self.expanded = match self.expanded {
            Expanded::All => Expanded::Rows(HashMap::new()),
            Expanded::Rows(_) => Expanded::All,
        };
        self.is_all_expanded()
    }

    pub fn reset(&mut self) {
        self.expanded = Expanded::default();
    }
}
