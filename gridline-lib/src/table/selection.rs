//! Row selection with tri-state parents.

use std::collections::HashMap;

use crate::model::{walk, Record, RowId};

/// Displayed state of a row checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckState {
    /// State for `selected` out of `total` rows.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 {
            Self::Unchecked
        } else if selected >= total {
            Self::Checked
        } else {
            Self::Indeterminate
        }
    }
}

/// Sparse selection map. Only selected rows are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: HashMap<RowId, bool>,
    sub_rows: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: HashMap::new(),
            sub_rows: true,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether toggling a parent also toggles its descendants.
    pub fn with_sub_row_selection(mut self, enabled: bool) -> Self {
        self.sub_rows = enabled;
        self
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Sets `record` (and its descendants, if enabled) to `selected`.
    pub fn set(&mut self, record: &Record, selected: bool) {
        self.set_one(&record.id, selected);
        if self.sub_rows {
            for descendant in record.descendants() {
                self.set_one(&descendant.id, selected);
            }
        }
    }

    fn set_one(&mut self, id: &RowId, selected: bool) {
        if selected {
            self.selected.insert(id.clone(), true);
        } else {
            self.selected.remove(id);
        }
    }

    /// Flips `record` and returns the new value. A parent that is not
    /// fully checked becomes checked.
    pub fn toggle(&mut self, record: &Record) -> bool {
        let selected = self.check_state(record) != CheckState::Checked;
        self.set(record, selected);
        selected
    }

    /// Derived checkbox state. Leaves show their own flag; parents are
    /// computed from how many descendants are selected.
    pub fn check_state(&self, record: &Record) -> CheckState {
        if !self.sub_rows || !record.has_children() {
            return if self.is_selected(&record.id) {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
        }
        let (selected, total) = record
            .descendants()
            .fold((0, 0), |(selected, total), descendant| {
                (selected + usize::from(self.is_selected(&descendant.id)), total + 1)
            });
        CheckState::from_counts(selected, total)
    }

    /// Whether every row in the forest is selected.
    pub fn is_all_selected(&self, records: &[Record]) -> bool {
        self.all_state(records) == CheckState::Checked
    }

    /// Whether some, but not all, rows are selected.
    pub fn is_some_selected(&self, records: &[Record]) -> bool {
        self.all_state(records) == CheckState::Indeterminate
    }

    /// Header checkbox state for the whole forest, combined from the
    /// top-level rows' checkbox states so it agrees with what they show.
    pub fn all_state(&self, records: &[Record]) -> CheckState {
        if !self.sub_rows {
            let (selected, total) = walk(records).fold((0, 0), |(selected, total), record| {
                (selected + usize::from(self.is_selected(&record.id)), total + 1)
            });
            return CheckState::from_counts(selected, total);
        }
        let mut states = records.iter().map(|record| self.check_state(record));
        let Some(first) = states.next() else {
            return CheckState::Unchecked;
        };
        if states.all(|state| state == first) {
            first
        } else {
            CheckState::Indeterminate
        }
    }

    /// Selects every row, or clears when all are already selected.
    pub fn toggle_all(&mut self, records: &[Record]) -> bool {
        if self.is_all_selected(records) {
            self.clear();
            false
        } else {
            for record in walk(records) {
                self.set_one(&record.id, true);
            }
            true
        }
    }

    /// Selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
