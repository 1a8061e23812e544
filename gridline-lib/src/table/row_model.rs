//! Flattened, sorted, expansion-aware rows for display.

use crate::model::{ColumnSet, Record, RowId};

use super::expansion::ExpansionState;
use super::sort::{sorted_indices, SortState};

/// A row as drawn: one record at some depth of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: RowId,
    /// 0 for top-level rows.
    pub depth: usize,
    /// Store index of the top-level ancestor (itself at depth 0).
    pub top_index: usize,
    /// Child indices from the top level down to this record.
    pub path: Vec<usize>,
    pub has_children: bool,
    pub expanded: bool,
}

impl VisibleRow {
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}

/// Builds the visible row list. Siblings are sorted among themselves;
/// sub-rows appear only under expanded parents.
pub fn build(
    records: &[Record],
    columns: &ColumnSet,
    sorting: &SortState,
    expansion: &ExpansionState,
) -> Vec<VisibleRow> {
    let sort = sorting.current().and_then(|sort| {
        columns
            .get(&sort.column)
            .map(|column| (column, sort.direction))
    });
    let order = |rows: &[Record]| sorted_indices(rows, sort);
    let mut out = Vec::new();
    let mut path = Vec::new();
    push_level(records, &mut path, None, &mut out, &order, expansion);
    out
}

fn push_level(
    records: &[Record],
    path: &mut Vec<usize>,
    top_index: Option<usize>,
    out: &mut Vec<VisibleRow>,
    order: &dyn Fn(&[Record]) -> Vec<usize>,
    expansion: &ExpansionState,
) {
    for index in order(records) {
        let record = &records[index];
        path.push(index);
        let top = top_index.unwrap_or(index);
        let expanded = record.has_children() && expansion.is_expanded(&record.id);
        out.push(VisibleRow {
            id: record.id.clone(),
            depth: path.len() - 1,
            top_index: top,
            path: path.clone(),
            has_children: record.has_children(),
            expanded,
        });
        if expanded {
            push_level(&record.sub_rows, path, Some(top), out, order, expansion);
        }
        path.pop();
    }
}
