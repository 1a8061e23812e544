//! Table state: the row store plus everything layered on top of it.

mod expansion;
mod headers;
mod row_model;
mod selection;
mod sizing;
mod sort;
mod store;

pub use expansion::{Expanded, ExpansionState};
pub use headers::{footer_groups, footer_label, header_groups, header_label, HeaderCell, HeaderGroup};
pub use row_model::VisibleRow;
pub use selection::{CheckState, SelectionState};
pub use sizing::{ColumnResizeMode, ColumnSizing, ResizeInfo};
pub use sort::{ColumnSort, SortDirection, SortState};
pub use store::RowStore;

use log::{debug, info};

use crate::error::TableError;
use crate::model::{CellValue, ColumnId, ColumnSet, Record, RowId};

/// Interaction state, owned by whoever owns the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub expansion: ExpansionState,
    pub selection: SelectionState,
    pub sorting: SortState,
    pub sizing: ColumnSizing,
}

/// Columns, rows and interaction state of one table.
///
/// There is no shared or global state: event handlers receive
/// `&mut Table` and every query is answered from it.
#[derive(Debug, Clone)]
pub struct Table {
    columns: ColumnSet,
    store: RowStore,
    pub state: TableState,
}

impl Table {
    pub fn new(columns: ColumnSet, records: Vec<Record>) -> Result<Self, TableError> {
        Ok(Self {
            columns,
            store: RowStore::new(records)?,
            state: TableState::default(),
        })
    }

    pub fn with_state(mut self, state: TableState) -> Self {
        self.state = state;
        self
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// Rows to draw, in order.
    pub fn row_model(&self) -> Vec<VisibleRow> {
        row_model::build(
            self.store.records(),
            &self.columns,
            &self.state.sorting,
            &self.state.expansion,
        )
    }

    /// The record behind a visible row.
    pub fn record(&self, row: &VisibleRow) -> Option<&Record> {
        self.store.get_path(&row.path)
    }

    /// Replaces the data. Expansion and selection refer to old ids, so
    /// both are reset.
    pub fn regenerate(&mut self, records: Vec<Record>) -> Result<(), TableError> {
        self.store.replace(records)?;
        self.state.expansion.reset();
        self.state.selection.clear();
        info!("Regenerated table with {} top-level rows", self.store.len());
        Ok(())
    }

    /// See [`RowStore::reorder`].
    pub fn reorder_row(&mut self, source: usize, target: usize) -> Result<(), TableError> {
        self.store.reorder(source, target)
    }

    pub fn toggle_expanded(&mut self, id: &RowId) -> Result<bool, TableError> {
        if self.store.find(id).is_none() {
            return Err(TableError::UnknownRow(id.clone()));
        }
        let expanded = self.state.expansion.toggle(id, self.store.records());
        debug!("Row {} expanded={}", id, expanded);
        Ok(expanded)
    }

    pub fn set_expanded(&mut self, id: &RowId, expanded: bool) -> Result<(), TableError> {
        if self.store.find(id).is_none() {
            return Err(TableError::UnknownRow(id.clone()));
        }
        self.state.expansion.set(id, expanded, self.store.records());
        Ok(())
    }

    pub fn toggle_all_expanded(&mut self) -> bool {
        self.state.expansion.toggle_all()
    }

    pub fn toggle_selected(&mut self, id: &RowId) -> Result<bool, TableError> {
        let record = self
            .store
            .find(id)
            .ok_or_else(|| TableError::UnknownRow(id.clone()))?;
        let selected = self.state.selection.toggle(record);
        debug!("Row {} selected={}", id, selected);
        Ok(selected)
    }

    pub fn toggle_all_selected(&mut self) -> bool {
        self.state.selection.toggle_all(self.store.records())
    }

    pub fn check_state(&self, id: &RowId) -> Option<CheckState> {
        self.store
            .find(id)
            .map(|record| self.state.selection.check_state(record))
    }

    pub fn all_check_state(&self) -> CheckState {
        self.state.selection.all_state(self.store.records())
    }

    /// Cycles the sort on a leaf column. Non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, column: &ColumnId) -> Result<Option<ColumnSort>, TableError> {
        let def = self
            .columns
            .get(column)
            .ok_or_else(|| TableError::UnknownColumn(column.clone()))?;
        if !def.sortable {
            return Ok(self.state.sorting.current().cloned());
        }
        Ok(self.state.sorting.toggle(column).cloned())
    }

    /// Value of the leaf column `index` for `record`.
    pub fn cell_value(&self, record: &Record, index: usize) -> Option<CellValue> {
        let accessor = self.columns.column(index)?.accessor?;
        Some(accessor.value(record))
    }

    pub fn header_groups(&self) -> Vec<HeaderGroup> {
        header_groups(&self.columns)
    }

    pub fn footer_groups(&self) -> Vec<HeaderGroup> {
        footer_groups(&self.columns)
    }

    /// Width of a header cell.
    pub fn header_size(&self, cell: &HeaderCell) -> u16 {
        self.state.sizing.span_size(&self.columns, cell.leaf_range())
    }

    /// Left edge of a header cell, relative to the table.
    pub fn header_start(&self, cell: &HeaderCell) -> u16 {
        self.state.sizing.start_offset(&self.columns, cell.first_leaf)
    }

    pub fn column_size(&self, index: usize) -> u16 {
        self.state.sizing.size(&self.columns, index)
    }

    pub fn total_size(&self) -> u16 {
        self.state.sizing.total_size(&self.columns)
    }

    pub fn begin_resize(&mut self, column: &ColumnId, x: u16) -> Result<(), TableError> {
        self.state.sizing.begin_resize(&self.columns, column, x)
    }

    pub fn update_resize(&mut self, x: u16) {
        self.state.sizing.update_resize(&self.columns, x);
    }

    pub fn end_resize(&mut self) -> Option<ColumnId> {
        self.state.sizing.end_resize(&self.columns)
    }

    /// Pretty JSON of the row data.
    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self.store.records())?)
    }
}
