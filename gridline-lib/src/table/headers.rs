//! Header and footer groups.
//!
//! The bottom header row has one cell per leaf column. Each row above is
//! derived from the one below it: a cell whose column sits at that depth
//! is replaced by its parent column, any other cell by a placeholder for
//! the same column. Neighbouring cells for the same column merge and
//! their spans add up.

use crate::model::{ColumnId, ColumnSet};

/// One cell in a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Stable id, unique within the table.
    pub id: String,
    /// Index of the column in the `ColumnSet`.
    pub column: usize,
    pub column_id: ColumnId,
    /// Row this cell belongs to, 0 at the top.
    pub depth: usize,
    /// Number of leaf columns covered.
    pub col_span: usize,
    /// Position of the first covered leaf among the leaves.
    pub first_leaf: usize,
    /// An empty cell above a shallow leaf.
    pub is_placeholder: bool,
}

impl HeaderCell {
    /// Leaf positions covered by this cell.
    pub fn leaf_range(&self) -> std::ops::Range<usize> {
        self.first_leaf..self.first_leaf + self.col_span
    }
}

/// A row of header cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    pub depth: usize,
    pub headers: Vec<HeaderCell>,
}

/// Header rows, top first.
pub fn header_groups(columns: &ColumnSet) -> Vec<HeaderGroup> {
    let Some(max_depth) = columns.max_depth() else {
        return Vec::new();
    };

    let bottom = columns
        .leaves()
        .iter()
        .enumerate()
        .map(|(position, &index)| new_cell(columns, index, max_depth, position, false))
        .collect();
    let mut groups = vec![HeaderGroup {
        depth: max_depth,
        headers: bottom,
    }];

    for depth in (0..max_depth).rev() {
        let below = &groups[groups.len() - 1].headers;
        let mut headers: Vec<HeaderCell> = Vec::new();
        for cell in below {
            let column = &columns.columns()[cell.column];
            let (index, is_placeholder) = match column.parent {
                Some(parent) if column.depth == depth + 1 => (parent, false),
                _ => (cell.column, true),
            };
            if let Some(last) = headers.last_mut()
                && last.column == index
                && last.is_placeholder == is_placeholder
            {
                last.col_span += cell.col_span;
                continue;
            }
            let mut header = new_cell(columns, index, depth, cell.first_leaf, is_placeholder);
            header.col_span = cell.col_span;
            headers.push(header);
        }
        groups.push(HeaderGroup { depth, headers });
    }

    groups.reverse();
    groups
}

/// Footer rows, top first: the header rows upside down.
pub fn footer_groups(columns: &ColumnSet) -> Vec<HeaderGroup> {
    let mut groups = header_groups(columns);
    groups.reverse();
    groups
}

fn new_cell(
    columns: &ColumnSet,
    index: usize,
    depth: usize,
    first_leaf: usize,
    is_placeholder: bool,
) -> HeaderCell {
    let column_id = columns.columns()[index].id.clone();
    let id = if is_placeholder {
        format!("{depth}_{column_id}_placeholder_{first_leaf}")
    } else {
        format!("{depth}_{column_id}_{first_leaf}")
    };
    HeaderCell {
        id,
        column: index,
        column_id,
        depth,
        col_span: 1,
        first_leaf,
        is_placeholder,
    }
}

/// Header text for a cell, `None` for placeholders.
pub fn header_label(columns: &ColumnSet, cell: &HeaderCell) -> Option<String> {
    if cell.is_placeholder {
        return None;
    }
    let column = columns.column(cell.column)?;
    Some(column.header.resolve(&column.id))
}

/// Footer text for a cell, `None` for placeholders and columns without one.
pub fn footer_label(columns: &ColumnSet, cell: &HeaderCell) -> Option<String> {
    if cell.is_placeholder {
        return None;
    }
    let column = columns.column(cell.column)?;
    column.footer.as_ref().map(|footer| footer.resolve(&column.id))
}
