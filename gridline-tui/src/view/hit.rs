//! Hit regions recorded while painting a frame.

use gridline_lib::model::{ColumnId, RowId};

use crate::canvas::Rect;

/// Toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Regenerate,
    ResizeMode,
    ExpandAll,
    Json,
}

/// What a point on screen refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Button(Button),
    /// A sortable header label.
    Header { column: ColumnId },
    /// The right edge of a header cell.
    ResizeHandle { column: ColumnId },
    Expander(RowId),
    Checkbox(RowId),
    /// The header checkbox.
    SelectAll,
    /// Grab handle of the row at this index of the row model.
    DragHandle { row: usize },
    /// Anywhere on the row at this index of the row model.
    Row { row: usize },
    /// The JSON data pane.
    Json,
}

/// Regions in paint order. Later regions sit on top.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        if !rect.is_empty() {
            self.regions.push((rect, target));
        }
    }

    /// Topmost target at a point.
    pub fn target_at(&self, x: u16, y: u16) -> Option<&Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }

    /// Body row on screen line `y`, wherever the pointer is horizontally.
    pub fn row_on_line(&self, y: u16) -> Option<usize> {
        self.regions.iter().find_map(|(rect, target)| match target {
            Target::Row { row } if y >= rect.y && y < rect.bottom() => Some(*row),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
