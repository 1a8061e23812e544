//! Column widths and interactive resizing.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::model::{ColumnId, ColumnSet};

/// When a drag on a resize handle changes the column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnResizeMode {
    /// Width follows the pointer during the drag.
    #[default]
    OnChange,
    /// Width changes on release; `delta_offset` tracks the drag meanwhile.
    OnEnd,
}

impl ColumnResizeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::OnChange => Self::OnEnd,
            Self::OnEnd => Self::OnChange,
        }
    }
}

impl fmt::Display for ColumnResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnChange => f.write_str("onChange"),
            Self::OnEnd => f.write_str("onEnd"),
        }
    }
}

/// An in-progress resize drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeInfo {
    /// Column whose handle is being dragged (may be a group).
    pub column: ColumnId,
    /// Pointer x at the start of the drag.
    pub start_offset: u16,
    /// Width of the dragged header at the start.
    pub start_size: u16,
    /// Pointer travel since the start.
    pub delta_offset: i32,
    /// Leaf widths at the start, for proportional distribution.
    pub leaf_start_sizes: Vec<(usize, u16)>,
}

/// Per-column width overrides plus resize drag state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSizing {
    sizes: HashMap<ColumnId, u16>,
    mode: ColumnResizeMode,
    resizing: Option<ResizeInfo>,
}

impl ColumnSizing {
    pub fn new(mode: ColumnResizeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ColumnResizeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColumnResizeMode) {
        if self.mode != mode {
            debug!("Column resize mode: {}", mode);
        }
        self.mode = mode;
    }

    /// Width of a leaf column, clamped to its bounds.
    pub fn size(&self, columns: &ColumnSet, index: usize) -> u16 {
        let Some(column) = columns.column(index) else {
            return 0;
        };
        let size = self.sizes.get(&column.id).copied().unwrap_or(column.size);
        column.clamp_size(size)
    }

    /// Width of any column: the sum of its leaves.
    pub fn header_size(&self, columns: &ColumnSet, index: usize) -> u16 {
        columns
            .leaves_of(index)
            .into_iter()
            .map(|leaf| self.size(columns, leaf))
            .sum()
    }

    /// Width of a span of leaves, by leaf position.
    pub fn span_size(&self, columns: &ColumnSet, leaves: std::ops::Range<usize>) -> u16 {
        columns.leaves()[leaves]
            .iter()
            .map(|&leaf| self.size(columns, leaf))
            .sum()
    }

    /// Sum of all leaf widths.
    pub fn total_size(&self, columns: &ColumnSet) -> u16 {
        self.span_size(columns, 0..columns.leaves().len())
    }

    /// Left edge of the leaf at `position`, relative to the table.
    pub fn start_offset(&self, columns: &ColumnSet, position: usize) -> u16 {
        self.span_size(columns, 0..position.min(columns.leaves().len()))
    }

    pub fn resize_info(&self) -> Option<&ResizeInfo> {
        self.resizing.as_ref()
    }

    pub fn is_resizing(&self, column: &ColumnId) -> bool {
        self.resizing
            .as_ref()
            .is_some_and(|info| &info.column == column)
    }

    /// Starts dragging the resize handle of `column` at pointer `x`.
    pub fn begin_resize(
        &mut self,
        columns: &ColumnSet,
        column: &ColumnId,
        x: u16,
    ) -> Result<(), TableError> {
        let index = columns
            .index_of(column)
            .ok_or_else(|| TableError::UnknownColumn(column.clone()))?;
        let leaf_start_sizes: Vec<(usize, u16)> = columns
            .leaves_of(index)
            .into_iter()
            .map(|leaf| (leaf, self.size(columns, leaf)))
            .collect();
        let start_size: u16 = leaf_start_sizes.iter().map(|(_, size)| size).sum();
        debug!("Begin resize of {} at x={} (size {})", column, x, start_size);
        self.resizing = Some(ResizeInfo {
            column: column.clone(),
            start_offset: x,
            start_size,
            delta_offset: 0,
            leaf_start_sizes,
        });
        Ok(())
    }

    /// Moves the drag to pointer `x`. Applies immediately in `OnChange`.
    pub fn update_resize(&mut self, columns: &ColumnSet, x: u16) {
        let Some(info) = self.resizing.as_mut() else {
            return;
        };
        info.delta_offset = i32::from(x) - i32::from(info.start_offset);
        if self.mode == ColumnResizeMode::OnChange {
            self.apply(columns);
        }
    }

    /// Ends the drag, applying the final width. Returns the column.
    pub fn end_resize(&mut self, columns: &ColumnSet) -> Option<ColumnId> {
        self.apply(columns);
        let info = self.resizing.take()?;
        debug!("End resize of {} (delta {})", info.column, info.delta_offset);
        Some(info.column)
    }

    /// Spreads the drag delta over the dragged leaves in proportion to
    /// their starting widths.
    fn apply(&mut self, columns: &ColumnSet) {
        let Some(info) = self.resizing.as_ref() else {
            return;
        };
        if info.start_size == 0 {
            return;
        }
        let ratio = f64::from(info.delta_offset) / f64::from(info.start_size);
        for &(leaf, start) in &info.leaf_start_sizes {
            let Some(column) = columns.column(leaf) else {
                continue;
            };
            let start = f64::from(start);
            let size = (start + start * ratio).round().clamp(0.0, f64::from(u16::MAX)) as u16;
            self.sizes.insert(column.id.clone(), column.clamp_size(size));
        }
    }

    /// Drops all width overrides.
    pub fn reset(&mut self) {
        self.sizes.clear();
        self.resizing = None;
    }
}
