//! Error types

use crate::model::{ColumnId, RowId};

/// Errors raised by table state operations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A row index outside the top-level row sequence.
    #[error("row index {index} out of range for {len} rows")]
    RowIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of top-level rows.
        len: usize,
    },

    /// No row with this id exists at any depth.
    #[error("unknown row: {0}")]
    UnknownRow(RowId),

    /// Two records share an id.
    #[error("duplicate row id: {0}")]
    DuplicateRowId(RowId),

    /// No column with this id exists.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Two column definitions share an id.
    #[error("duplicate column id: {0}")]
    DuplicateColumnId(ColumnId),

    /// Failed to serialize the row data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
