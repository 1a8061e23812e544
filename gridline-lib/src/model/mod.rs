//! Data model: records, the synthetic generator and column definitions.

mod column;
mod generate;
mod record;

pub use column::{
    default_columns, Accessor, CellValue, Column, ColumnDef, ColumnId, ColumnSet, Field, Header,
    DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_SIZE,
};
pub use generate::{generate, GeneratorConfig};
pub use record::{walk, Record, RowId, Status, Walk};
