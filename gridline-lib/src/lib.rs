//! Table state core for the gridline demo.
//!
//! Holds a tree of synthetic person records and the state a data table
//! needs on top of it: row order, expansion, selection, sorting, header
//! grouping and column sizing. Nothing here touches a terminal.

pub mod error;
pub mod model;
pub mod table;

pub use error::TableError;
pub use table::{Table, TableState};
