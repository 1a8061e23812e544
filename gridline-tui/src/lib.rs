//! Terminal front-end for the gridline table.

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event;
pub mod paths;
pub mod runtime;
pub mod terminal;
pub mod theme;
pub mod view;

pub use app::App;
pub use config::{AppConfig, Variant};
pub use error::AppError;
