//! Cell canvas the table is painted onto before it is flushed.

mod buffer;
mod cell;
mod rect;
mod text;

pub use buffer::Buffer;
pub use cell::{Cell, Rgb, TextStyle};
pub use rect::Rect;
pub use text::{char_width, display_width, truncate_to_width};
