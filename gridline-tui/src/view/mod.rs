//! Paints the app into a cell buffer.
//!
//! Painting is a pure function of the app state. Each frame also records
//! where interactive things landed so pointer input can be routed.

mod hit;
mod json;
mod table;
mod toolbar;

pub use hit::{Button, HitMap, Target};

use crate::app::App;
use crate::canvas::{Buffer, Rect};
use crate::theme::Theme;

/// Rows taken by the toolbar and the gap below it.
const TOP: u16 = 2;
/// Columns left of the table.
const MARGIN: u16 = 1;
const MIN_JSON_WIDTH: u16 = 28;

/// What a frame produced besides pixels.
#[derive(Debug, Clone, Default)]
pub struct FrameInfo {
    pub hits: HitMap,
    /// Body rows that fit on screen.
    pub body_rows: usize,
}

pub fn render(app: &App, theme: &Theme, buf: &mut Buffer) -> FrameInfo {
    let area = buf.area();
    buf.fill(area, theme.background);
    let mut hits = HitMap::new();

    if area.height == 0 || area.width == 0 {
        return FrameInfo::default();
    }

    toolbar::paint(app, theme, buf, Rect::line(0, 0, area.width), &mut hits);

    let status_y = area.height - 1;
    let content_height = status_y.saturating_sub(TOP);
    let (table_area, json_area) = split(area.width, content_height, app.show_json);

    let body_rows = table::paint(app, theme, buf, table_area, &mut hits);
    if let Some(json_area) = json_area {
        json::paint(app, theme, buf, json_area, &mut hits);
    }
    toolbar::paint_status(app, theme, buf, Rect::line(0, status_y, area.width));

    FrameInfo { hits, body_rows }
}

/// Table on the left, JSON pane on the right when shown.
fn split(width: u16, height: u16, show_json: bool) -> (Rect, Option<Rect>) {
    let table_width = width.saturating_sub(MARGIN);
    if !show_json {
        return (Rect::new(MARGIN, TOP, table_width, height), None);
    }
    let json_width = (width * 2 / 5).max(MIN_JSON_WIDTH).min(width);
    let table_width = width.saturating_sub(json_width).saturating_sub(MARGIN);
    (
        Rect::new(MARGIN, TOP, table_width, height),
        Some(Rect::new(width - json_width, TOP, json_width, height)),
    )
}
