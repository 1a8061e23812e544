//! Pretty-printed row data beside the table.

use crate::app::App;
use crate::canvas::{truncate_to_width, Buffer, Rect, TextStyle};
use crate::theme::Theme;

use super::hit::{HitMap, Target};

pub(super) fn paint(app: &App, theme: &Theme, buf: &mut Buffer, area: Rect, hits: &mut HitMap) {
    if area.is_empty() {
        return;
    }
    buf.fill(area, theme.surface);
    hits.push(area, Target::Json);

    for y in area.y..area.bottom() {
        buf.draw_str(area.x, y, "│", area.right(), theme.border, TextStyle::new());
    }

    let title = format!(
        " data · {}/{} ",
        (app.json_scroll + 1).min(app.json_lines.len()),
        app.json_lines.len()
    );
    buf.draw_str(area.x + 2, area.y, &title, area.right(), theme.muted, TextStyle::bold());

    let text_x = area.x + 2;
    let room = area.width.saturating_sub(3) as usize;
    let visible = area.height.saturating_sub(1) as usize;
    for (offset, line) in app.json_lines.iter().skip(app.json_scroll).take(visible).enumerate() {
        let y = area.y + 1 + offset as u16;
        let line = truncate_to_width(line, room);
        paint_json_line(buf, theme, text_x, y, &line, area.right());
    }
}

/// Object keys in the primary colour, everything else plain.
fn paint_json_line(buf: &mut Buffer, theme: &Theme, x: u16, y: u16, line: &str, max_x: u16) {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    let x = buf.draw_str(x, y, indent, max_x, theme.text, TextStyle::new());

    if trimmed.starts_with('"')
        && let Some(split) = trimmed.find("\": ")
    {
        let (key, rest) = trimmed.split_at(split + 1);
        let x = buf.draw_str(x, y, key, max_x, theme.primary, TextStyle::new());
        buf.draw_str(x, y, rest, max_x, theme.text, TextStyle::new());
    } else {
        buf.draw_str(x, y, trimmed, max_x, theme.text, TextStyle::new());
    }
}
