//! Toolbar buttons and the status line.

use crate::app::App;
use crate::canvas::{display_width, truncate_to_width, Buffer, Rect, TextStyle};
use crate::config::Variant;
use crate::theme::Theme;

use super::hit::{Button, HitMap, Target};

const HELP: &str = "↑↓ move  ⇧↑↓ reorder  space select  enter expand  tab/s sort  m mode  r regen  d data  q quit";

pub(super) fn paint(app: &App, theme: &Theme, buf: &mut Buffer, area: Rect, hits: &mut HitMap) {
    buf.fill(area, theme.surface);
    let max_x = area.right();
    let mut x = area.x + 1;
    x = buf.draw_str(x, area.y, "gridline", max_x, theme.primary, TextStyle::bold());
    x = buf.draw_str(
        x,
        area.y,
        &format!(" · {}  ", app.variant),
        max_x,
        theme.muted,
        TextStyle::new(),
    );

    let mode = format!("Resize: {}", app.table.state.sizing.mode());
    let mut buttons = vec![(Button::Regenerate, "Regenerate".to_string()), (Button::ResizeMode, mode)];
    if app.variant == Variant::Expanding {
        let label = if app.table.state.expansion.is_all_expanded() {
            "Collapse all"
        } else {
            "Expand all"
        };
        buttons.push((Button::ExpandAll, label.to_string()));
    }
    let json = if app.show_json { "Hide data" } else { "Show data" };
    buttons.push((Button::Json, json.to_string()));

    for (button, label) in buttons {
        x = paint_button(buf, theme, x, area.y, &label, max_x, button, hits) + 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_button(
    buf: &mut Buffer,
    theme: &Theme,
    x: u16,
    y: u16,
    label: &str,
    max_x: u16,
    button: Button,
    hits: &mut HitMap,
) -> u16 {
    let text = format!(" {} ", label);
    let width = display_width(&text) as u16;
    if x.saturating_add(width) > max_x {
        return max_x;
    }
    let rect = Rect::line(x, y, width);
    buf.fill(rect, theme.border);
    buf.draw_str(x, y, &text, max_x, theme.text, TextStyle::new());
    hits.push(rect, Target::Button(button));
    rect.right()
}

/// Status message (or key help) on the left, counts on the right.
pub(super) fn paint_status(app: &App, theme: &Theme, buf: &mut Buffer, area: Rect) {
    buf.fill(area, theme.surface);

    let mut summary = format!("{} rows", app.table.records().len());
    if app.variant == Variant::Expanding {
        summary.push_str(&format!(
            " · {} selected",
            app.table.state.selection.selected_count()
        ));
    }
    if let Some(sort) = app.table.state.sorting.current() {
        summary.push_str(&format!(" · {} {}", sort.column, sort.direction.arrow()));
    }
    let summary_width = display_width(&summary) as u16;
    let summary_x = area.right().saturating_sub(summary_width + 1);

    let (text, fg) = match &app.status {
        Some(status) => (status.text.as_str(), theme.accent),
        None => (HELP, theme.muted),
    };
    let room = summary_x.saturating_sub(area.x + 2) as usize;
    buf.draw_str(
        area.x + 1,
        area.y,
        &truncate_to_width(text, room),
        summary_x,
        fg,
        TextStyle::new(),
    );
    buf.draw_str(summary_x, area.y, &summary, area.right(), theme.text, TextStyle::new());
}
