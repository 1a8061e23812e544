//! Header groups, body rows and footer groups.

use gridline_lib::model::ColumnSet;
use gridline_lib::table::{footer_label, header_label, CheckState, ColumnResizeMode, HeaderGroup};
use gridline_lib::Table;

use crate::app::{App, Drag};
use crate::canvas::{truncate_to_width, Buffer, Rect, Rgb, TextStyle};
use crate::config::Variant;
use crate::theme::Theme;

use super::hit::{HitMap, Target};

/// Width of the handle/checkbox column left of the data columns.
pub const CHROME_WIDTH: u16 = 4;

const HANDLE: &str = "≡";
const EDGE: &str = "│";
const GHOST: char = '┆';
const COLLAPSED: &str = "▸ ";
const EXPANDED: &str = "▾ ";
const INDENT: u16 = 2;

fn check_box(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

/// A one-row rect clipped at `max_x`.
fn clipped(x: u16, y: u16, width: u16, max_x: u16) -> Rect {
    Rect::line(x, y, width.min(max_x.saturating_sub(x)))
}

/// Paints the table into `area`. Returns how many body rows fit.
pub(super) fn paint(
    app: &App,
    theme: &Theme,
    buf: &mut Buffer,
    area: Rect,
    hits: &mut HitMap,
) -> usize {
    if area.is_empty() {
        return 0;
    }
    let table = &app.table;
    let headers = table.header_groups();
    let footers = table.footer_groups();
    let fixed = (headers.len() + footers.len()) as u16;
    let body_rows = area.height.saturating_sub(fixed) as usize;

    let max_x = area.right();
    let origin = area.x + CHROME_WIDTH;
    let width = (CHROME_WIDTH + table.total_size()).min(area.width);
    let mut y = area.y;

    for (depth, group) in headers.iter().enumerate() {
        if y >= area.bottom() {
            return 0;
        }
        buf.fill(clipped(area.x, y, CHROME_WIDTH, max_x), theme.surface);
        let is_bottom = depth + 1 == headers.len();
        if is_bottom && app.variant == Variant::Expanding {
            let state = table.all_check_state();
            paint_check_box(buf, theme, area.x, y, state, max_x);
            hits.push(clipped(area.x, y, 3, max_x), Target::SelectAll);
        }
        paint_header_row(app, theme, buf, group, origin, y, max_x, hits);
        y += 1;
    }

    let header_bottom = y;
    let shown: Vec<usize> = (app.scroll..app.rows.len()).take(body_rows).collect();
    for &index in &shown {
        paint_body_row(app, theme, buf, index, area.x, y, width, max_x, hits);
        y += 1;
    }

    for group in &footers {
        if y >= area.bottom() {
            break;
        }
        buf.fill(clipped(area.x, y, CHROME_WIDTH, max_x), theme.surface);
        paint_footer_row(table, theme, buf, group, origin, y, max_x);
        y += 1;
    }

    paint_resize_ghost(table, theme, buf, origin, area.y, y, max_x);

    if shown.is_empty() && body_rows > 0 {
        buf.draw_str(
            origin + 1,
            header_bottom,
            "no rows",
            max_x,
            theme.muted,
            TextStyle::new(),
        );
    }

    body_rows
}

fn paint_check_box(buf: &mut Buffer, theme: &Theme, x: u16, y: u16, state: CheckState, max_x: u16) {
    let fg = match state {
        CheckState::Unchecked => theme.muted,
        _ => theme.selected,
    };
    buf.draw_str(x, y, check_box(state), max_x, fg, TextStyle::new());
}

#[allow(clippy::too_many_arguments)]
fn paint_header_row(
    app: &App,
    theme: &Theme,
    buf: &mut Buffer,
    group: &HeaderGroup,
    origin: u16,
    y: u16,
    max_x: u16,
    hits: &mut HitMap,
) {
    let table = &app.table;
    let columns = table.columns();
    let sizing = &table.state.sizing;
    let focused = columns.leaves().get(app.focus_column).copied();

    for cell in &group.headers {
        let size = table.header_size(cell);
        if size == 0 {
            continue;
        }
        let x = origin + table.header_start(cell);
        if x >= max_x {
            break;
        }
        buf.fill(clipped(x, y, size, max_x), theme.surface);

        let Some(column) = columns.column(cell.column) else {
            continue;
        };
        let edge = x + size - 1;
        if let Some(label) = header_label(columns, cell) {
            let mut text = label;
            if let Some(direction) = table.state.sorting.direction_for(&column.id) {
                text.push(' ');
                text.push(direction.arrow());
            }
            let mut style = TextStyle::bold();
            style.underline = focused == Some(cell.column);
            let room = size.saturating_sub(2) as usize;
            buf.draw_str(x + 1, y, &truncate_to_width(&text, room), edge, theme.text, style);
            if column.is_leaf() && column.sortable {
                hits.push(
                    clipped(x, y, size.saturating_sub(1), max_x),
                    Target::Header {
                        column: column.id.clone(),
                    },
                );
            }
        }

        let edge_fg = if sizing.is_resizing(&column.id) {
            theme.accent
        } else {
            theme.border
        };
        buf.draw_str(edge, y, EDGE, max_x, edge_fg, TextStyle::new());
        if !cell.is_placeholder {
            hits.push(
                clipped(edge, y, 1, max_x),
                Target::ResizeHandle {
                    column: column.id.clone(),
                },
            );
        }
    }
}

fn row_background(app: &App, theme: &Theme, index: usize) -> Rgb {
    if let Some(Drag::Row {
        source,
        hover: Some(hover),
        ..
    }) = &app.drag
        && *hover == index
        && *source != index
    {
        return theme.drop_target;
    }
    if index == app.cursor {
        theme.cursor
    } else if index % 2 == 1 {
        theme.stripe
    } else {
        theme.background
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_body_row(
    app: &App,
    theme: &Theme,
    buf: &mut Buffer,
    index: usize,
    x: u16,
    y: u16,
    width: u16,
    max_x: u16,
    hits: &mut HitMap,
) {
    let table = &app.table;
    let Some(row) = app.rows.get(index) else {
        return;
    };
    let Some(record) = table.record(row) else {
        return;
    };
    let line = clipped(x, y, width, max_x);
    buf.fill(line, row_background(app, theme, index));
    hits.push(line, Target::Row { row: index });

    match app.variant {
        Variant::Reorder => {
            if row.is_top_level() {
                buf.draw_str(x + 1, y, HANDLE, max_x, theme.muted, TextStyle::new());
                hits.push(
                    clipped(x, y, CHROME_WIDTH - 1, max_x),
                    Target::DragHandle { row: index },
                );
            }
        }
        Variant::Expanding => {
            let state = table.check_state(&row.id).unwrap_or(CheckState::Unchecked);
            paint_check_box(buf, theme, x, y, state, max_x);
            hits.push(clipped(x, y, 3, max_x), Target::Checkbox(row.id.clone()));
        }
    }

    let columns = table.columns();
    let origin = x + CHROME_WIDTH;
    for (position, &column) in columns.leaves().iter().enumerate() {
        let start = origin + table.state.sizing.start_offset(columns, position);
        if start >= max_x {
            break;
        }
        let end = (start + table.column_size(column)).saturating_sub(1).min(max_x);
        let mut cx = start + 1;

        if position == 0 {
            cx += INDENT * row.depth as u16;
            if row.has_children {
                let glyph = if row.expanded { EXPANDED } else { COLLAPSED };
                buf.draw_str(cx, y, glyph, end, theme.primary, TextStyle::new());
                hits.push(clipped(cx, y, 2, end), Target::Expander(row.id.clone()));
                cx += 2;
            }
        }

        if let Some(value) = table.cell_value(record, column) {
            let room = end.saturating_sub(cx) as usize;
            buf.draw_str(cx, y, &truncate_to_width(&value.to_string(), room), end, theme.text, TextStyle::new());
        }
    }

    if let Some(Drag::Row { source, .. }) = &app.drag
        && *source == index
    {
        let muted = theme.muted;
        buf.restyle(line, |cell| {
            cell.fg = muted;
            cell.style.dim = true;
        });
    }
}

fn paint_footer_row(
    table: &Table,
    theme: &Theme,
    buf: &mut Buffer,
    group: &HeaderGroup,
    origin: u16,
    y: u16,
    max_x: u16,
) {
    let columns = table.columns();
    for cell in &group.headers {
        let size = table.header_size(cell);
        if size == 0 {
            continue;
        }
        let x = origin + table.header_start(cell);
        if x >= max_x {
            break;
        }
        buf.fill(clipped(x, y, size, max_x), theme.surface);
        let edge = x + size - 1;
        if let Some(label) = footer_label(columns, cell) {
            let room = size.saturating_sub(2) as usize;
            buf.draw_str(x + 1, y, &truncate_to_width(&label, room), edge, theme.muted, TextStyle::new());
        }
        buf.draw_str(edge, y, EDGE, max_x, theme.border, TextStyle::new());
    }
}

/// Right edge of a column while an `OnEnd` resize is pending.
fn ghost_edge(table: &Table, columns: &ColumnSet, origin: u16) -> Option<u16> {
    let sizing = &table.state.sizing;
    if sizing.mode() != ColumnResizeMode::OnEnd {
        return None;
    }
    let info = sizing.resize_info()?;
    let index = columns.index_of(&info.column)?;
    let first_leaf = *columns.leaves_of(index).first()?;
    let position = columns.leaf_position(first_leaf)?;
    let start = i32::from(origin + sizing.start_offset(columns, position));
    let edge = start + i32::from(info.start_size) - 1 + info.delta_offset;
    u16::try_from(edge.max(start)).ok()
}

fn paint_resize_ghost(
    table: &Table,
    theme: &Theme,
    buf: &mut Buffer,
    origin: u16,
    top: u16,
    bottom: u16,
    max_x: u16,
) {
    let Some(x) = ghost_edge(table, table.columns(), origin) else {
        return;
    };
    if x >= max_x {
        return;
    }
    let accent = theme.accent;
    buf.restyle(Rect::new(x, top, 1, bottom.saturating_sub(top)), |cell| {
        cell.char = GHOST;
        cell.fg = accent;
        cell.wide_continuation = false;
    });
}
