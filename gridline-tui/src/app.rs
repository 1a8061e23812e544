//! Application state and input handling.

use std::time::{Duration, Instant};

use gridline_lib::model::{default_columns, generate, ColumnId, ColumnSet, GeneratorConfig, RowId};
use gridline_lib::table::{ColumnSizing, TableState, VisibleRow};
use gridline_lib::{Table, TableError};
use log::{debug, info, warn};

use crate::config::{AppConfig, Variant};
use crate::event::{Input, Key, Modifiers, MouseButton};
use crate::view::{Button, FrameInfo, HitMap, Target};

const STATUS_TTL: Duration = Duration::from_secs(3);
const JSON_SCROLL_STEP: usize = 3;

/// A pointer drag in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drag {
    /// A row picked up by its grab handle. Indices are into the row model.
    Row {
        source: usize,
        id: RowId,
        hover: Option<usize>,
    },
    /// A header edge being dragged.
    Resize { column: ColumnId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires: Instant,
}

pub struct App {
    pub table: Table,
    pub variant: Variant,
    generator: GeneratorConfig,
    generation: u64,
    /// Row model as of the last change.
    pub rows: Vec<VisibleRow>,
    pub cursor: usize,
    /// Leaf position of the focused column.
    pub focus_column: usize,
    /// First body row on screen.
    pub scroll: usize,
    pub show_json: bool,
    pub json_scroll: usize,
    pub json_lines: Vec<String>,
    pub drag: Option<Drag>,
    pub status: Option<StatusMessage>,
    hits: HitMap,
    body_rows: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, TableError> {
        let generator = config.generator();
        let columns = ColumnSet::new(default_columns())?;
        let state = TableState {
            sizing: ColumnSizing::new(config.resize_mode),
            ..Default::default()
        };
        let table = Table::new(columns, generate(&generator))?.with_state(state);
        info!(
            "Starting {} table with {} top-level rows",
            config.variant,
            table.records().len()
        );
        let mut app = Self {
            table,
            variant: config.variant,
            generator,
            generation: 0,
            rows: Vec::new(),
            cursor: 0,
            focus_column: 0,
            scroll: 0,
            show_json: false,
            json_scroll: 0,
            json_lines: Vec::new(),
            drag: None,
            status: None,
            hits: HitMap::new(),
            body_rows: 1,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn hits(&self) -> &HitMap {
        &self.hits
    }

    pub fn cursor_row(&self) -> Option<&VisibleRow> {
        self.rows.get(self.cursor)
    }

    /// Stores what the last frame drew, for pointer lookups and paging.
    pub fn apply_frame(&mut self, frame: FrameInfo) {
        self.hits = frame.hits;
        self.body_rows = frame.body_rows.max(1);
        self.scroll_to_cursor();
    }

    /// When the status message should disappear.
    pub fn status_deadline(&self) -> Option<Instant> {
        self.status.as_ref().map(|status| status.expires)
    }

    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|status| status.expires <= now) {
            self.status = None;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires: Instant::now() + STATUS_TTL,
        });
    }

    /// Handles one input. Table errors are logged and shown, never fatal.
    pub fn handle(&mut self, input: Input) {
        if let Err(e) = self.dispatch(input) {
            warn!("{} input failed: {}", input.name(), e);
            self.set_status(e.to_string());
        }
    }

    fn dispatch(&mut self, input: Input) -> Result<(), TableError> {
        match input {
            Input::Key { key, modifiers } => self.on_key(key, modifiers),
            Input::Press {
                x,
                y,
                button: MouseButton::Left,
            } => self.on_press(x, y),
            Input::Drag {
                x,
                y,
                button: MouseButton::Left,
            } => {
                self.on_drag(x, y);
                Ok(())
            }
            Input::Release { .. } => self.on_release(),
            Input::Scroll { x, y, delta } => {
                self.on_scroll(x, y, delta);
                Ok(())
            }
            Input::Resize { width, height } => {
                debug!("Terminal resized to {}x{}", width, height);
                Ok(())
            }
            Input::Press { .. } | Input::Drag { .. } => Ok(()),
        }
    }

    fn on_key(&mut self, key: Key, modifiers: Modifiers) -> Result<(), TableError> {
        match key {
            Key::Char('c') if modifiers.ctrl => self.should_quit = true,
            Key::Char('q') => self.should_quit = true,
            Key::Up if modifiers.shift => self.move_cursor_row(-1)?,
            Key::Down if modifiers.shift => self.move_cursor_row(1)?,
            Key::Up => self.move_cursor(-1),
            Key::Down => self.move_cursor(1),
            Key::PageUp => self.move_cursor(-(self.body_rows as isize)),
            Key::PageDown => self.move_cursor(self.body_rows as isize),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.rows.len().saturating_sub(1),
            Key::Char(' ') => self.toggle_selected()?,
            Key::Enter => self.toggle_expanded()?,
            Key::Right => self.set_expanded(true)?,
            Key::Left => self.collapse_or_parent()?,
            Key::Tab => self.cycle_focus(1),
            Key::BackTab => self.cycle_focus(-1),
            Key::Char('s') => self.sort_focused()?,
            Key::Char('e') => self.press_button(Button::ExpandAll)?,
            Key::Char('m') => self.press_button(Button::ResizeMode)?,
            Key::Char('r') => self.press_button(Button::Regenerate)?,
            Key::Char('d') => self.press_button(Button::Json)?,
            Key::Char('[') => self.json_scroll = self.json_scroll.saturating_sub(JSON_SCROLL_STEP),
            Key::Char(']') => self.scroll_json(JSON_SCROLL_STEP as isize),
            Key::Escape => self.cancel_drag(),
            _ => {}
        }
        self.scroll_to_cursor();
        Ok(())
    }

    fn on_press(&mut self, x: u16, y: u16) -> Result<(), TableError> {
        let Some(target) = self.hits.target_at(x, y).cloned() else {
            return Ok(());
        };
        debug!("Press at ({}, {}) on {:?}", x, y, target);
        match target {
            Target::Button(button) => self.press_button(button)?,
            Target::Header { column } => {
                self.focus_on(&column);
                self.toggle_sort(&column)?;
            }
            Target::ResizeHandle { column } => {
                self.table.begin_resize(&column, x)?;
                self.drag = Some(Drag::Resize { column });
            }
            Target::Expander(id) => {
                self.table.toggle_expanded(&id)?;
                self.refresh()?;
                self.cursor_to(&id);
            }
            Target::Checkbox(id) => {
                self.table.toggle_selected(&id)?;
                self.cursor_to(&id);
            }
            Target::SelectAll => {
                self.table.toggle_all_selected();
            }
            Target::DragHandle { row } => self.pick_up(row),
            Target::Row { row } => self.cursor = row.min(self.rows.len().saturating_sub(1)),
            Target::Json => {}
        }
        Ok(())
    }

    fn on_drag(&mut self, x: u16, y: u16) {
        match &mut self.drag {
            Some(Drag::Row { hover, .. }) => *hover = self.hits.row_on_line(y),
            Some(Drag::Resize { .. }) => self.table.update_resize(x),
            None => {}
        }
    }

    fn on_release(&mut self) -> Result<(), TableError> {
        match self.drag.take() {
            Some(Drag::Row { id, hover, .. }) => {
                let Some(to) = hover.and_then(|row| self.rows.get(row)).map(|row| row.top_index)
                else {
                    return Ok(());
                };
                let Some(from) = self.table.store().top_level_index(&id) else {
                    return Ok(());
                };
                if from == to || self.reorder_blocked() {
                    return Ok(());
                }
                self.table.reorder_row(from, to)?;
                info!("Dropped row {} from {} onto {}", id, from, to);
                self.refresh()?;
                self.cursor_to(&id);
            }
            Some(Drag::Resize { .. }) => {
                if let Some(column) = self.table.end_resize() {
                    let index = self.table.columns().index_of(&column);
                    let size = index.map(|i| self.table.state.sizing.header_size(self.table.columns(), i));
                    self.set_status(format!("{} is {} wide", column, size.unwrap_or_default()));
                }
            }
            None => {}
        }
        Ok(())
    }

    fn on_scroll(&mut self, x: u16, y: u16, delta: i16) {
        if matches!(self.hits.target_at(x, y), Some(Target::Json)) {
            self.scroll_json(isize::from(delta) * JSON_SCROLL_STEP as isize);
        } else {
            self.move_cursor(isize::from(delta));
            self.scroll_to_cursor();
        }
    }

    /// Runs a toolbar action.
    pub fn press_button(&mut self, button: Button) -> Result<(), TableError> {
        match button {
            Button::Regenerate => self.regenerate()?,
            Button::ResizeMode => {
                let mode = self.table.state.sizing.mode().toggled();
                self.table.state.sizing.set_mode(mode);
                self.set_status(format!("Resize mode: {}", mode));
            }
            Button::ExpandAll => {
                let all = self.table.toggle_all_expanded();
                self.refresh()?;
                self.set_status(if all { "Expanded all rows" } else { "Collapsed all rows" });
            }
            Button::Json => {
                self.show_json = !self.show_json;
                self.json_scroll = 0;
                self.refresh()?;
            }
        }
        Ok(())
    }

    fn regenerate(&mut self) -> Result<(), TableError> {
        self.generation += 1;
        let config = GeneratorConfig {
            lens: self.generator.lens.clone(),
            seed: self
                .generator
                .seed
                .map(|seed| seed.wrapping_add(self.generation)),
        };
        self.table.regenerate(generate(&config))?;
        self.drag = None;
        self.cursor = 0;
        self.scroll = 0;
        self.json_scroll = 0;
        self.refresh()?;
        self.set_status(format!("Generated {} rows", self.table.records().len()));
        Ok(())
    }

    /// Rebuilds the row model and the JSON text after a change.
    pub fn refresh(&mut self) -> Result<(), TableError> {
        let rows = self.table.row_model();
        // Row drags hold row-model indices
        if rows != self.rows && matches!(self.drag, Some(Drag::Row { .. })) {
            debug!("Row model changed, dropping the row drag");
            self.drag = None;
        }
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        if self.show_json {
            self.json_lines = self.table.to_json()?.lines().map(str::to_owned).collect();
            self.json_scroll = self.json_scroll.min(self.json_lines.len().saturating_sub(1));
        } else {
            self.json_lines.clear();
        }
        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    fn cursor_to(&mut self, id: &RowId) {
        if let Some(index) = self.rows.iter().position(|row| &row.id == id) {
            self.cursor = index;
        }
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.body_rows {
            self.scroll = self.cursor + 1 - self.body_rows;
        }
        let max_scroll = self.rows.len().saturating_sub(self.body_rows);
        self.scroll = self.scroll.min(max_scroll);
    }

    fn scroll_json(&mut self, delta: isize) {
        let last = self.json_lines.len().saturating_sub(1);
        self.json_scroll = self.json_scroll.saturating_add_signed(delta).min(last);
    }

    /// Reordering follows store order, which a sort hides.
    fn reorder_blocked(&mut self) -> bool {
        if self.table.state.sorting.current().is_some() {
            self.set_status("Clear the sort to reorder rows");
            true
        } else {
            false
        }
    }

    /// Moves the cursor's top-level row one place up or down.
    fn move_cursor_row(&mut self, delta: isize) -> Result<(), TableError> {
        let Some(row) = self.cursor_row() else {
            return Ok(());
        };
        if !row.is_top_level() {
            self.set_status("Only top-level rows can be moved");
            return Ok(());
        }
        let (id, source) = (row.id.clone(), row.top_index);
        let Some(target) = source.checked_add_signed(delta) else {
            return Ok(());
        };
        if target >= self.table.records().len() || self.reorder_blocked() {
            return Ok(());
        }
        self.table.reorder_row(source, target)?;
        self.refresh()?;
        self.cursor_to(&id);
        Ok(())
    }

    fn pick_up(&mut self, row: usize) {
        if self.reorder_blocked() {
            return;
        }
        let Some(visible) = self.rows.get(row) else {
            return;
        };
        if !visible.is_top_level() {
            return;
        }
        debug!("Picked up row {} at {}", visible.id, row);
        self.drag = Some(Drag::Row {
            source: row,
            id: visible.id.clone(),
            hover: Some(row),
        });
        self.cursor = row;
    }

    fn cancel_drag(&mut self) {
        if let Some(Drag::Resize { .. }) = self.drag
            && let Some(start) = self.table.state.sizing.resize_info().map(|info| info.start_offset)
        {
            // A zero delta puts the starting widths back
            self.table.update_resize(start);
            self.table.end_resize();
        }
        self.drag = None;
    }

    fn toggle_selected(&mut self) -> Result<(), TableError> {
        if let Some(id) = self.cursor_row().map(|row| row.id.clone()) {
            self.table.toggle_selected(&id)?;
        }
        Ok(())
    }

    fn toggle_expanded(&mut self) -> Result<(), TableError> {
        let Some(row) = self.cursor_row() else {
            return Ok(());
        };
        if !row.has_children {
            return Ok(());
        }
        let id = row.id.clone();
        self.table.toggle_expanded(&id)?;
        self.refresh()?;
        self.cursor_to(&id);
        Ok(())
    }

    fn set_expanded(&mut self, expanded: bool) -> Result<(), TableError> {
        let Some(row) = self.cursor_row() else {
            return Ok(());
        };
        if !row.has_children || row.expanded == expanded {
            return Ok(());
        }
        let id = row.id.clone();
        self.table.set_expanded(&id, expanded)?;
        self.refresh()?;
        self.cursor_to(&id);
        Ok(())
    }

    /// Left collapses an open row, or jumps to the parent of any other.
    fn collapse_or_parent(&mut self) -> Result<(), TableError> {
        let Some(row) = self.cursor_row() else {
            return Ok(());
        };
        if row.expanded {
            return self.set_expanded(false);
        }
        let parent_path = &row.path[..row.path.len().saturating_sub(1)];
        if parent_path.is_empty() {
            return Ok(());
        }
        if let Some(index) = self.rows.iter().position(|r| r.path == parent_path) {
            self.cursor = index;
        }
        Ok(())
    }

    fn cycle_focus(&mut self, delta: isize) {
        let count = self.table.columns().leaves().len();
        if count == 0 {
            return;
        }
        let next = (self.focus_column as isize + delta).rem_euclid(count as isize);
        self.focus_column = next as usize;
    }

    fn focus_on(&mut self, column: &ColumnId) {
        let columns = self.table.columns();
        if let Some(position) = columns
            .index_of(column)
            .and_then(|index| columns.leaf_position(index))
        {
            self.focus_column = position;
        }
    }

    fn sort_focused(&mut self) -> Result<(), TableError> {
        let columns = self.table.columns();
        let Some(column) = columns
            .leaves()
            .get(self.focus_column)
            .and_then(|&index| columns.column(index))
            .map(|column| column.id.clone())
        else {
            return Ok(());
        };
        self.toggle_sort(&column)
    }

    fn toggle_sort(&mut self, column: &ColumnId) -> Result<(), TableError> {
        let sort = self.table.toggle_sort(column)?;
        let cursor_id = self.cursor_row().map(|row| row.id.clone());
        self.refresh()?;
        if let Some(id) = cursor_id {
            self.cursor_to(&id);
        }
        match sort {
            Some(sort) => self.set_status(format!("Sorted by {} {}", sort.column, sort.direction)),
            None => self.set_status("Sort cleared"),
        }
        Ok(())
    }
}
