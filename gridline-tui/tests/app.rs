use gridline_lib::model::ColumnId;
use gridline_lib::table::{CheckState, ColumnResizeMode, SortDirection};
use gridline_tui::canvas::Buffer;
use gridline_tui::event::{Input, Key, Modifiers, MouseButton};
use gridline_tui::theme::Theme;
use gridline_tui::{view, App, AppConfig, Variant};

fn config(variant: Variant) -> AppConfig {
    AppConfig {
        variant,
        seed: Some(7),
        ..Default::default()
    }
}

/// Renders one 120x40 frame so pointer input has hit regions to land on.
fn frame(app: &mut App) -> Buffer {
    let mut buf = Buffer::new(120, 40);
    let info = view::render(app, &Theme::default(), &mut buf);
    app.apply_frame(info);
    buf
}

fn press(app: &mut App, x: u16, y: u16) {
    app.handle(Input::Press {
        x,
        y,
        button: MouseButton::Left,
    });
}

fn drag(app: &mut App, x: u16, y: u16) {
    app.handle(Input::Drag {
        x,
        y,
        button: MouseButton::Left,
    });
}

fn release(app: &mut App, x: u16, y: u16) {
    app.handle(Input::Release {
        x,
        y,
        button: MouseButton::Left,
    });
}

fn shift(key: Key) -> Input {
    Input::Key {
        key,
        modifiers: Modifiers::shift(),
    }
}

#[test]
fn test_cursor_keys() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    assert_eq!(app.cursor, 0);
    app.handle(Input::key(Key::Down));
    app.handle(Input::key(Key::Down));
    assert_eq!(app.cursor, 2);
    app.handle(Input::key(Key::Up));
    assert_eq!(app.cursor, 1);
    app.handle(Input::key(Key::End));
    assert_eq!(app.cursor, 19);
    app.handle(Input::key(Key::Down));
    assert_eq!(app.cursor, 19);
    app.handle(Input::key(Key::Home));
    assert_eq!(app.cursor, 0);
    app.handle(Input::key(Key::Up));
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_shift_down_moves_row_and_cursor() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    let first = app.table.records()[0].id.clone();
    let second = app.table.records()[1].id.clone();

    app.handle(shift(Key::Down));

    assert_eq!(app.table.records()[0].id, second);
    assert_eq!(app.table.records()[1].id, first);
    assert_eq!(app.cursor, 1);
    assert_eq!(app.rows[1].id, first);
}

#[test]
fn test_shift_up_at_top_is_ignored() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    let before: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();
    app.handle(shift(Key::Up));
    let after: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(app.table.store().revision(), 0);
}

#[test]
fn test_drag_handle_reorders_rows() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    let ids: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();

    // Handle of row 0 sits at x=2 on the first body line (y=5)
    press(&mut app, 2, 5);
    assert!(app.drag.is_some());
    drag(&mut app, 40, 8);
    release(&mut app, 40, 8);

    let after: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();
    let mut expected = ids.clone();
    let moved = expected.remove(0);
    expected.insert(3, moved);
    assert_eq!(after, expected);
    assert_eq!(app.cursor, 3);
    assert!(app.drag.is_none());
}

#[test]
fn test_drop_on_source_is_noop() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    press(&mut app, 2, 6);
    drag(&mut app, 30, 6);
    release(&mut app, 30, 6);
    assert_eq!(app.table.store().revision(), 0);
}

#[test]
fn test_drop_outside_rows_is_noop() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    press(&mut app, 2, 5);
    drag(&mut app, 30, 0);
    release(&mut app, 30, 0);
    assert_eq!(app.table.store().revision(), 0);
}

#[test]
fn test_sorting_blocks_reorder() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    app.handle(Input::key(Key::Char('s')));
    assert!(app.table.state.sorting.current().is_some());

    app.handle(Input::key(Key::Home));
    app.handle(shift(Key::Down));
    assert_eq!(app.table.store().revision(), 0);
    assert!(app.status.as_ref().unwrap().text.contains("Clear the sort"));
}

#[test]
fn test_sorting_mid_drag_drops_the_row() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    press(&mut app, 2, 5);
    assert!(app.drag.is_some());

    app.handle(Input::key(Key::Char('s')));
    assert!(app.table.state.sorting.current().is_some());
    assert!(app.drag.is_none());

    drag(&mut app, 40, 8);
    release(&mut app, 40, 8);
    assert_eq!(app.table.store().revision(), 0);
}

#[test]
fn test_expanding_mid_drag_drops_the_row() {
    let mut app = App::new(&AppConfig {
        lens: Some(vec![6, 2]),
        ..config(Variant::Reorder)
    })
    .unwrap();
    frame(&mut app);
    let before: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();

    // Third top-level row, picked up by its handle
    press(&mut app, 2, 7);
    assert!(app.drag.is_some());
    app.handle(Input::key(Key::Char('e')));
    assert!(app.drag.is_none());

    frame(&mut app);
    drag(&mut app, 40, 5);
    release(&mut app, 40, 5);
    let after: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(app.table.store().revision(), 0);
}

#[test]
fn test_drop_resolves_source_by_id() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    let ids: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();

    press(&mut app, 2, 5);
    // Toggling the data pane rebuilds the row model without changing it
    app.handle(Input::key(Key::Char('d')));
    assert!(app.drag.is_some());
    frame(&mut app);
    drag(&mut app, 10, 7);
    release(&mut app, 10, 7);

    let after: Vec<_> = app.table.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(after[2], ids[0]);
    assert_eq!(app.cursor, 2);
}

#[test]
fn test_header_click_cycles_sort() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    let first_name = ColumnId::new("firstName");

    press(&mut app, 6, 4);
    assert_eq!(
        app.table.state.sorting.direction_for(&first_name),
        Some(SortDirection::Asc)
    );
    let names: Vec<_> = app
        .rows
        .iter()
        .map(|row| app.table.record(row).unwrap().first_name.clone())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    press(&mut app, 6, 4);
    assert_eq!(
        app.table.state.sorting.direction_for(&first_name),
        Some(SortDirection::Desc)
    );
    press(&mut app, 6, 4);
    assert!(app.table.state.sorting.current().is_none());
}

#[test]
fn test_tab_moves_sort_focus() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    app.handle(Input::key(Key::Tab));
    app.handle(Input::key(Key::Tab));
    assert_eq!(app.focus_column, 2);
    app.handle(Input::key(Key::Char('s')));
    assert_eq!(
        app.table.state.sorting.direction_for(&ColumnId::new("age")),
        Some(SortDirection::Asc)
    );
    app.handle(Input::key(Key::BackTab));
    app.handle(Input::key(Key::BackTab));
    app.handle(Input::key(Key::BackTab));
    assert_eq!(app.focus_column, 5);
}

#[test]
fn test_resize_handle_drag_on_change() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    let columns = app.table.columns();
    let first_name = columns.index_of(&ColumnId::new("firstName")).unwrap();

    // Right edge of firstName: 5 + 16 - 1
    press(&mut app, 20, 4);
    drag(&mut app, 25, 4);
    assert_eq!(app.table.column_size(first_name), 21);
    release(&mut app, 25, 4);
    assert_eq!(app.table.column_size(first_name), 21);
    assert!(app.table.state.sizing.resize_info().is_none());
}

#[test]
fn test_resize_on_end_applies_on_release() {
    let mut app = App::new(&AppConfig {
        resize_mode: ColumnResizeMode::OnEnd,
        ..config(Variant::Reorder)
    })
    .unwrap();
    frame(&mut app);
    let first_name = app
        .table
        .columns()
        .index_of(&ColumnId::new("firstName"))
        .unwrap();

    press(&mut app, 20, 4);
    drag(&mut app, 24, 4);
    assert_eq!(app.table.column_size(first_name), 16);
    release(&mut app, 24, 4);
    assert_eq!(app.table.column_size(first_name), 20);
}

#[test]
fn test_escape_cancels_resize() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    frame(&mut app);
    let first_name = app
        .table
        .columns()
        .index_of(&ColumnId::new("firstName"))
        .unwrap();
    press(&mut app, 20, 4);
    drag(&mut app, 30, 4);
    app.handle(Input::key(Key::Escape));
    assert_eq!(app.table.column_size(first_name), 16);
    assert!(app.drag.is_none());
}

#[test]
fn test_mode_key_toggles_resize_mode() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    assert_eq!(app.table.state.sizing.mode(), ColumnResizeMode::OnChange);
    app.handle(Input::key(Key::Char('m')));
    assert_eq!(app.table.state.sizing.mode(), ColumnResizeMode::OnEnd);
    app.handle(Input::key(Key::Char('m')));
    assert_eq!(app.table.state.sizing.mode(), ColumnResizeMode::OnChange);
}

#[test]
fn test_expanding_keys() {
    let mut app = App::new(&config(Variant::Expanding)).unwrap();
    assert_eq!(app.rows.len(), 10);

    app.handle(Input::key(Key::Enter));
    assert_eq!(app.rows.len(), 13);
    assert!(app.rows[0].expanded);

    app.handle(Input::key(Key::Down));
    assert_eq!(app.rows[app.cursor].depth, 1);
    app.handle(Input::key(Key::Left));
    assert_eq!(app.cursor, 0);
    app.handle(Input::key(Key::Left));
    assert_eq!(app.rows.len(), 10);
    app.handle(Input::key(Key::Right));
    assert_eq!(app.rows.len(), 13);
}

#[test]
fn test_expand_all_key() {
    let mut app = App::new(&config(Variant::Expanding)).unwrap();
    app.handle(Input::key(Key::Char('e')));
    assert_eq!(app.rows.len(), 10 + 30 + 60);
    app.handle(Input::key(Key::Char('e')));
    assert_eq!(app.rows.len(), 10);
}

#[test]
fn test_space_selects_subtree() {
    let mut app = App::new(&config(Variant::Expanding)).unwrap();
    app.handle(Input::key(Key::Char(' ')));
    let id = app.rows[0].id.clone();
    assert_eq!(app.table.check_state(&id), Some(CheckState::Checked));
    assert_eq!(app.table.state.selection.selected_count(), 1 + 3 + 6);
    assert_eq!(app.table.all_check_state(), CheckState::Indeterminate);

    app.handle(Input::key(Key::Char(' ')));
    assert_eq!(app.table.check_state(&id), Some(CheckState::Unchecked));
}

#[test]
fn test_checkbox_expander_and_select_all_clicks() {
    let mut app = App::new(&config(Variant::Expanding)).unwrap();
    frame(&mut app);
    let id = app.rows[1].id.clone();

    press(&mut app, 1, 6);
    assert_eq!(app.table.check_state(&id), Some(CheckState::Checked));
    assert_eq!(app.cursor, 1);

    press(&mut app, 6, 5);
    assert!(app.rows[0].expanded);
    assert_eq!(app.rows.len(), 13);

    frame(&mut app);
    press(&mut app, 1, 4);
    assert_eq!(app.table.all_check_state(), CheckState::Checked);
    press(&mut app, 1, 4);
    assert_eq!(app.table.all_check_state(), CheckState::Unchecked);
}

#[test]
fn test_regenerate_replaces_data_and_clears_selection() {
    let mut app = App::new(&config(Variant::Expanding)).unwrap();
    app.handle(Input::key(Key::Char(' ')));
    app.handle(Input::key(Key::Char('e')));
    let old = app.table.records()[0].id.clone();

    app.handle(Input::key(Key::Char('r')));

    assert_ne!(app.table.records()[0].id, old);
    assert_eq!(app.table.records().len(), 10);
    assert_eq!(app.table.state.selection.selected_count(), 0);
    assert_eq!(app.rows.len(), 10);
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_toolbar_buttons() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    let buf = frame(&mut app);
    let toolbar = buf.row_text(0);
    let x = toolbar.chars().position(|c| c == 'R').unwrap() as u16;
    let old = app.table.records()[0].id.clone();
    press(&mut app, x + 1, 0);
    assert_ne!(app.table.records()[0].id, old);
}

#[test]
fn test_json_pane_toggle_and_scroll() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    assert!(app.json_lines.is_empty());
    app.handle(Input::key(Key::Char('d')));
    assert!(app.show_json);
    assert_eq!(app.json_lines.first().map(String::as_str), Some("["));

    app.handle(Input::key(Key::Char(']')));
    assert_eq!(app.json_scroll, 3);
    app.handle(Input::key(Key::Char('[')));
    app.handle(Input::key(Key::Char('[')));
    assert_eq!(app.json_scroll, 0);

    app.handle(shift(Key::Down));
    let second = app.table.records()[0].id.to_string();
    assert!(app.json_lines[2].contains(&second));

    app.handle(Input::key(Key::Char('d')));
    assert!(!app.show_json);
    assert!(app.json_lines.is_empty());
}

#[test]
fn test_quit_keys() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    assert!(!app.should_quit());
    app.handle(Input::key(Key::Char('q')));
    assert!(app.should_quit());

    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    app.handle(Input::Key {
        key: Key::Char('c'),
        modifiers: Modifiers::ctrl(),
    });
    assert!(app.should_quit());
}

#[test]
fn test_status_expires() {
    let mut app = App::new(&config(Variant::Reorder)).unwrap();
    app.set_status("hello");
    let deadline = app.status_deadline().unwrap();
    app.expire_status(deadline - std::time::Duration::from_millis(1));
    assert!(app.status.is_some());
    app.expire_status(deadline);
    assert!(app.status.is_none());
}
