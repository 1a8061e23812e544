use gridline_lib::model::{default_columns, generate, ColumnId, ColumnSet, GeneratorConfig, RowId};
use gridline_lib::table::{CheckState, SortDirection, VisibleRow};
use gridline_lib::{Table, TableError};

fn nested_table() -> Table {
    let columns = ColumnSet::new(default_columns()).unwrap();
    let records = generate(&GeneratorConfig::nested([5, 3, 2]).with_seed(11));
    Table::new(columns, records).unwrap()
}

fn flat_table(len: usize) -> Table {
    let columns = ColumnSet::new(default_columns()).unwrap();
    let records = generate(&GeneratorConfig::flat(len).with_seed(3));
    Table::new(columns, records).unwrap()
}

fn top_ids(table: &Table) -> Vec<RowId> {
    table.records().iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_collapsed_row_model_is_top_level() {
    let table = nested_table();
    let rows = table.row_model();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(VisibleRow::is_top_level));
    assert!(rows.iter().all(|r| r.has_children && !r.expanded));
    assert_eq!(
        rows.iter().map(|r| r.top_index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
}

#[test]
fn test_expanding_one_row_shows_its_children() {
    let mut table = nested_table();
    let id = table.records()[1].id.clone();
    assert!(table.toggle_expanded(&id).unwrap());

    let rows = table.row_model();
    assert_eq!(rows.len(), 5 + 3);
    assert_eq!(rows[1].id, id);
    assert!(rows[1].expanded);
    for child in &rows[2..5] {
        assert_eq!(child.depth, 1);
        assert_eq!(child.top_index, 1);
        assert!(!child.expanded);
    }
    assert_eq!(table.record(&rows[2]).map(|r| &r.id), Some(&table.records()[1].sub_rows[0].id));

    assert!(!table.toggle_expanded(&id).unwrap());
    assert_eq!(table.row_model().len(), 5);
}

#[test]
fn test_expand_all_shows_whole_tree() {
    let mut table = nested_table();
    assert!(table.toggle_all_expanded());
    let rows = table.row_model();
    assert_eq!(rows.len(), 5 + 15 + 30);
    assert_eq!(rows.iter().map(|r| r.depth).max(), Some(2));

    // Collapsing one row out of "all" keeps the others open
    let id = table.records()[0].id.clone();
    assert!(!table.toggle_expanded(&id).unwrap());
    assert_eq!(table.row_model().len(), 5 + 15 + 30 - (3 + 6));
    assert!(!table.state.expansion.is_all_expanded());
}

#[test]
fn test_unknown_row_errors() {
    let mut table = nested_table();
    let missing = RowId::from("missing");
    assert!(matches!(table.toggle_expanded(&missing), Err(TableError::UnknownRow(_))));
    assert!(matches!(table.toggle_selected(&missing), Err(TableError::UnknownRow(_))));
    assert!(table.check_state(&missing).is_none());
}

#[test]
fn test_selection_through_table() {
    let mut table = nested_table();
    let parent = table.records()[2].clone();
    let child = parent.sub_rows[0].id.clone();

    table.toggle_selected(&child).unwrap();
    assert_eq!(table.check_state(&parent.id), Some(CheckState::Indeterminate));
    assert_eq!(table.all_check_state(), CheckState::Indeterminate);

    table.toggle_selected(&parent.id).unwrap();
    assert_eq!(table.check_state(&parent.id), Some(CheckState::Checked));

    assert!(table.toggle_all_selected());
    assert_eq!(table.all_check_state(), CheckState::Checked);
}

#[test]
fn test_sort_orders_rows_without_touching_store() {
    let mut table = flat_table(15);
    let before = top_ids(&table);
    let age = ColumnId::from("age");
    let age_index = table.columns().index_of(&age).unwrap();

    let sort = table.toggle_sort(&age).unwrap();
    assert_eq!(sort.map(|s| s.direction), Some(SortDirection::Asc));
    let ages: Vec<_> = table
        .row_model()
        .iter()
        .map(|row| table.cell_value(table.record(row).unwrap(), age_index).unwrap())
        .collect();
    assert!(ages.windows(2).all(|w| w[0] <= w[1]));

    table.toggle_sort(&age).unwrap();
    let ages: Vec<_> = table
        .row_model()
        .iter()
        .map(|row| table.cell_value(table.record(row).unwrap(), age_index).unwrap())
        .collect();
    assert!(ages.windows(2).all(|w| w[0] >= w[1]));

    assert!(table.toggle_sort(&age).unwrap().is_none());
    assert_eq!(top_ids(&table), before);
    let unsorted: Vec<RowId> = table.row_model().into_iter().map(|r| r.id).collect();
    assert_eq!(unsorted, before);
}

#[test]
fn test_sorting_group_column_is_ignored() {
    let mut table = flat_table(3);
    assert!(table.toggle_sort(&ColumnId::from("Name")).unwrap().is_none());
    assert!(matches!(
        table.toggle_sort(&ColumnId::from("nope")),
        Err(TableError::UnknownColumn(_))
    ));
}

#[test]
fn test_reorder_then_row_model_follows_store() {
    let mut table = flat_table(4);
    let before = top_ids(&table);
    table.reorder_row(0, 2).unwrap();
    let rows: Vec<RowId> = table.row_model().into_iter().map(|r| r.id).collect();
    assert_eq!(
        rows,
        vec![before[1].clone(), before[2].clone(), before[0].clone(), before[3].clone()]
    );
}

#[test]
fn test_regenerate_resets_expansion_and_selection() {
    let mut table = nested_table();
    let id = table.records()[0].id.clone();
    table.toggle_expanded(&id).unwrap();
    table.toggle_selected(&id).unwrap();

    let records = generate(&GeneratorConfig::nested([2, 2]).with_seed(99));
    table.regenerate(records).unwrap();
    assert_eq!(table.records().len(), 2);
    assert!(!table.state.expansion.is_some_expanded());
    assert_eq!(table.state.selection.selected_count(), 0);
    assert_eq!(table.store().revision(), 1);
}

#[test]
fn test_to_json_uses_camel_case() {
    let table = flat_table(2);
    let json = table.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert!(value[0].get("firstName").is_some());
    assert!(value[0].get("subRows").is_none());
}

#[test]
fn test_header_geometry() {
    let table = flat_table(1);
    let groups = table.header_groups();
    let top = &groups[0];
    assert_eq!(table.header_start(&top.headers[0]), 0);
    assert_eq!(table.header_size(&top.headers[0]), 16 + 14);
    assert_eq!(table.header_start(&top.headers[1]), 30);
    assert_eq!(table.total_size(), table.header_size(&top.headers[0]) + table.header_size(&top.headers[1]));
}
