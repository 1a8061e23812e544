use gridline_lib::model::{Record, RowId, Status};
use gridline_lib::table::{CheckState, SelectionState};

fn person(id: &str, sub_rows: Vec<Record>) -> Record {
    Record {
        id: RowId::from(id),
        first_name: id.into(),
        last_name: "Tree".into(),
        age: 1,
        visits: 2,
        progress: 3,
        status: Status::Relationship,
        sub_rows,
    }
}

fn family() -> Record {
    person(
        "p",
        vec![
            person("c1", vec![person("g1", vec![]), person("g2", vec![])]),
            person("c2", vec![]),
        ],
    )
}

#[test]
fn test_leaf_toggle_round_trip() {
    let mut selection = SelectionState::new();
    let leaf = person("x", vec![]);
    assert!(selection.toggle(&leaf));
    assert_eq!(selection.check_state(&leaf), CheckState::Checked);
    assert!(!selection.toggle(&leaf));
    assert_eq!(selection.check_state(&leaf), CheckState::Unchecked);
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn test_parent_toggle_selects_descendants() {
    let mut selection = SelectionState::new();
    let root = family();
    assert!(selection.toggle(&root));
    assert_eq!(selection.check_state(&root), CheckState::Checked);
    assert_eq!(selection.selected_count(), 5);

    assert!(!selection.toggle(&root));
    assert_eq!(selection.check_state(&root), CheckState::Unchecked);
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn test_indeterminate_iff_partial_descendants() {
    let mut selection = SelectionState::new();
    let root = family();
    let total = root.descendant_count();

    let g1 = &root.sub_rows[0].sub_rows[0];
    selection.toggle(g1);
    assert_eq!(selection.check_state(&root), CheckState::Indeterminate);
    assert_eq!(selection.check_state(&root.sub_rows[0]), CheckState::Indeterminate);

    // Select descendants children-first and check the rule at each step
    let mut ids: Vec<RowId> = root.descendants().map(|r| r.id.clone()).collect();
    ids.reverse();
    let mut selection = SelectionState::new();
    for id in &ids {
        let selected = root
            .descendants()
            .filter(|r| selection.is_selected(&r.id))
            .count();
        let expected = if selected == 0 {
            CheckState::Unchecked
        } else if selected == total {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        };
        assert_eq!(selection.check_state(&root), expected, "after {selected} selected");
        selection.set(root.find(id).unwrap(), true);
    }
    assert_eq!(selection.check_state(&root), CheckState::Checked);
}

#[test]
fn test_indeterminate_parent_toggles_to_checked() {
    let mut selection = SelectionState::new();
    let root = family();
    selection.toggle(&root.sub_rows[1]);
    assert_eq!(selection.check_state(&root), CheckState::Indeterminate);
    assert!(selection.toggle(&root));
    assert_eq!(selection.check_state(&root), CheckState::Checked);
}

#[test]
fn test_without_sub_row_selection_parent_uses_own_flag() {
    let mut selection = SelectionState::new().with_sub_row_selection(false);
    let root = family();
    selection.toggle(&root);
    assert_eq!(selection.selected_ids(), vec![RowId::from("p")]);
    assert_eq!(selection.check_state(&root), CheckState::Checked);
}

#[test]
fn test_toggle_all() {
    let mut selection = SelectionState::new();
    let records = vec![family(), person("solo", vec![])];
    assert_eq!(selection.all_state(&records), CheckState::Unchecked);
    assert!(!selection.is_some_selected(&records));

    selection.toggle(&records[1]);
    assert!(selection.is_some_selected(&records));
    assert_eq!(selection.all_state(&records), CheckState::Indeterminate);

    assert!(selection.toggle_all(&records));
    assert!(selection.is_all_selected(&records));
    assert_eq!(selection.all_state(&records), CheckState::Checked);

    assert!(!selection.toggle_all(&records));
    assert_eq!(selection.selected_count(), 0);
    assert!(!selection.is_all_selected(&[]));
}

#[test]
fn test_header_state_follows_children_selected_one_by_one() {
    let mut selection = SelectionState::new();
    let records = vec![person("p", vec![person("c1", vec![]), person("c2", vec![])])];
    let parent = &records[0];

    selection.toggle(&parent.sub_rows[0]);
    assert_eq!(selection.all_state(&records), CheckState::Indeterminate);
    selection.toggle(&parent.sub_rows[1]);

    // The parent's own flag is still unset, but every row it covers is
    assert!(!selection.is_selected(&parent.id));
    assert_eq!(selection.check_state(parent), CheckState::Checked);
    assert_eq!(selection.all_state(&records), CheckState::Checked);
    assert!(selection.is_all_selected(&records));
    assert!(!selection.is_some_selected(&records));

    assert!(!selection.toggle_all(&records));
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn test_header_state_without_sub_row_selection_counts_every_row() {
    let mut selection = SelectionState::new().with_sub_row_selection(false);
    let records = vec![family()];
    selection.toggle(&records[0]);
    assert_eq!(selection.all_state(&records), CheckState::Indeterminate);
    assert!(selection.toggle_all(&records));
    assert_eq!(selection.all_state(&records), CheckState::Checked);
}
