//! Selection-set behavior, standalone and through the controller.

use std::collections::BTreeMap;

use labbook_core::{DataController, MemoryTransport, PageToggle, SelectionSet};
use labbook_model::{FieldName, RowId};
use labbook_validate::FieldRegistry;

fn row(id: u64) -> RowId {
    RowId::new(id).expect("positive id")
}

fn rows(ids: &[u64]) -> Vec<RowId> {
    ids.iter().map(|id| row(*id)).collect()
}

#[test]
fn toggle_is_an_involution() {
    let mut selection = SelectionSet::new();
    selection.toggle(row(3));
    let before: Vec<RowId> = selection.iter().collect();
    let len_before = selection.len();

    selection.toggle(row(7));
    selection.toggle(row(7));

    assert_eq!(selection.iter().collect::<Vec<_>>(), before);
    assert_eq!(selection.len(), len_before);
}

#[test]
fn iteration_is_ascending_regardless_of_toggle_order() {
    let mut selection = SelectionSet::new();
    for id in [9, 2, 5] {
        selection.toggle(row(id));
    }
    assert_eq!(selection.iter().collect::<Vec<_>>(), rows(&[2, 5, 9]));
}

#[test]
fn toggle_page_extends_a_partial_selection() {
    let mut selection = SelectionSet::new();
    selection.toggle(row(3));
    selection.toggle(row(7));

    let toggle = selection.toggle_page(&rows(&[1, 2, 3, 4, 5]), 5);

    assert_eq!(toggle, PageToggle::Selected { added: 4 });
    assert_eq!(selection.iter().collect::<Vec<_>>(), rows(&[1, 2, 3, 4, 5, 7]));
    assert_eq!(selection.len(), 6);
}

#[test]
fn toggle_page_on_a_fully_selected_page_deselects_exactly_that_page() {
    let mut selection = SelectionSet::new();
    for id in [1, 2, 3, 4, 5, 8] {
        selection.toggle(row(id));
    }

    let toggle = selection.toggle_page(&rows(&[1, 2, 3, 4, 5]), 5);

    assert_eq!(toggle, PageToggle::Cleared { removed: 5 });
    assert_eq!(selection.iter().collect::<Vec<_>>(), rows(&[8]));
    assert_eq!(selection.len(), 1);
}

#[test]
fn short_final_page_never_reaches_the_deselect_branch() {
    let mut selection = SelectionSet::new();
    // Final page holds 2 rows but capacity is 5: even fully selected it
    // re-selects (a no-op) rather than deselecting.
    selection.toggle(row(11));
    selection.toggle(row(12));

    let toggle = selection.toggle_page(&rows(&[11, 12]), 5);

    assert_eq!(toggle, PageToggle::Selected { added: 0 });
    assert_eq!(selection.len(), 2);
}

#[test]
fn toggle_all_alternates_between_full_and_empty() {
    let mut selection = SelectionSet::new();
    selection.toggle(row(4));

    selection.toggle_all(6);
    assert_eq!(selection.len(), 6);
    assert_eq!(selection.iter().collect::<Vec<_>>(), rows(&[1, 2, 3, 4, 5, 6]));

    selection.toggle_all(6);
    assert!(selection.is_empty());

    selection.toggle_all(6);
    assert_eq!(selection.len(), 6);
}

fn seeded_controller(total: u64, page_size: usize) -> DataController<MemoryTransport> {
    let mut transport = MemoryTransport::new(page_size, FieldRegistry::standard());
    for n in 0..total {
        let mut cells = BTreeMap::new();
        cells.insert(
            FieldName::new("ref").expect("field"),
            format!("R{n}"),
        );
        transport.seed_row(cells);
    }
    DataController::new(transport, FieldRegistry::standard()).expect("controller loads")
}

#[test]
fn selection_survives_page_navigation() {
    let mut controller = seeded_controller(7, 3);

    controller.toggle_row(row(2));
    controller.goto_page(2).expect("page 2");
    controller.toggle_row(row(5));
    controller.goto_page(1).expect("back to page 1");

    // Highlighting is re-applied from the set after the view was replaced.
    let selected: Vec<RowId> = controller
        .page()
        .rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.id)
        .collect();
    assert_eq!(selected, rows(&[2]));
    assert_eq!(controller.selection().len(), 2);
    assert!(controller.selection().contains(row(5)));
}

#[test]
fn controller_toggle_page_uses_dataset_capacity() {
    let mut controller = seeded_controller(7, 3);
    controller.goto_page(3).expect("short final page");
    assert_eq!(controller.page().rows.len(), 1);

    // Selecting the lone row then toggling the page must not deselect it:
    // one selected row is short of the capacity of three.
    controller.toggle_row(row(7));
    controller.toggle_page();
    assert!(controller.selection().contains(row(7)));
}
