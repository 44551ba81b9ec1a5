//! Edit-session flows: begin, commit, revert, reject.

use std::collections::BTreeMap;

use labbook_core::{
    CellRef, CommitOutcome, CoreError, DataController, EditControl, MemoryTransport,
};
use labbook_model::{FieldName, RowId};
use labbook_validate::FieldRegistry;

fn field(name: &str) -> FieldName {
    FieldName::new(name).expect("field name")
}

fn row(id: u64) -> RowId {
    RowId::new(id).expect("positive id")
}

fn lab_cells() -> BTreeMap<FieldName, String> {
    let mut cells = BTreeMap::new();
    cells.insert(field("temp"), "350".to_string());
    cells.insert(field("ref"), "AB".to_string());
    cells.insert(field("outcome"), "3".to_string());
    cells.insert(field("quantity_2"), "1.5".to_string());
    cells
}

fn controller_with_one_row() -> DataController<MemoryTransport> {
    let mut transport = MemoryTransport::new(10, FieldRegistry::standard());
    transport.seed_row(lab_cells());
    DataController::new(transport, FieldRegistry::standard()).expect("controller loads")
}

#[test]
fn begin_edit_captures_original_and_sizes_the_text_control() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("session opens");

    assert_eq!(session.original, "350");
    assert_eq!(session.control, EditControl::Text { width: 4 });
}

#[test]
fn begin_edit_preselects_the_choice_control() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "outcome"))
        .expect("session opens");

    match session.control {
        EditControl::Choice { options, selected } => {
            assert_eq!(options, vec!["0", "1", "2", "3", "4"]);
            assert_eq!(selected, Some(3));
        }
        EditControl::Text { .. } => panic!("outcome edits via a choice list"),
    }
}

#[test]
fn one_session_per_cell_but_cells_are_independent() {
    let mut controller = controller_with_one_row();
    let open = controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("first session");

    assert!(matches!(
        controller.begin_edit(&CellRef::new(row(1), "temp")),
        Err(CoreError::EditInProgress { .. })
    ));
    // A different cell on the same row is fine.
    let other = controller
        .begin_edit(&CellRef::new(row(1), "ref"))
        .expect("independent cell");

    controller.cancel_edit(open);
    controller.cancel_edit(other);
    controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("reopens after cancel");
}

#[test]
fn equal_value_commit_records_and_submits_nothing() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("session opens");

    let outcome = controller.commit_edit(session, "350").expect("commit");

    assert_eq!(outcome, CommitOutcome::Unchanged);
    assert!(controller.changes().is_empty());
    assert!(!controller.ui().loading);
}

#[test]
fn rejected_commit_reverts_to_the_original_value() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("session opens");

    let outcome = controller.commit_edit(session, "500").expect("commit");

    match outcome {
        CommitOutcome::Rejected { display, message } => {
            assert_eq!(display, "350");
            assert!(message.contains("temp"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    // Discarded, not queued: no accumulator entry, cell still shows 350.
    assert!(controller.changes().is_empty());
    let shown = controller.page().rows[0].cell(&field("temp")).unwrap();
    assert_eq!(shown, "350");
    // Transient message is pending and the control is flagged.
    assert!(controller.ui().invalid_cells.contains(&(row(1), field("temp"))));
    assert_eq!(
        controller.take_error().expect("message shown"),
        "Invalid value for temp."
    );
    assert!(controller.take_error().is_none());
}

#[test]
fn over_long_reference_is_rejected() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "ref"))
        .expect("session opens");

    let outcome = controller.commit_edit(session, "ABCDEFGHI").expect("commit");
    assert!(matches!(outcome, CommitOutcome::Rejected { .. }));
    assert!(controller.changes().is_empty());
}

#[test]
fn accepted_commit_submits_immediately_and_reloads() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::new(row(1), "temp"))
        .expect("session opens");

    let outcome = controller.commit_edit(session, "120").expect("commit");

    assert_eq!(
        outcome,
        CommitOutcome::Committed {
            display: "120".to_string()
        }
    );
    // The round trip confirmed: buffer empty, loading settled, view reloaded
    // with the authoritative value.
    assert!(controller.changes().is_empty());
    assert!(!controller.ui().loading);
    let shown = controller.page().rows[0].cell(&field("temp")).unwrap();
    assert_eq!(shown, "120");
}

#[test]
fn repeated_field_edits_go_through_their_slot() {
    let mut controller = controller_with_one_row();
    let session = controller
        .begin_edit(&CellRef::slotted(row(1), "quantity", 2))
        .expect("session opens");
    assert_eq!(session.original, "1.5");
    assert_eq!(session.field.as_str(), "quantity_2");

    controller.commit_edit(session, "2.5").expect("commit");
    let shown = controller.page().rows[0].cell(&field("quantity_2")).unwrap();
    assert_eq!(shown, "2.5");
}

#[test]
fn malformed_field_identity_fails_closed() {
    let mut controller = controller_with_one_row();
    assert!(matches!(
        controller.begin_edit(&CellRef::new(row(1), "quantity")),
        Err(CoreError::MissingSlot { .. })
    ));
    assert!(matches!(
        controller.begin_edit(&CellRef::slotted(row(1), "quantity", 9)),
        Err(CoreError::SlotOutOfRange { .. })
    ));
    assert!(controller.changes().is_empty());
}

#[test]
fn editing_an_off_page_row_is_refused() {
    let mut controller = controller_with_one_row();
    assert!(matches!(
        controller.begin_edit(&CellRef::new(row(42), "temp")),
        Err(CoreError::RowNotVisible(_))
    ));
}
