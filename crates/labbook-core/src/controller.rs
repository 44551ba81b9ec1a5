//! The session-scoped controller owning all client-side state.
//!
//! One `DataController` exists per page view. It owns the selection set, the
//! pending change-set, the current view model and the UI flags, and it is the
//! sync coordinator: committed edits and the batch delete/duplicate
//! operations feed the change-set and trigger an immediate submission cycle,
//! which on confirmed success clears the buffer and reloads the view model
//! from the transport.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use labbook_model::{ChangeSet, DatasetSnapshot, FieldName, PageView, RowId};
use labbook_validate::FieldRegistry;

use crate::error::{CoreError, Result};
use crate::selection::{PageToggle, SelectionSet};
use crate::session::{CellRef, CommitOutcome, EditControl, EditSession};
use crate::transport::{ChangeTransport, SubmitOutcome};

/// Shown instead of a table when the dataset has no records.
pub const EMPTY_DATASET_NOTICE: &str = "No records in the dataset yet.";

/// Client-side UI flags, separated from the data they decorate.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Blocking loading indicator. Set for the whole submission cycle and,
    /// deliberately, left set when the transport fails: there is no retry,
    /// and pretending the submission settled would be worse.
    pub loading: bool,
    /// Transient validation message awaiting display.
    pub error: Option<String>,
    /// Cells flagged invalid until corrected.
    pub invalid_cells: BTreeSet<(RowId, FieldName)>,
    /// Placeholder text replacing the table when the dataset is empty.
    pub placeholder: Option<String>,
}

pub struct DataController<T: ChangeTransport> {
    transport: T,
    registry: FieldRegistry,
    selection: SelectionSet,
    changes: ChangeSet,
    snapshot: DatasetSnapshot,
    page: PageView,
    open_cells: BTreeSet<(RowId, FieldName)>,
    ui: UiState,
}

impl<T: ChangeTransport> DataController<T> {
    /// Build a controller and load the first page.
    pub fn new(transport: T, registry: FieldRegistry) -> Result<Self> {
        let mut controller = Self {
            transport,
            registry,
            selection: SelectionSet::new(),
            changes: ChangeSet::new(),
            snapshot: DatasetSnapshot::default(),
            page: PageView::default(),
            open_cells: BTreeSet::new(),
            ui: UiState::default(),
        };
        controller.refresh()?;
        Ok(controller)
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn snapshot(&self) -> DatasetSnapshot {
        self.snapshot
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Take the transient error message for display, dismissing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.ui.error.take()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Toggle one row and re-apply highlighting.
    pub fn toggle_row(&mut self, id: RowId) -> bool {
        let selected = self.selection.toggle(id);
        self.reconcile_view();
        selected
    }

    /// Toggle the current page against the dataset's page capacity.
    pub fn toggle_page(&mut self) -> PageToggle {
        let page_rows: Vec<RowId> = self.page.rows.iter().map(|row| row.id).collect();
        let toggle = self
            .selection
            .toggle_page(&page_rows, self.snapshot.page_size);
        self.reconcile_view();
        toggle
    }

    /// Toggle between nothing and everything selected.
    pub fn toggle_all(&mut self) {
        self.selection.toggle_all(self.snapshot.total_rows);
        self.reconcile_view();
    }

    /// Re-apply selection highlighting to the rendered rows.
    ///
    /// Must run after every view replacement; it is the sole mechanism that
    /// keeps selection visible across page changes and reloads.
    pub fn reconcile_view(&mut self) {
        for row in &mut self.page.rows {
            row.selected = self.selection.contains(row.id);
        }
    }

    // ------------------------------------------------------------------
    // Edit sessions
    // ------------------------------------------------------------------

    /// Turn a displayed cell into an edit session.
    ///
    /// Refuses when a session for the cell is already open. Fields with a
    /// closed choice list get a choice control pre-selected to the current
    /// value; everything else gets a free-text control sized to the
    /// original display width.
    pub fn begin_edit(&mut self, cell: &CellRef) -> Result<EditSession> {
        let field = cell.field()?;
        let key = (cell.row, field.clone());
        if self.open_cells.contains(&key) {
            return Err(CoreError::EditInProgress {
                row: cell.row,
                field,
            });
        }
        let row = self
            .page
            .rows
            .iter()
            .find(|row| row.id == cell.row)
            .ok_or(CoreError::RowNotVisible(cell.row))?;
        let original = row.cell(&field).unwrap_or("").trim().to_string();

        let control = match self.registry.edit_choices(&field) {
            Some(options) => {
                let selected = options.iter().position(|option| *option == original);
                EditControl::Choice { options, selected }
            }
            None => EditControl::Text {
                width: original.chars().count().max(4) as u16,
            },
        };

        self.open_cells.insert(key);
        debug!(row = %cell.row, field = %field, "edit session opened");
        Ok(EditSession {
            row: cell.row,
            field,
            original,
            control,
        })
    }

    /// Close a session without committing (the control lost focus to a view
    /// replacement, or the caller abandoned the edit).
    pub fn cancel_edit(&mut self, session: EditSession) {
        self.open_cells.remove(&(session.row, session.field));
    }

    /// Commit the value the control held when it lost focus.
    ///
    /// Equal values are free: nothing is recorded and nothing is submitted.
    /// A differing accepted value is buffered and triggers an immediate
    /// submission cycle — one request per committed edit, with no batching
    /// window across cells (a future debounce point, kept as-is). A
    /// rejected value is discarded and the cell reverts to the original.
    pub fn commit_edit(&mut self, session: EditSession, entered: &str) -> Result<CommitOutcome> {
        let key = (session.row, session.field.clone());
        self.open_cells.remove(&key);

        if entered == session.original {
            self.ui.invalid_cells.remove(&key);
            return Ok(CommitOutcome::Unchanged);
        }

        if !self.registry.validate(&session.field, entered) {
            let message = format!("Invalid value for {}.", session.field);
            self.ui.error = Some(message.clone());
            self.ui.invalid_cells.insert(key);
            return Ok(CommitOutcome::Rejected {
                display: session.original,
                message,
            });
        }

        self.ui.invalid_cells.remove(&key);
        if let Some(row) = self.page.rows.iter_mut().find(|row| row.id == session.row) {
            row.cells
                .insert(session.field.clone(), entered.to_string());
        }
        self.changes
            .record_edit(session.row, session.field, entered);
        self.submit()?;
        Ok(CommitOutcome::Committed {
            display: entered.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Batch operations
    // ------------------------------------------------------------------

    /// Record deletions for the current selection (ascending), drop the rows
    /// from the view, clear the selection and submit.
    pub fn delete_selected(&mut self) -> Result<()> {
        let ids: Vec<RowId> = self.selection.iter().collect();
        for id in &ids {
            self.changes.record_deletion(*id);
        }
        self.page.rows.retain(|row| !self.selection.contains(row.id));
        self.selection.clear();
        info!(count = ids.len(), "deletion batch recorded");
        self.submit()
    }

    /// Record duplications for the current selection (ascending) and submit.
    /// The selection itself is rebuilt by the reload that follows success.
    pub fn duplicate_selected(&mut self) -> Result<()> {
        let ids: Vec<RowId> = self.selection.iter().collect();
        for id in &ids {
            self.changes.record_duplication(*id);
        }
        info!(count = ids.len(), "duplication batch recorded");
        self.submit()
    }

    // ------------------------------------------------------------------
    // Sync coordinator
    // ------------------------------------------------------------------

    /// Submit the pending change-set.
    ///
    /// Success clears all four sequences and reloads the view model. Any
    /// non-accepted response — server rejection or transport failure — is
    /// treated uniformly: the buffer is left untouched, the loading
    /// indicator stays shown and the error propagates. No retry.
    pub fn submit(&mut self) -> Result<()> {
        self.ui.loading = true;
        info!(pending = self.changes.len(), "submitting change-set");
        match self.transport.submit_changes(&self.changes) {
            Ok(SubmitOutcome::Accepted) => {
                self.changes.clear();
                self.refresh()
            }
            Ok(SubmitOutcome::Rejected(message)) => {
                warn!(%message, "server rejected change-set");
                Err(CoreError::SubmissionRejected(message))
            }
            Err(error) => {
                warn!(%error, "change submission transport failed");
                Err(error.into())
            }
        }
    }

    /// Reload the view model from a fresh server snapshot.
    ///
    /// The testable stand-in for a full page reload: selection, pending
    /// changes, open edit sessions and UI flags are all discarded and
    /// rebuilt — nothing client-side survives a reload, which is what makes
    /// it the recovery path after a stuck submission. An empty dataset
    /// yields the placeholder notice instead of rows.
    pub fn refresh(&mut self) -> Result<()> {
        self.snapshot = self.transport.fetch_snapshot()?;
        self.selection.clear();
        self.changes.clear();
        self.open_cells.clear();
        self.ui = UiState::default();

        if self.snapshot.is_empty() {
            self.page = PageView::default();
            self.ui.placeholder = Some(EMPTY_DATASET_NOTICE.to_string());
            return Ok(());
        }

        let current = self.page.number.max(1).min(self.snapshot.page_count());
        self.page = self.transport.fetch_page(current)?;
        self.reconcile_view();
        Ok(())
    }

    /// In-place page navigation. Selection is preserved and re-applied.
    pub fn goto_page(&mut self, page: u32) -> Result<()> {
        self.page = self.transport.fetch_page(page)?;
        self.open_cells.clear();
        self.reconcile_view();
        Ok(())
    }
}
