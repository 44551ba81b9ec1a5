//! Client-side edit/selection state machine for a paginated record dataset.
//!
//! - [`SelectionSet`]: row ids marked selected, stable across pagination.
//! - [`EditSession`] / [`CellRef`]: the per-cell edit state machine.
//! - [`DataController`]: single owner of all session state, plus the sync
//!   coordinator that submits the pending [`labbook_model::ChangeSet`] and
//!   reloads the view model on confirmed success.
//! - [`ChangeTransport`]: the contract with the backend; [`MemoryTransport`]
//!   is an in-memory reference implementation for tests and the CLI.

pub mod controller;
pub mod error;
pub mod memory;
pub mod selection;
pub mod session;
pub mod transport;

pub use controller::{DataController, EMPTY_DATASET_NOTICE, UiState};
pub use error::{CoreError, Result};
pub use memory::MemoryTransport;
pub use selection::{PageToggle, SelectionSet};
pub use session::{CellRef, CommitOutcome, EditControl, EditSession};
pub use transport::{ChangeTransport, SubmitOutcome, TransportError};
