//! The contract with the backend.
//!
//! The core never opens a socket; it talks to whatever implements
//! [`ChangeTransport`]. Calls return explicit results and the coordinator
//! never retries: a failed submission is reported once and the pending
//! change-set is left untouched.
//!
//! Concrete implementations own the collaborator concerns: attaching the
//! anti-forgery token to state-changing requests, session/auth handling, and
//! the exact wire encoding beyond the shapes below.

use thiserror::Error;

use labbook_model::{ChangeSet, DatasetSnapshot, PageView};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Failed(String),
    #[error("endpoint returned malformed data: {0}")]
    Malformed(String),
}

/// Server verdict on a submitted change-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All changes applied; the client may clear its buffer and reload.
    Accepted,
    /// Authoritative validation refused the batch; nothing was applied.
    Rejected(String),
}

pub trait ChangeTransport {
    /// POST the serialized change-set. On acceptance the server applies
    /// deletions, then edits, then duplications, in that order, each
    /// re-validated independently of the client's optimistic checks.
    fn submit_changes(&mut self, changes: &ChangeSet) -> Result<SubmitOutcome, TransportError>;

    /// Fetch one page of rows for in-place navigation. Pages are 1-based.
    fn fetch_page(&mut self, page: u32) -> Result<PageView, TransportError>;

    /// Fetch dataset totals for a full view-model reload.
    fn fetch_snapshot(&mut self) -> Result<DatasetSnapshot, TransportError>;
}
