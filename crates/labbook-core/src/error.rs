use thiserror::Error;

use labbook_model::{FieldName, ModelError, RowId};

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("field {base:?} repeats per slot and needs a slot index")]
    MissingSlot { base: String },
    #[error("slot {slot} is out of range for field {base:?}")]
    SlotOutOfRange { base: String, slot: u8 },
    #[error("field {base:?} does not repeat but carried slot {slot}")]
    UnexpectedSlot { base: String, slot: u8 },
    #[error("an edit is already open for row {row}, field {field}")]
    EditInProgress { row: RowId, field: FieldName },
    #[error("row {0} is not on the current page")]
    RowNotVisible(RowId),
    #[error("change submission was not accepted: {0}")]
    SubmissionRejected(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
