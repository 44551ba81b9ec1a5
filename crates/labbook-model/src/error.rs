use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row id must be a positive integer, got {0}")]
    InvalidRowId(u64),
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
