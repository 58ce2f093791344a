use crate::node::BlockId;
use thiserror::Error;

pub type TransactionResult<T> = Result<T, TransactionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Position {pos} is outside the document (size {size})")]
    PositionOutOfRange { pos: usize, size: usize },

    #[error("Invalid range {from}..{to}")]
    InvalidRange { from: usize, to: usize },

    #[error("Position {pos} points inside inline content")]
    InsideContent { pos: usize },

    #[error("No node starts at position {pos}")]
    NoNodeAt { pos: usize },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Duplicate block ID: {0}")]
    DuplicateId(BlockId),
}

impl TransactionError {
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }
}
