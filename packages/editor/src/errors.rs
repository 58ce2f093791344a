//! Error types for the editor

use crate::convert::ConversionError;
use blocktree_model::{BlockId, TransactionError};
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Block with ID {0} could not be found in the editor")]
    NotFound(BlockId),

    #[error(
        "Blocks with the following IDs could not be found in the editor: {}",
        join_ids(.0)
    )]
    BlocksNotFound(Vec<BlockId>),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

fn join_ids(ids: &[BlockId]) -> String {
    ids.iter()
        .map(BlockId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
