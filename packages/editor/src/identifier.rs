use crate::block::Block;
use blocktree_model::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a block: a raw id, or anything that carries one.
///
/// Every public operation normalizes its block references through this type.
/// In JSON it reads either `"id"` or an object with an `"id"` field, and is
/// written back as the plain id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "IdentifierRepr", into = "BlockId")]
pub struct BlockIdentifier(BlockId);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdentifierRepr {
    Id(BlockId),
    Object { id: BlockId },
}

impl From<IdentifierRepr> for BlockIdentifier {
    fn from(repr: IdentifierRepr) -> Self {
        match repr {
            IdentifierRepr::Id(id) | IdentifierRepr::Object { id } => Self(id),
        }
    }
}

impl From<BlockIdentifier> for BlockId {
    fn from(identifier: BlockIdentifier) -> Self {
        identifier.0
    }
}

impl BlockIdentifier {
    pub fn id(&self) -> &BlockId {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlockIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for BlockIdentifier {
    fn from(id: &str) -> Self {
        Self(BlockId::from(id))
    }
}

impl From<String> for BlockIdentifier {
    fn from(id: String) -> Self {
        Self(BlockId::from(id))
    }
}

impl From<BlockId> for BlockIdentifier {
    fn from(id: BlockId) -> Self {
        Self(id)
    }
}

impl From<&BlockId> for BlockIdentifier {
    fn from(id: &BlockId) -> Self {
        Self(id.clone())
    }
}

impl From<&Block> for BlockIdentifier {
    fn from(block: &Block) -> Self {
        Self(block.id.clone())
    }
}

impl From<&BlockIdentifier> for BlockIdentifier {
    fn from(identifier: &BlockIdentifier) -> Self {
        identifier.clone()
    }
}

/// Normalize a list of block references
pub fn identifiers<I>(blocks: I) -> Vec<BlockIdentifier>
where
    I: IntoIterator,
    I::Item: Into<BlockIdentifier>,
{
    blocks.into_iter().map(Into::into).collect()
}
