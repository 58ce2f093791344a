//! # Block Mutations
//!
//! Serializable descriptions of the four structural operations, used to
//! replay edit scripts.
//!
//! ```json
//! [
//!   { "op": "insertBlocks", "blocks": [{ "content": "Hi" }], "reference": "a", "placement": "after" },
//!   { "op": "updateBlock", "block": "a", "update": { "type": "heading" } },
//!   { "op": "removeBlocks", "blocks": ["b", { "id": "c" }] },
//!   { "op": "replaceBlocks", "remove": ["d"], "insert": [{ "content": "D" }] }
//! ]
//! ```
//!
//! ## Mutation Semantics
//!
//! Each mutation is atomic: it builds one transaction and either commits it
//! or fails leaving the tree as it was.

use crate::block::{PartialBlock, Placement};
use crate::convert::NodeConverter;
use crate::errors::EditorResult;
use crate::identifier::BlockIdentifier;
use crate::operations;
use crate::patch::ContentPatcher;
use blocktree_model::Tree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert blocks next to or inside a reference block
    InsertBlocks {
        blocks: Vec<PartialBlock>,
        reference: BlockIdentifier,
        #[serde(default)]
        placement: Placement,
    },

    /// Patch one block in place
    UpdateBlock {
        block: BlockIdentifier,
        update: PartialBlock,
    },

    /// Remove blocks with their nested blocks
    RemoveBlocks { blocks: Vec<BlockIdentifier> },

    /// Remove blocks and insert new ones where the first listed block was
    ReplaceBlocks {
        remove: Vec<BlockIdentifier>,
        insert: Vec<PartialBlock>,
    },
}

impl Mutation {
    /// Apply against `tree`, returning the next version
    pub fn apply<C>(&self, tree: &Tree, converter: &mut C) -> EditorResult<Tree>
    where
        C: NodeConverter + ContentPatcher,
    {
        match self {
            Mutation::InsertBlocks {
                blocks,
                reference,
                placement,
            } => operations::insert_blocks(tree, blocks, reference, *placement, converter),

            Mutation::UpdateBlock { block, update } => {
                operations::update_block(tree, block, update, converter)
            }

            Mutation::RemoveBlocks { blocks } => operations::remove_blocks(tree, blocks),

            Mutation::ReplaceBlocks { remove, insert } => {
                operations::replace_blocks(tree, remove, insert, converter)
            }
        }
    }

    /// Dry run: report the error `apply` would fail with, changing nothing.
    ///
    /// Runs against a copy of the converter so no ids are consumed.
    pub fn validate<C>(&self, tree: &Tree, converter: &C) -> EditorResult<()>
    where
        C: NodeConverter + ContentPatcher + Clone,
    {
        let mut scratch = converter.clone();
        self.apply(tree, &mut scratch).map(|_| ())
    }

    /// Operation name as written in scripts
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlocks { .. } => "insertBlocks",
            Mutation::UpdateBlock { .. } => "updateBlock",
            Mutation::RemoveBlocks { .. } => "removeBlocks",
            Mutation::ReplaceBlocks { .. } => "replaceBlocks",
        }
    }

    /// Short human readable summary, used as the undo description
    pub fn describe(&self) -> String {
        match self {
            Mutation::InsertBlocks {
                blocks,
                reference,
                placement,
            } => format!("insert {} block(s) {:?} {}", blocks.len(), placement, reference),
            Mutation::UpdateBlock { block, .. } => format!("update {}", block),
            Mutation::RemoveBlocks { blocks } => format!("remove {} block(s)", blocks.len()),
            Mutation::ReplaceBlocks { remove, insert } => {
                format!("replace {} block(s) with {}", remove.len(), insert.len())
            }
        }
    }
}

/// Result of applying a mutation through an editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Document size after the mutation
    pub size: usize,
}
