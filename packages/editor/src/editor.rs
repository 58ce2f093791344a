//! # Block Editor
//!
//! Owns the current tree version of one document and applies operations to
//! it. The tree is only swapped after a successful commit, so a failed
//! operation leaves the editor exactly as it was.
//!
//! ## Lifecycle
//!
//! ```text
//! blocks → convert → Tree(v0) → operation → Tree(v1) → ... → blocks
//!                        ↑_________ undo / redo _________↓
//! ```

use crate::block::{blocks, Block, PartialBlock, Placement};
use crate::convert::{NodeConverter, SchemaConverter};
use crate::errors::EditorResult;
use crate::identifier::{identifiers, BlockIdentifier};
use crate::locator::find;
use crate::mutations::{Mutation, MutationResult};
use crate::operations;
use crate::patch::ContentPatcher;
use crate::schema::Schema;
use crate::undo_stack::UndoStack;
use blocktree_model::{get_document_seed, IdGenerator, Tree};
use tracing::{debug, info};

/// Editable block document
#[derive(Debug)]
pub struct BlockEditor<C = SchemaConverter> {
    tree: Tree,

    /// Current version number (increments on each successful operation)
    version: u64,

    converter: C,
    history: UndoStack,
}

impl BlockEditor<SchemaConverter> {
    /// Empty document whose generated ids are seeded from `name`
    pub fn new(schema: Schema, name: &str) -> Self {
        let converter = SchemaConverter::new(schema, IdGenerator::from_seed(get_document_seed(name)));
        Self::with_tree(Tree::empty(), converter)
    }

    /// Load a document from block descriptions
    pub fn from_blocks(blocks: &[PartialBlock], mut converter: SchemaConverter) -> EditorResult<Self> {
        let nodes = converter.blocks_to_nodes(blocks)?;
        let tree = Tree::from_blocks(nodes)?;

        debug!(blocks = tree.container_count(), size = tree.size(), "document loaded");
        Ok(Self::with_tree(tree, converter))
    }

    pub fn schema(&self) -> &Schema {
        self.converter.schema()
    }
}

impl<C> BlockEditor<C>
where
    C: NodeConverter + ContentPatcher,
{
    pub fn with_tree(tree: Tree, converter: C) -> Self {
        Self {
            tree,
            version: 0,
            converter,
            history: UndoStack::new(),
        }
    }

    /// Limit the undo history (0 = unlimited)
    pub fn with_undo_levels(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Top-level blocks of the current version
    pub fn document(&self) -> Vec<Block> {
        blocks(&self.tree)
    }

    pub fn get_block(&self, block: impl Into<BlockIdentifier>) -> Option<Block> {
        let block = block.into();
        find(&self.tree, block.as_str()).and_then(|located| Block::from_node(located.node))
    }

    pub fn insert_blocks(
        &mut self,
        blocks: &[PartialBlock],
        reference: impl Into<BlockIdentifier>,
        placement: Placement,
    ) -> EditorResult<u64> {
        self.apply_mutation(Mutation::InsertBlocks {
            blocks: blocks.to_vec(),
            reference: reference.into(),
            placement,
        })
    }

    pub fn update_block(&mut self, block: impl Into<BlockIdentifier>, update: PartialBlock) -> EditorResult<u64> {
        self.apply_mutation(Mutation::UpdateBlock {
            block: block.into(),
            update,
        })
    }

    pub fn remove_blocks<I>(&mut self, blocks: I) -> EditorResult<u64>
    where
        I: IntoIterator,
        I::Item: Into<BlockIdentifier>,
    {
        self.apply_mutation(Mutation::RemoveBlocks {
            blocks: identifiers(blocks),
        })
    }

    pub fn replace_blocks<I>(&mut self, remove: I, insert: &[PartialBlock]) -> EditorResult<u64>
    where
        I: IntoIterator,
        I::Item: Into<BlockIdentifier>,
    {
        self.apply_mutation(Mutation::ReplaceBlocks {
            remove: identifiers(remove),
            insert: insert.to_vec(),
        })
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: &Mutation) -> EditorResult<MutationResult> {
        let next = mutation.apply(&self.tree, &mut self.converter)?;
        self.commit(next, Some(mutation.describe()));

        Ok(MutationResult {
            version: self.version,
            size: self.tree.size(),
        })
    }

    fn apply_mutation(&mut self, mutation: Mutation) -> EditorResult<u64> {
        self.apply(&mutation).map(|result| result.version)
    }

    fn commit(&mut self, next: Tree, description: Option<String>) {
        let before = std::mem::replace(&mut self.tree, next);
        self.history.record(before, self.tree.clone(), description);
        self.version += 1;

        info!(version = self.version, size = self.tree.size(), "document updated");
    }

    /// Start grouping operations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Restore the previous version; returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(tree) => {
                self.restore(tree);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone step
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(tree) => {
                self.restore(tree);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, tree: Tree) {
        self.tree = tree;
        self.version += 1;
        debug!(version = self.version, "history restored");
    }
}
