//! # Blocktree Editor
//!
//! Structural editing of block documents: insert, update, remove and replace
//! blocks by id on top of the position-addressed tree from `blocktree-model`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ BlockEditor: current tree, version, undo    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ operations: one transaction per operation   │
//! │  - locator resolves ids to positions        │
//! │  - NodeConverter turns blocks into nodes    │
//! │  - ContentPatcher decides what updates mean │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: Tree, Transaction, commit validation │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Atomic operations**: every operation commits once or not at all
//! 2. **Positions are ephemeral**: resolved from ids for each operation
//! 3. **Pluggable conversion**: the schema lives in the converter, not the core
//!
//! ## Usage
//!
//! ```rust
//! use blocktree_editor::{BlockEditor, IdGenerator, PartialBlock, Placement, Schema, SchemaConverter};
//!
//! let converter = SchemaConverter::new(Schema::default(), IdGenerator::new("notes"));
//! let mut editor = BlockEditor::from_blocks(&[PartialBlock::paragraph("Hello").with_id("a")], converter)?;
//!
//! editor.insert_blocks(&[PartialBlock::paragraph("World")], "a", Placement::After)?;
//! editor.remove_blocks(["a"])?;
//! assert_eq!(editor.document()[0].content, "World");
//! # Ok::<(), blocktree_editor::EditorError>(())
//! ```

mod block;
mod convert;
mod editor;
mod errors;
mod identifier;
mod locator;
mod mutations;
mod operations;
mod patch;
mod schema;
mod undo_stack;

pub use block::{blocks, Block, PartialBlock, Placement};
pub use convert::{ConversionError, NodeConverter, SchemaConverter};
pub use editor::BlockEditor;
pub use errors::{EditorError, EditorResult};
pub use identifier::{identifiers, BlockIdentifier};
pub use locator::{find, locate, Located};
pub use mutations::{Mutation, MutationResult};
pub use operations::{insert_blocks, remove_blocks, remove_blocks_with, replace_blocks, shifted, update_block, MatchHook};
pub use patch::ContentPatcher;
pub use schema::{BlockTypeSpec, Schema};
pub use undo_stack::{HistoryEntry, UndoStack};

// Re-export model types for convenience
pub use blocktree_model::{get_document_seed, BlockId, Content, IdGenerator, Node, NodeKind, Step, Transaction, TransactionError, Tree, Visit};
