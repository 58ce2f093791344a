//! # Undo/Redo Stack
//!
//! Tracks committed tree versions so edits can be stepped back and forth.
//!
//! ## Design
//!
//! - Every successful operation records the tree before and after it
//! - Undo hands back the `before` snapshot and moves the entry to the redo stack
//! - Redo hands back the `after` snapshot
//! - New entries clear the redo stack
//! - Batches group several operations into one undo step
//!
//! Trees share structure, so a snapshot costs one reference count bump plus
//! whatever the edit itself path-copied.

use blocktree_model::Tree;

/// One undo step: the tree before and after it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub before: Tree,
    pub after: Tree,

    /// Number of operations folded into this step
    pub operations: usize,

    pub description: Option<String>,
}

impl HistoryEntry {
    pub fn new(before: Tree, after: Tree) -> Self {
        Self {
            before,
            after,
            operations: 1,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Default)]
struct OpenBatch {
    entry: Option<HistoryEntry>,
    description: Option<String>,
}

/// Undo/redo history of one editor
#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Record one committed operation
    pub fn record(&mut self, before: Tree, after: Tree, description: Option<String>) {
        match &mut self.current_batch {
            Some(batch) => match &mut batch.entry {
                Some(entry) => {
                    entry.after = after;
                    entry.operations += 1;
                }
                None => batch.entry = Some(HistoryEntry::new(before, after)),
            },
            None => {
                let mut entry = HistoryEntry::new(before, after);
                entry.description = description;
                self.push_entry(entry);
            }
        }
    }

    /// Start a batch of operations (undone/redone together)
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.current_batch = Some(OpenBatch::default());
    }

    /// Close the current batch; an empty batch leaves no entry
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(mut entry) = batch.entry {
                entry.description = batch.description;
                self.push_entry(entry);
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back; returns the tree to restore. Closes an open batch first.
    pub fn undo(&mut self) -> Option<Tree> {
        self.end_batch();

        let entry = self.undo_stack.pop()?;
        let tree = entry.before.clone();
        self.redo_stack.push(entry);
        Some(tree)
    }

    /// Step forward again; returns the tree to restore
    pub fn redo(&mut self) -> Option<Tree> {
        self.end_batch();

        let entry = self.redo_stack.pop()?;
        let tree = entry.after.clone();
        self.undo_stack.push(entry);
        Some(tree)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
