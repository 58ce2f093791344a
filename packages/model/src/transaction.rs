//! # Transactions
//!
//! A [`Transaction`] holds a draft of one tree version and accumulates edits
//! against it. Positions passed to each edit address the draft as it stands
//! after the previous edits, so callers issuing several edits must correct
//! later positions by the size change of earlier ones (see [`Transaction::size`]).
//!
//! Committing consumes the transaction and validates the result; a dropped
//! transaction has no effect on the base tree.

use crate::error::{TransactionError, TransactionResult};
use crate::node::Node;
use crate::tree::Tree;
use tracing::{debug, trace};

/// One applied edit, in draft coordinates at the time it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Insert { pos: usize, size: usize },
    Delete { from: usize, to: usize, removed: usize },
}

/// Single-use edit accumulator over a base tree
#[derive(Debug)]
pub struct Transaction {
    doc: Node,
    steps: Vec<Step>,
}

impl Transaction {
    pub fn new(tree: &Tree) -> Self {
        Self {
            doc: tree.root().clone(),
            steps: Vec::new(),
        }
    }

    /// Current draft root
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    /// Addressable size of the current draft
    pub fn size(&self) -> usize {
        self.doc.content_size()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Insert `nodes` at the child boundary `pos`
    pub fn insert(&mut self, pos: usize, nodes: Vec<Node>) -> TransactionResult<()> {
        let size = self.size();
        if pos > size {
            return Err(TransactionError::PositionOutOfRange { pos, size });
        }
        if nodes.is_empty() {
            return Ok(());
        }

        let inserted: usize = nodes.iter().map(Node::size).sum();
        self.doc = insert_into(&self.doc, pos, 0, &nodes)?;

        trace!(pos, inserted, "insert");
        self.steps.push(Step::Insert { pos, size: inserted });
        Ok(())
    }

    /// Delete every node lying entirely inside `from..to`.
    ///
    /// Nodes the range only partly covers are kept and the range is applied
    /// to their children instead. Inline content is never split.
    pub fn delete(&mut self, from: usize, to: usize) -> TransactionResult<()> {
        if from > to {
            return Err(TransactionError::InvalidRange { from, to });
        }
        let size = self.size();
        if to > size {
            return Err(TransactionError::PositionOutOfRange { pos: to, size });
        }
        if from == to {
            return Ok(());
        }

        let before = self.doc.size();
        self.doc = delete_from(&self.doc, from, to);
        let removed = before - self.doc.size();

        trace!(from, to, removed, "delete");
        self.steps.push(Step::Delete { from, to, removed });
        Ok(())
    }

    /// Swap the node starting at `pos` for `node`
    pub fn replace_node(&mut self, pos: usize, node: Node) -> TransactionResult<()> {
        let old_size = self
            .doc
            .node_at(pos)
            .map(Node::size)
            .ok_or(TransactionError::NoNodeAt { pos })?;

        self.delete(pos, pos + old_size)?;
        self.insert(pos, vec![node])
    }

    /// Validate the draft and turn it into the next tree version
    pub fn commit(self) -> TransactionResult<Tree> {
        let tree = Tree::from_root(self.doc);
        tree.validate()?;
        debug!(steps = self.steps.len(), size = tree.size(), "transaction committed");
        Ok(tree)
    }
}

/// `pos` is relative to `parent`'s content; `base` is the absolute position
/// of that content, used for error reporting.
fn insert_into(parent: &Node, pos: usize, base: usize, nodes: &[Node]) -> TransactionResult<Node> {
    let mut offset = 0;
    for (index, child) in parent.children().iter().enumerate() {
        if pos == offset {
            return Ok(splice(parent, index, nodes));
        }
        let end = offset + child.size();
        if pos < end {
            if child.is_content() {
                return Err(TransactionError::InsideContent { pos: base + pos });
            }
            let updated = insert_into(child, pos - offset - 1, base + offset + 1, nodes)?;
            let mut children = parent.children().to_vec();
            children[index] = updated;
            return Ok(parent.with_children(children));
        }
        offset = end;
    }

    if pos == offset {
        return Ok(splice(parent, parent.child_count(), nodes));
    }

    Err(TransactionError::PositionOutOfRange {
        pos: base + pos,
        size: base + offset,
    })
}

fn splice(parent: &Node, index: usize, nodes: &[Node]) -> Node {
    let mut children = Vec::with_capacity(parent.child_count() + nodes.len());
    children.extend_from_slice(&parent.children()[..index]);
    children.extend_from_slice(nodes);
    children.extend_from_slice(&parent.children()[index..]);
    parent.with_children(children)
}

/// `from..to` is relative to `parent`'s content
fn delete_from(parent: &Node, from: usize, to: usize) -> Node {
    let mut kept = Vec::with_capacity(parent.child_count());
    let mut changed = false;
    let mut offset = 0;

    for child in parent.children() {
        let start = offset;
        let end = offset + child.size();
        offset = end;

        if from <= start && end <= to {
            changed = true;
            continue;
        }

        if start < to && from < end && !child.is_content() {
            let inner_from = from.saturating_sub(start + 1);
            let inner_to = to.min(end - 1).saturating_sub(start + 1);
            if inner_from < inner_to {
                let updated = delete_from(child, inner_from, inner_to);
                changed |= updated.size() != child.size();
                kept.push(updated);
                continue;
            }
        }

        kept.push(child.clone());
    }

    if changed {
        parent.with_children(kept)
    } else {
        parent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BlockId, Content};

    fn paragraph(id: &str, text: &str) -> Node {
        Node::container(id, Content::new("paragraph").with_text(text), vec![])
    }

    fn ids(tree: &Tree) -> Vec<String> {
        tree.block_ids().into_iter().map(BlockId::to_string).collect()
    }

    #[test]
    fn test_insert_between_top_level_blocks() {
        let tree = Tree::from_blocks(vec![paragraph("a", "x"), paragraph("c", "z")]).unwrap();
        let mut tx = Transaction::new(&tree);

        tx.insert(5, vec![paragraph("b", "y")]).unwrap();
        assert_eq!(tx.size(), tree.size() + 5);
        assert_eq!(tx.steps(), &[Step::Insert { pos: 5, size: 5 }]);

        let next = tx.commit().unwrap();
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        // Base version is untouched
        assert_eq!(ids(&tree), vec!["a", "c"]);
    }

    #[test]
    fn test_insert_inside_content_fails() {
        let tree = Tree::from_blocks(vec![paragraph("a", "hello")]).unwrap();
        let mut tx = Transaction::new(&tree);

        assert_eq!(
            tx.insert(3, vec![paragraph("b", "")]),
            Err(TransactionError::InsideContent { pos: 3 })
        );
        assert!(!tx.doc_changed());
    }

    #[test]
    fn test_insert_out_of_range() {
        let tree = Tree::from_blocks(vec![paragraph("a", "")]).unwrap();
        let mut tx = Transaction::new(&tree);

        assert_eq!(
            tx.insert(9, vec![paragraph("b", "")]),
            Err(TransactionError::PositionOutOfRange { pos: 9, size: 4 })
        );
    }

    #[test]
    fn test_delete_whole_node_only() {
        let tree = Tree::from_blocks(vec![
            paragraph("a", ""),
            paragraph("b", "hi"),
            paragraph("c", ""),
        ])
        .unwrap();
        let mut tx = Transaction::new(&tree);

        // b spans 4..10; one unit of margin on each side reaches into a and c
        tx.delete(3, 11).unwrap();
        assert_eq!(tx.steps(), &[Step::Delete { from: 3, to: 11, removed: 6 }]);

        let next = tx.commit().unwrap();
        assert_eq!(ids(&next), vec!["a", "c"]);
    }

    #[test]
    fn test_delete_only_nested_child_takes_group() {
        let parent = Node::container("p", Content::new("paragraph"), vec![paragraph("c", "")]);
        let tree = Tree::from_blocks(vec![parent]).unwrap();

        // p at 0, content 1..3, group 3..9, c at 4
        let mut tx = Transaction::new(&tree);
        tx.delete(3, 9).unwrap();
        let next = tx.commit().unwrap();

        assert_eq!(ids(&next), vec!["p"]);
        assert_eq!(next.top_level()[0].child_count(), 1);
        assert_eq!(next.size(), 4);
    }

    #[test]
    fn test_delete_content_only_is_rejected_at_commit() {
        let tree = Tree::from_blocks(vec![paragraph("a", "")]).unwrap();
        let mut tx = Transaction::new(&tree);

        tx.delete(1, 3).unwrap();
        assert!(matches!(tx.commit(), Err(TransactionError::InvalidStructure(_))));
    }

    #[test]
    fn test_invalid_ranges() {
        let tree = Tree::from_blocks(vec![paragraph("a", "")]).unwrap();
        let mut tx = Transaction::new(&tree);

        assert_eq!(tx.delete(3, 1), Err(TransactionError::InvalidRange { from: 3, to: 1 }));
        assert_eq!(
            tx.delete(0, 5),
            Err(TransactionError::PositionOutOfRange { pos: 5, size: 4 })
        );
        tx.delete(2, 2).unwrap();
        assert!(!tx.doc_changed());
    }

    #[test]
    fn test_replace_node() {
        let tree = Tree::from_blocks(vec![paragraph("a", ""), paragraph("b", "")]).unwrap();
        let mut tx = Transaction::new(&tree);

        tx.replace_node(4, paragraph("b", "new")).unwrap();
        let next = tx.commit().unwrap();

        assert_eq!(ids(&next), vec!["a", "b"]);
        assert_eq!(next.top_level()[1].block_content().unwrap().text, "new");
        assert_eq!(tx_err_no_node(&tree), TransactionError::NoNodeAt { pos: 2 });
    }

    fn tx_err_no_node(tree: &Tree) -> TransactionError {
        let mut tx = Transaction::new(tree);
        tx.replace_node(2, paragraph("x", "")).unwrap_err()
    }

    #[test]
    fn test_commit_rejects_duplicate_ids() {
        let tree = Tree::from_blocks(vec![paragraph("a", "")]).unwrap();
        let mut tx = Transaction::new(&tree);

        tx.insert(0, vec![paragraph("a", "")]).unwrap();
        assert_eq!(tx.commit(), Err(TransactionError::DuplicateId(BlockId::new("a"))));
    }
}
