use crate::error::{TransactionError, TransactionResult};
use crate::node::{BlockId, Node, NodeKind, Visit};
use std::collections::HashSet;

/// One immutable version of a block document.
///
/// The root is the top-level group. Positions are offsets into the root's
/// content, so they range over `0..=size()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Empty document
    pub fn empty() -> Self {
        Self {
            root: Node::group(Vec::new()),
        }
    }

    /// Build a validated document from top-level block containers
    pub fn from_blocks(blocks: Vec<Node>) -> TransactionResult<Self> {
        let tree = Self {
            root: Node::group(blocks),
        };
        tree.validate()?;
        Ok(tree)
    }

    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Addressable size of the document
    pub fn size(&self) -> usize {
        self.root.content_size()
    }

    pub fn is_empty(&self) -> bool {
        self.root.child_count() == 0
    }

    /// Top-level block containers
    pub fn top_level(&self) -> &[Node] {
        self.root.children()
    }

    /// See [`Node::descendants`]; positions are absolute.
    pub fn descendants<'a, F>(&'a self, visit: F)
    where
        F: FnMut(&'a Node, usize) -> Visit,
    {
        self.root.descendants(visit);
    }

    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        self.root.node_at(pos)
    }

    /// All block ids in document order
    pub fn block_ids(&self) -> Vec<&BlockId> {
        let mut ids = Vec::new();
        self.descendants(|node, _| {
            if let Some(id) = node.block_id() {
                ids.push(id);
            }
            Visit::Descend
        });
        ids
    }

    pub fn container_count(&self) -> usize {
        self.block_ids().len()
    }

    /// Check the structural invariants every committed version must hold
    pub fn validate(&self) -> TransactionResult<()> {
        let mut seen = HashSet::new();
        check_group(&self.root, true, &mut seen)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_group(group: &Node, is_root: bool, seen: &mut HashSet<BlockId>) -> TransactionResult<()> {
    if !is_root && group.child_count() == 0 {
        return Err(TransactionError::invalid_structure("nested group is empty"));
    }

    for child in group.children() {
        match child.kind() {
            NodeKind::Container { id } => {
                if !seen.insert(id.clone()) {
                    return Err(TransactionError::DuplicateId(id.clone()));
                }
                check_container(child, id, seen)?;
            }
            _ => {
                return Err(TransactionError::invalid_structure(format!(
                    "group holds a {} node",
                    child.kind_name()
                )));
            }
        }
    }

    Ok(())
}

fn check_container(container: &Node, id: &BlockId, seen: &mut HashSet<BlockId>) -> TransactionResult<()> {
    match container.children() {
        [content] if content.is_content() => Ok(()),
        [content, group] if content.is_content() && group.is_group() => {
            check_group(group, false, seen)
        }
        [first, ..] if !first.is_content() => Err(TransactionError::invalid_structure(format!(
            "block {} does not start with content",
            id
        ))),
        [] => Err(TransactionError::invalid_structure(format!(
            "block {} has no content",
            id
        ))),
        _ => Err(TransactionError::invalid_structure(format!(
            "block {} has unexpected children",
            id
        ))),
    }
}
