//! # Block operations
//!
//! The four structural operations, each building exactly one transaction
//! against the given tree and committing it once. A failed operation never
//! commits, so the input tree is the state callers keep.
//!
//! ## Batch removal
//!
//! [`remove_blocks_with`] walks the *original* tree in document order and
//! deletes matched blocks from the transaction's draft as it goes. Every
//! deletion shrinks the draft, so a block found at original position `pos`
//! sits at `pos - removed_size` in the draft, where `removed_size` is the net
//! size the transaction has lost so far. The delta is measured on the draft
//! around each edit rather than computed from node sizes, which keeps it
//! right when a [`MatchHook`] inserts content into the same transaction.

use crate::block::{PartialBlock, Placement};
use crate::convert::NodeConverter;
use crate::errors::{EditorError, EditorResult};
use crate::identifier::BlockIdentifier;
use crate::locator::locate;
use crate::patch::ContentPatcher;
use blocktree_model::{BlockId, Node, Transaction, TransactionError, Tree, Visit};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Extra edit applied when a block is matched for removal, before its
/// deletion range is computed.
///
/// Receives the matched node, its position in the original tree, the shared
/// transaction and the running `removed_size`; returns the updated
/// `removed_size`. Content a hook inserts counts negatively.
pub trait MatchHook {
    fn on_match(
        &mut self,
        node: &Node,
        pos: usize,
        tx: &mut Transaction,
        removed_size: isize,
    ) -> EditorResult<isize>;
}

impl<F> MatchHook for F
where
    F: FnMut(&Node, usize, &mut Transaction, isize) -> EditorResult<isize>,
{
    fn on_match(
        &mut self,
        node: &Node,
        pos: usize,
        tx: &mut Transaction,
        removed_size: isize,
    ) -> EditorResult<isize> {
        self(node, pos, tx, removed_size)
    }
}

/// Position in the draft of something found at `pos` in the original tree
pub fn shifted(pos: usize, removed_size: isize) -> EditorResult<usize> {
    let shifted = pos as isize - removed_size;
    usize::try_from(shifted).map_err(|_| {
        TransactionError::invalid_structure(format!(
            "position {} shifted by {} leaves the document",
            pos, removed_size
        ))
        .into()
    })
}

/// Insert `blocks` before, after, or nested inside `reference`
#[instrument(skip_all, fields(reference = %reference, placement = ?placement, count = blocks.len()))]
pub fn insert_blocks<C>(
    tree: &Tree,
    blocks: &[PartialBlock],
    reference: &BlockIdentifier,
    placement: Placement,
    converter: &mut C,
) -> EditorResult<Tree>
where
    C: NodeConverter + ?Sized,
{
    let located = locate(tree, reference.as_str())?;
    let nodes = converter.blocks_to_nodes(blocks)?;
    if nodes.is_empty() {
        return Ok(tree.clone());
    }

    let pos = located.pos_before_node;
    let mut tx = Transaction::new(tree);

    match placement {
        Placement::Before => tx.insert(pos, nodes)?,
        Placement::After => tx.insert(pos + located.node.size(), nodes)?,
        Placement::Nested => {
            let content_size = located.node.first_child().map(Node::size).ok_or_else(|| {
                TransactionError::invalid_structure(format!("block {} has no content", reference))
            })?;

            if located.node.child_count() < 2 {
                // No nested blocks yet: wrap them in a new group after the content
                tx.insert(pos + content_size + 1, vec![Node::group(nodes)])?;
            } else {
                tx.insert(pos + content_size + 2, nodes)?;
            }
        }
    }

    debug!(pos, "blocks inserted");
    Ok(tx.commit()?)
}

/// Patch one block through `patcher`
#[instrument(skip_all, fields(block = %block))]
pub fn update_block<P>(
    tree: &Tree,
    block: &BlockIdentifier,
    patch: &PartialBlock,
    patcher: &mut P,
) -> EditorResult<Tree>
where
    P: ContentPatcher + ?Sized,
{
    let located = locate(tree, block.as_str())?;

    let mut tx = Transaction::new(tree);
    patcher.patch_node_at(&mut tx, located.pos_before_node + 1, patch)?;

    Ok(tx.commit()?)
}

/// Remove every listed block in one transaction
pub fn remove_blocks(tree: &Tree, blocks: &[BlockIdentifier]) -> EditorResult<Tree> {
    let mut keep_size =
        |_: &Node, _: usize, _: &mut Transaction, removed_size: isize| -> EditorResult<isize> { Ok(removed_size) };
    remove_blocks_with(tree, blocks, &mut keep_size)
}

/// Remove every listed block in one transaction, running `hook` on each
/// match first.
///
/// Listing an id more than once is the same as listing it once. A listed
/// block nested inside another listed block is never visited and is
/// reported as not found. On `BlocksNotFound` nothing is committed.
#[instrument(skip_all, fields(count = blocks.len()))]
pub fn remove_blocks_with<H>(tree: &Tree, blocks: &[BlockIdentifier], hook: &mut H) -> EditorResult<Tree>
where
    H: MatchHook + ?Sized,
{
    let mut pending: HashSet<&str> = blocks.iter().map(BlockIdentifier::as_str).collect();
    let mut tx = Transaction::new(tree);
    let mut removed_size: isize = 0;
    let mut failure = None;

    tree.descendants(|node, pos| {
        if pending.is_empty() {
            return Visit::Stop;
        }

        let Some(id) = node.block_id().filter(|id| pending.contains(id.as_str())) else {
            return Visit::Descend;
        };

        match remove_matched(node, pos, &mut tx, removed_size, &mut *hook) {
            Ok(size) => {
                removed_size = size;
                pending.remove(id.as_str());
                debug!(%id, pos, removed_size, "block removed");
                Visit::Skip
            }
            Err(err) => {
                failure = Some(err);
                Visit::Stop
            }
        }
    });

    if let Some(err) = failure {
        return Err(err);
    }

    if !pending.is_empty() {
        let mut missing: Vec<BlockId> = Vec::new();
        for block in blocks {
            if pending.remove(block.as_str()) {
                missing.push(block.id().clone());
            }
        }
        return Err(EditorError::BlocksNotFound(missing));
    }

    Ok(tx.commit()?)
}

fn remove_matched<H>(
    node: &Node,
    pos: usize,
    tx: &mut Transaction,
    removed_size: isize,
    hook: &mut H,
) -> EditorResult<isize>
where
    H: MatchHook + ?Sized,
{
    let removed_size = hook.on_match(node, pos, tx, removed_size)?;

    // One unit of margin on each side takes the surrounding boundaries along
    // when the block is the only child of a nested group. The top-level
    // group's boundaries are not addressable, so clip to the document.
    let start = shifted(pos, removed_size)?;
    let from = start.saturating_sub(1);
    let to = (start + node.size() + 1).min(tx.size());

    let size_before = tx.size();
    tx.delete(from, to)?;
    Ok(removed_size + (size_before - tx.size()) as isize)
}

/// Remove every listed block and put `blocks` where the first listed one was
#[instrument(skip_all, fields(count = remove.len(), inserted = blocks.len()))]
pub fn replace_blocks<C>(
    tree: &Tree,
    remove: &[BlockIdentifier],
    blocks: &[PartialBlock],
    converter: &mut C,
) -> EditorResult<Tree>
where
    C: NodeConverter + ?Sized,
{
    let anchor = remove.first().ok_or_else(|| {
        EditorError::InvalidArgument("replacing blocks requires at least one block to remove".to_string())
    })?;
    let mut nodes = Some(converter.blocks_to_nodes(blocks)?);

    let mut insert_at_anchor = |node: &Node, pos: usize, tx: &mut Transaction, removed_size: isize| -> EditorResult<isize> {
        if node.block_id() != Some(anchor.id()) {
            return Ok(removed_size);
        }
        let Some(nodes) = nodes.take() else {
            return Ok(removed_size);
        };

        let size_before = tx.size();
        tx.insert(shifted(pos, removed_size)?, nodes)?;
        Ok(removed_size - (tx.size() - size_before) as isize)
    };

    remove_blocks_with(tree, remove, &mut insert_at_anchor)
}
