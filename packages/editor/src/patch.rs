//! # Content patching
//!
//! `update_block` only resolves where a block lives; what an update means is
//! decided by a [`ContentPatcher`]. The schema converter's merge rules:
//!
//! - `type` switches the block type. The new type starts from its defaults and
//!   keeps the old values of props it also declares.
//! - `props` overwrite one by one.
//! - `content` replaces the inline text.
//! - `children: None` keeps nested blocks, `Some([])` drops them and any other
//!   list replaces them.
//! - `id` is ignored.

use crate::block::PartialBlock;
use crate::convert::{NodeConverter, SchemaConverter};
use crate::errors::EditorResult;
use blocktree_model::{Content, Node, NodeKind, Transaction, TransactionError};

pub trait ContentPatcher {
    /// Patch the block whose content starts at `pos`, one unit inside the
    /// block container's opening boundary.
    fn patch_node_at(&mut self, tx: &mut Transaction, pos: usize, patch: &PartialBlock) -> EditorResult<()>;
}

impl ContentPatcher for SchemaConverter {
    fn patch_node_at(&mut self, tx: &mut Transaction, pos: usize, patch: &PartialBlock) -> EditorResult<()> {
        let container_pos = pos.checked_sub(1).ok_or(TransactionError::NoNodeAt { pos })?;
        let container = tx
            .doc()
            .node_at(container_pos)
            .cloned()
            .ok_or(TransactionError::NoNodeAt { pos: container_pos })?;

        let id = match container.kind() {
            NodeKind::Container { id } => id.clone(),
            _ => {
                return Err(TransactionError::invalid_structure(format!(
                    "expected a block container at {}, found {}",
                    container_pos,
                    container.kind_name()
                ))
                .into())
            }
        };
        let current = container
            .block_content()
            .ok_or_else(|| TransactionError::invalid_structure(format!("block {} has no content", id)))?;

        let content = self.patch_content(current, patch)?;

        let nested = match &patch.children {
            Some(children) => self.blocks_to_nodes(children)?,
            None => container
                .nested_group()
                .map(|group| group.children().to_vec())
                .unwrap_or_default(),
        };

        tx.replace_node(container_pos, Node::container(id, content, nested))?;
        Ok(())
    }
}

impl SchemaConverter {
    fn patch_content(&self, current: &Content, patch: &PartialBlock) -> EditorResult<Content> {
        let block_type = patch
            .block_type
            .clone()
            .unwrap_or_else(|| current.block_type.clone());

        let mut props = if block_type == current.block_type {
            current.props.clone()
        } else {
            let mut props = self.type_spec(&block_type)?.props.clone();
            for (name, value) in props.iter_mut() {
                if let Some(old) = current.props.get(name) {
                    *value = old.clone();
                }
            }
            props
        };
        self.merge_props(&block_type, &mut props, &patch.props)?;

        let text = patch.content.clone().unwrap_or_else(|| current.text.clone());
        self.check_text(&block_type, &text)?;

        Ok(Content {
            block_type,
            props,
            text,
        })
    }
}
