//! # Block → node conversion
//!
//! Operations never build tree nodes themselves; they hand each
//! [`PartialBlock`] to a [`NodeConverter`]. [`SchemaConverter`] is the
//! converter shipped with the editor: it fills in defaults from a [`Schema`],
//! validates props, and issues ids for blocks that arrive without one.

use crate::block::PartialBlock;
use crate::schema::{value_kind, BlockTypeSpec, Schema};
use blocktree_model::{BlockId, Content, IdGenerator, Node, Props};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block type {block_type} has no prop named {prop}")]
    UnknownProp { block_type: String, prop: String },

    #[error("Prop {prop} of block type {block_type} expects a {expected} value")]
    InvalidPropValue {
        block_type: String,
        prop: String,
        expected: &'static str,
    },

    #[error("Block type {0} does not hold inline content")]
    ContentNotAllowed(String),

    #[error("No block ids left to generate for seed {0}")]
    IdsExhausted(String),
}

/// Turns block descriptions into tree nodes
pub trait NodeConverter {
    fn block_to_node(&mut self, block: &PartialBlock) -> Result<Node, ConversionError>;

    /// Convert a list of blocks, preserving order
    fn blocks_to_nodes(&mut self, blocks: &[PartialBlock]) -> Result<Vec<Node>, ConversionError> {
        blocks.iter().map(|block| self.block_to_node(block)).collect()
    }
}

/// Schema-aware converter and patcher
#[derive(Debug, Clone)]
pub struct SchemaConverter {
    schema: Schema,
    ids: IdGenerator,
}

impl SchemaConverter {
    pub fn new(schema: Schema, ids: IdGenerator) -> Self {
        Self { schema, ids }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Keep generated ids clear of ids that already exist
    pub fn reserve_ids<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a BlockId>,
    {
        for id in ids {
            self.ids.reserve(id);
        }
    }

    /// Reserve every explicit id in a list of descriptions, nested ones included
    pub fn reserve_block_ids(&mut self, blocks: &[PartialBlock]) {
        for block in blocks {
            if let Some(id) = &block.id {
                self.ids.reserve(id);
            }
            if let Some(children) = &block.children {
                self.reserve_block_ids(children);
            }
        }
    }

    pub(crate) fn type_spec(&self, block_type: &str) -> Result<&BlockTypeSpec, ConversionError> {
        self.schema
            .get(block_type)
            .ok_or_else(|| ConversionError::UnknownBlockType(block_type.to_string()))
    }

    /// Write `updates` over `props`, checking each against the type's spec
    pub(crate) fn merge_props(
        &self,
        block_type: &str,
        props: &mut Props,
        updates: &Props,
    ) -> Result<(), ConversionError> {
        let spec = self.type_spec(block_type)?;

        for (name, value) in updates {
            let default = spec.props.get(name).ok_or_else(|| ConversionError::UnknownProp {
                block_type: block_type.to_string(),
                prop: name.clone(),
            })?;

            let expected = value_kind(default);
            if !default.is_null() && value_kind(value) != expected {
                return Err(ConversionError::InvalidPropValue {
                    block_type: block_type.to_string(),
                    prop: name.clone(),
                    expected,
                });
            }

            props.insert(name.clone(), value.clone());
        }

        Ok(())
    }

    pub(crate) fn check_text(&self, block_type: &str, text: &str) -> Result<(), ConversionError> {
        if !text.is_empty() && !self.type_spec(block_type)?.inline_content {
            return Err(ConversionError::ContentNotAllowed(block_type.to_string()));
        }
        Ok(())
    }
}

impl NodeConverter for SchemaConverter {
    fn block_to_node(&mut self, block: &PartialBlock) -> Result<Node, ConversionError> {
        let block_type = block
            .block_type
            .clone()
            .unwrap_or_else(|| self.schema.default_type.clone());

        let mut props = self.type_spec(&block_type)?.props.clone();
        self.merge_props(&block_type, &mut props, &block.props)?;

        let text = block.content.clone().unwrap_or_default();
        self.check_text(&block_type, &text)?;

        let id = match &block.id {
            Some(id) => {
                self.ids.reserve(id);
                id.clone()
            }
            None => self
                .ids
                .next_id()
                .ok_or_else(|| ConversionError::IdsExhausted(self.ids.seed().to_string()))?,
        };

        let nested = match &block.children {
            Some(children) => self.blocks_to_nodes(children)?,
            None => Vec::new(),
        };

        Ok(Node::container(
            id,
            Content {
                block_type,
                props,
                text,
            },
            nested,
        ))
    }

    /// Explicit ids anywhere in the list are reserved before any id is generated
    fn blocks_to_nodes(&mut self, blocks: &[PartialBlock]) -> Result<Vec<Node>, ConversionError> {
        self.reserve_block_ids(blocks);
        blocks.iter().map(|block| self.block_to_node(block)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn converter() -> SchemaConverter {
        SchemaConverter::new(Schema::default(), IdGenerator::from_seed("doc".to_string()))
    }

    #[test]
    fn test_defaults_and_generated_ids() {
        let mut converter = converter();
        let node = converter.block_to_node(&PartialBlock::default()).unwrap();

        assert_eq!(node.block_id(), Some(&BlockId::new("doc-1")));
        let content = node.block_content().unwrap();
        assert_eq!(content.block_type, "paragraph");
        assert_eq!(content.props["textAlignment"], "left");
        assert_eq!(content.text, "");
    }

    #[test]
    fn test_nested_children_become_a_group() {
        let mut converter = converter();
        let block = PartialBlock::paragraph("parent")
            .with_id("p")
            .with_children(vec![PartialBlock::paragraph("child")]);

        let node = converter.block_to_node(&block).unwrap();
        let group = node.nested_group().unwrap();
        assert_eq!(group.child_count(), 1);
        assert_eq!(group.children()[0].block_id(), Some(&BlockId::new("doc-1")));
    }

    #[test]
    fn test_rejects_unknown_type_and_props() {
        let mut converter = converter();

        assert_eq!(
            converter.block_to_node(&PartialBlock::new("table")),
            Err(ConversionError::UnknownBlockType("table".to_string()))
        );
        assert!(matches!(
            converter.block_to_node(&PartialBlock::paragraph("").with_prop("level", 2)),
            Err(ConversionError::UnknownProp { .. })
        ));
        assert_eq!(
            converter.block_to_node(&PartialBlock::new("heading").with_prop("level", json!("two"))),
            Err(ConversionError::InvalidPropValue {
                block_type: "heading".to_string(),
                prop: "level".to_string(),
                expected: "number",
            })
        );
        assert_eq!(
            converter.block_to_node(&PartialBlock::new("image").with_content("alt")),
            Err(ConversionError::ContentNotAllowed("image".to_string()))
        );
    }

    #[test]
    fn test_reserved_ids_are_skipped() {
        let mut converter = converter();
        converter.reserve_block_ids(&[PartialBlock::default()
            .with_id("doc-4")
            .with_children(vec![PartialBlock::default().with_id("doc-9")])]);

        let node = converter.block_to_node(&PartialBlock::default()).unwrap();
        assert_eq!(node.block_id(), Some(&BlockId::new("doc-10")));
    }

    #[test]
    fn test_explicit_ids_are_reserved_while_converting() {
        let mut converter = converter();

        converter.block_to_node(&PartialBlock::default().with_id("doc-2")).unwrap();
        let generated = converter.block_to_node(&PartialBlock::default()).unwrap();
        assert_eq!(generated.block_id(), Some(&BlockId::new("doc-3")));

        // An explicit id later in the same list is not handed out first
        let nodes = converter
            .blocks_to_nodes(&[PartialBlock::default(), PartialBlock::default().with_id("doc-4")])
            .unwrap();
        assert_eq!(nodes[0].block_id(), Some(&BlockId::new("doc-5")));
        assert_eq!(nodes[1].block_id(), Some(&BlockId::new("doc-4")));
    }

    #[test]
    fn test_exhausted_ids() {
        let mut converter = converter();
        converter.reserve_ids([&BlockId::new(format!("doc-{}", u32::MAX))]);

        assert_eq!(
            converter.block_to_node(&PartialBlock::default()),
            Err(ConversionError::IdsExhausted("doc".to_string()))
        );
    }
}
