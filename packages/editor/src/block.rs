//! Block descriptions and read views
//!
//! [`PartialBlock`] describes blocks to insert and patches to apply;
//! [`Block`] is the read view of a block subtree in a committed tree.

use blocktree_model::{BlockId, Node, Props, Tree};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where inserted blocks land relative to the reference block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Before,
    After,
    Nested,
}

/// Block description with every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,

    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    /// Inline text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PartialBlock>>,
}

impl PartialBlock {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: Some(block_type.into()),
            ..Self::default()
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new("paragraph").with_content(text)
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<PartialBlock>) -> Self {
        self.children = Some(children);
        self
    }
}

/// Read view of one block and its nested blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    /// View of a container node; `None` for groups and content nodes
    pub fn from_node(node: &Node) -> Option<Self> {
        let id = node.block_id()?.clone();
        let content = node.block_content()?;
        let children = node
            .nested_group()
            .map(|group| group.children().iter().filter_map(Block::from_node).collect())
            .unwrap_or_default();

        Some(Self {
            id,
            block_type: content.block_type.clone(),
            props: content.props.clone(),
            content: content.text.clone(),
            children,
        })
    }
}

impl From<Block> for PartialBlock {
    fn from(block: Block) -> Self {
        Self {
            id: Some(block.id),
            block_type: Some(block.block_type),
            props: block.props,
            content: Some(block.content),
            children: Some(block.children.into_iter().map(PartialBlock::from).collect()),
        }
    }
}

/// Top-level blocks of a tree
pub fn blocks(tree: &Tree) -> Vec<Block> {
    tree.top_level().iter().filter_map(Block::from_node).collect()
}
