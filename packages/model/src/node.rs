use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Schema-defined block properties
pub type Props = BTreeMap<String, Value>;

/// Stable identifier of a block container
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

/// A block's own content: its type, props and inline text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub text: String,
}

impl Content {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            props: Props::new(),
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }
}

/// Node variants
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Addressable block wrapper ("blockContainer")
    Container { id: BlockId },
    /// Ordered list of nested containers ("blockGroup")
    Group,
    /// Leaf holding the block's content ("blockContent")
    Content(Content),
}

/// Result of visiting one node during [`Node::descendants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Walk into the node's children next
    Descend,
    /// Continue with the node's next sibling
    Skip,
    /// End the traversal
    Stop,
}

/// Immutable, reference-counted tree node with a cached size.
///
/// Cloning is cheap; edits build new nodes and share untouched subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Node(Arc<NodeData>);

#[derive(Debug, PartialEq)]
struct NodeData {
    kind: NodeKind,
    children: Vec<Node>,
    size: usize,
}

impl Node {
    fn from_parts(kind: NodeKind, children: Vec<Node>) -> Self {
        let size = match &kind {
            NodeKind::Content(content) => content.text.chars().count() + 2,
            NodeKind::Container { .. } | NodeKind::Group => {
                children.iter().map(Node::size).sum::<usize>() + 2
            }
        };
        Self(Arc::new(NodeData {
            kind,
            children,
            size,
        }))
    }

    /// Leaf content node
    pub fn content(content: Content) -> Self {
        Self::from_parts(NodeKind::Content(content), Vec::new())
    }

    /// Group wrapping the given containers
    pub fn group(children: Vec<Node>) -> Self {
        Self::from_parts(NodeKind::Group, children)
    }

    /// Block container. Nested blocks, when present, are wrapped in a group.
    pub fn container(id: impl Into<BlockId>, content: Content, nested: Vec<Node>) -> Self {
        let mut children = vec![Node::content(content)];
        if !nested.is_empty() {
            children.push(Node::group(nested));
        }
        Self::from_parts(NodeKind::Container { id: id.into() }, children)
    }

    /// Same node with a different child list
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Self {
        Self::from_parts(self.0.kind.clone(), children)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            NodeKind::Container { .. } => "blockContainer",
            NodeKind::Group => "blockGroup",
            NodeKind::Content(_) => "blockContent",
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.0.children.first()
    }

    /// Number of position units this node spans, boundaries included
    pub fn size(&self) -> usize {
        self.0.size
    }

    /// Number of position units between this node's boundaries
    pub fn content_size(&self) -> usize {
        self.0.size - 2
    }

    pub fn block_id(&self) -> Option<&BlockId> {
        match self.kind() {
            NodeKind::Container { id } => Some(id),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind(), NodeKind::Container { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind(), NodeKind::Group)
    }

    pub fn is_content(&self) -> bool {
        matches!(self.kind(), NodeKind::Content(_))
    }

    /// Content of a content node, or of a container's content child
    pub fn block_content(&self) -> Option<&Content> {
        match self.kind() {
            NodeKind::Content(content) => Some(content),
            NodeKind::Container { .. } => self.first_child().and_then(Node::block_content),
            NodeKind::Group => None,
        }
    }

    /// A container's nested group, if it has one
    pub fn nested_group(&self) -> Option<&Node> {
        match self.kind() {
            NodeKind::Container { .. } => self.children().get(1).filter(|child| child.is_group()),
            _ => None,
        }
    }

    /// Pre-order walk over all descendants.
    ///
    /// `pos` handed to the visitor is the offset before the visited node,
    /// counted from the start of this node's content.
    pub fn descendants<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node, usize) -> Visit,
    {
        self.walk(0, &mut visit);
    }

    fn walk<'a, F>(&'a self, start: usize, visit: &mut F) -> bool
    where
        F: FnMut(&'a Node, usize) -> Visit,
    {
        let mut pos = start;
        for child in self.children() {
            match visit(child, pos) {
                Visit::Stop => return false,
                Visit::Descend => {
                    if !child.walk(pos + 1, visit) {
                        return false;
                    }
                }
                Visit::Skip => {}
            }
            pos += child.size();
        }
        true
    }

    /// The descendant starting exactly at `pos` (relative to this node's content)
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut offset = 0;
        for child in self.children() {
            if pos == offset {
                return Some(child);
            }
            let end = offset + child.size();
            if pos < end {
                return child.node_at(pos - offset - 1);
            }
            offset = end;
        }
        None
    }
}
