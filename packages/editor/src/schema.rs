//! Block schema: which block types exist and which props they accept

use blocktree_model::Props;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Block types known to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Type given to blocks that do not name one
    #[serde(default = "default_block_type")]
    pub default_type: String,

    #[serde(default = "default_block_types")]
    pub block_types: BTreeMap<String, BlockTypeSpec>,
}

/// Spec of one block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeSpec {
    /// Accepted props with their default values
    #[serde(default)]
    pub props: Props,

    /// Whether the block carries inline text
    #[serde(default = "default_inline_content")]
    pub inline_content: bool,
}

impl BlockTypeSpec {
    pub fn new(props: Props) -> Self {
        Self {
            props,
            inline_content: true,
        }
    }
}

fn default_block_type() -> String {
    "paragraph".to_string()
}

fn default_inline_content() -> bool {
    true
}

fn text_props() -> Props {
    let mut props = Props::new();
    props.insert("textAlignment".to_string(), json!("left"));
    props.insert("textColor".to_string(), json!("default"));
    props.insert("backgroundColor".to_string(), json!("default"));
    props
}

fn default_block_types() -> BTreeMap<String, BlockTypeSpec> {
    let mut types = BTreeMap::new();

    types.insert("paragraph".to_string(), BlockTypeSpec::new(text_props()));
    types.insert("bulletListItem".to_string(), BlockTypeSpec::new(text_props()));
    types.insert("numberedListItem".to_string(), BlockTypeSpec::new(text_props()));

    let mut heading = text_props();
    heading.insert("level".to_string(), json!(1));
    types.insert("heading".to_string(), BlockTypeSpec::new(heading));

    let mut image = Props::new();
    image.insert("url".to_string(), json!(""));
    image.insert("caption".to_string(), json!(""));
    image.insert("width".to_string(), json!(512));
    types.insert(
        "image".to_string(),
        BlockTypeSpec {
            props: image,
            inline_content: false,
        },
    );

    types
}

impl Schema {
    pub fn get(&self, block_type: &str) -> Option<&BlockTypeSpec> {
        self.block_types.get(block_type)
    }

    /// Add or replace a block type
    pub fn with_type(mut self, name: impl Into<String>, spec: BlockTypeSpec) -> Self {
        self.block_types.insert(name.into(), spec);
        self
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            default_type: default_block_type(),
            block_types: default_block_types(),
        }
    }
}

/// JSON type name used when checking prop values against their defaults
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
