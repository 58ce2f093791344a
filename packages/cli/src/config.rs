use blocktree_editor::{IdGenerator, Schema, SchemaConverter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "blocktree.config.json";

/// Blocktree configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Block types documents may use
    #[serde(default)]
    pub schema: Schema,

    /// Seed for generated block ids (defaults to the document file name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,

    /// Undo levels kept per editing session (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,
}

fn default_undo_levels() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Converter for one document, seeding generated ids from the configured
    /// seed or the document's file name
    pub fn converter_for(&self, document: &Path) -> SchemaConverter {
        let name = match &self.id_seed {
            Some(seed) => seed.clone(),
            None => document
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        SchemaConverter::new(self.schema.clone(), IdGenerator::new(&name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            id_seed: None,
            undo_levels: default_undo_levels(),
        }
    }
}
