pub mod apply;
pub mod init;
pub mod locate;
pub mod show;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use locate::{locate, LocateArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use blocktree_editor::{BlockEditor, PartialBlock};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a command path against the working directory
pub(crate) fn resolve(cwd: &str, path: &str) -> PathBuf {
    PathBuf::from(cwd).join(path)
}

/// Read a document (a JSON array of blocks) into an editor
pub(crate) fn load_document(path: &Path, config: &Config) -> Result<BlockEditor> {
    let content = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let blocks: Vec<PartialBlock> =
        serde_json::from_str(&content).with_context(|| format!("Invalid document {}", path.display()))?;

    let editor = BlockEditor::from_blocks(&blocks, config.converter_for(path))?;
    Ok(editor.with_undo_levels(config.undo_levels))
}

pub(crate) fn document_json(editor: &BlockEditor) -> Result<String> {
    Ok(serde_json::to_string_pretty(&editor.document())?)
}
