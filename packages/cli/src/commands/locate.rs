use super::{load_document, resolve};
use crate::config::Config;
use anyhow::Result;
use blocktree_editor::Block;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Document to search
    pub document: String,

    /// Block id to locate
    pub id: String,
}

pub fn locate(args: LocateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = load_document(&resolve(cwd, &args.document), &config)?;

    let located = blocktree_editor::locate(editor.tree(), &args.id)?;
    let nested = located
        .node
        .nested_group()
        .map(|group| group.child_count())
        .unwrap_or(0);

    println!("{} {}", "✓".green(), args.id.bright_white().bold());
    println!("  position: {}", located.pos_before_node);
    println!("  size:     {}", located.node.size());
    println!("  end:      {}", located.pos_before_node + located.node.size());
    println!("  nested:   {}", nested);

    if let Some(block) = Block::from_node(located.node) {
        println!("  type:     {}", block.block_type.cyan());
    }

    Ok(())
}
