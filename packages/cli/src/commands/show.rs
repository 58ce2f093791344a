use super::{load_document, resolve};
use crate::config::Config;
use anyhow::Result;
use blocktree_editor::{Node, Tree};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document to print
    pub document: String,

    /// Print the document as JSON instead of an outline
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = load_document(&resolve(cwd, &args.document), &config)?;

    if args.json {
        println!("{}", super::document_json(&editor)?);
        return Ok(());
    }

    let lines = outline(editor.tree());
    if lines.is_empty() {
        println!("{}", "(empty document)".dimmed());
    }
    for line in lines {
        println!("{}", line.render());
    }
    println!(
        "{} block(s), size {}",
        editor.tree().container_count(),
        editor.tree().size()
    );

    Ok(())
}

/// One block of the outline
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OutlineLine {
    pub depth: usize,
    pub id: String,
    pub block_type: String,
    pub pos: usize,
    pub size: usize,
    pub text: String,
}

impl OutlineLine {
    fn render(&self) -> String {
        format!(
            "{}{} {} {} {}",
            "  ".repeat(self.depth),
            self.id.bright_white().bold(),
            self.block_type.cyan(),
            format!("@{}+{}", self.pos, self.size).dimmed(),
            format!("{:?}", self.text)
        )
    }
}

pub(crate) fn outline(tree: &Tree) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    collect(tree.top_level(), 0, 0, &mut lines);
    lines
}

fn collect(nodes: &[Node], start: usize, depth: usize, lines: &mut Vec<OutlineLine>) {
    let mut offset = start;

    for node in nodes {
        if let (Some(id), Some(content)) = (node.block_id(), node.block_content()) {
            lines.push(OutlineLine {
                depth,
                id: id.to_string(),
                block_type: content.block_type.clone(),
                pos: offset,
                size: node.size(),
                text: content.text.clone(),
            });
        }

        if let (Some(first), Some(group)) = (node.first_child(), node.nested_group()) {
            // container boundary, content, group boundary
            collect(group.children(), offset + 1 + first.size() + 1, depth + 1, lines);
        }

        offset += node.size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocktree_editor::{locate, Content};

    #[test]
    fn test_outline_positions_match_locator() {
        let nested = Node::container("c", Content::new("paragraph").with_text("z"), vec![]);
        let tree = Tree::from_blocks(vec![
            Node::container("a", Content::new("heading").with_text("x"), vec![]),
            Node::container("b", Content::new("paragraph").with_text("y"), vec![nested]),
            Node::container("d", Content::new("paragraph"), vec![]),
        ])
        .unwrap();

        let lines = outline(&tree);
        let ids: Vec<(&str, usize)> = lines.iter().map(|line| (line.id.as_str(), line.depth)).collect();
        assert_eq!(ids, vec![("a", 0), ("b", 0), ("c", 1), ("d", 0)]);

        for line in &lines {
            let located = locate(&tree, &line.id).unwrap();
            assert_eq!(line.pos, located.pos_before_node);
            assert_eq!(line.size, located.node.size());
        }
        assert_eq!(lines[0].block_type, "heading");
    }
}
