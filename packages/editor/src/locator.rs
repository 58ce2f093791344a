use crate::errors::{EditorError, EditorResult};
use blocktree_model::{BlockId, Node, Tree, Visit};
use tracing::trace;

/// A block container together with the position right before it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub node: &'a Node,
    pub pos_before_node: usize,
}

/// Depth-first search for the container carrying `id`
pub fn find<'a>(tree: &'a Tree, id: &str) -> Option<Located<'a>> {
    let mut found = None;

    tree.descendants(|node, pos| {
        if node.block_id().is_some_and(|block_id| block_id.as_str() == id) {
            found = Some(Located {
                node,
                pos_before_node: pos,
            });
            return Visit::Stop;
        }
        Visit::Descend
    });

    if let Some(located) = &found {
        trace!(id, pos = located.pos_before_node, "located block");
    }
    found
}

/// Like [`find`], failing with `NotFound` when no block carries `id`
pub fn locate<'a>(tree: &'a Tree, id: &str) -> EditorResult<Located<'a>> {
    find(tree, id).ok_or_else(|| EditorError::NotFound(BlockId::from(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocktree_model::Content;

    fn block(id: &str, text: &str, nested: Vec<Node>) -> Node {
        Node::container(id, Content::new("paragraph").with_text(text), nested)
    }

    fn sample() -> Tree {
        // a: 0..5, b: 5..17 (content 6..9, group 9..16, c at 10), d: 17..21
        Tree::from_blocks(vec![
            block("a", "x", vec![]),
            block("b", "y", vec![block("c", "z", vec![])]),
            block("d", "", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_locates_top_level_and_nested_blocks() {
        let tree = sample();

        assert_eq!(locate(&tree, "a").unwrap().pos_before_node, 0);
        assert_eq!(locate(&tree, "b").unwrap().pos_before_node, 5);
        assert_eq!(locate(&tree, "c").unwrap().pos_before_node, 10);
        assert_eq!(locate(&tree, "d").unwrap().pos_before_node, 17);

        let located = locate(&tree, "b").unwrap();
        assert_eq!(located.node.block_id(), Some(&BlockId::new("b")));
        assert_eq!(tree.node_at(located.pos_before_node), Some(located.node));
    }

    #[test]
    fn test_missing_block() {
        let tree = sample();
        assert_eq!(
            locate(&tree, "zz"),
            Err(EditorError::NotFound(BlockId::new("zz")))
        );
        assert!(find(&Tree::empty(), "a").is_none());
    }
}
