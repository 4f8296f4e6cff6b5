//! Text dump of a tree
//!
//! Writes the root on the first line, then every child in child-list order,
//! one node per line, with branch glyphs showing the nesting.

use std::fmt::Debug;

use tracing::{span, trace, Level};

use super::Tree;
use crate::btree::BTree;
use crate::core::{BranchChars, HasParent, Label, NodeId, RenderConfig, Renderer, Result};

/// Diagnostic renderer for trees and B-Trees
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn line<N: HasParent + Label>(&self, node: &N) -> String {
        if self.config.show_ids {
            format!("{} ({})", node.label(), node.id().short())
        } else {
            node.label()
        }
    }

    fn render_tree<N: HasParent + Label>(&self, tree: &Tree<N>) -> String {
        let _span = span!(Level::DEBUG, "render_tree", nodes = tree.len()).entered();
        let Some(root) = tree.root_node() else {
            return String::new();
        };

        let glyphs = BranchChars::for_charset(self.config.charset);
        let mut output = self.line(root);
        output.push('\n');

        // (node, prefix drawn before its branch glyph, is last sibling)
        let mut stack: Vec<(NodeId, String, bool)> = Vec::new();
        push_children(&mut stack, root.children(), String::new());
        while let Some((id, prefix, is_last)) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            output.push_str(&prefix);
            output.push_str(glyphs.branch(is_last));
            output.push_str(&self.line(node));
            output.push('\n');

            let child_prefix = format!("{}{}", prefix, glyphs.continuation(is_last));
            push_children(&mut stack, node.children(), child_prefix);
        }
        trace!(bytes = output.len(), "Rendered tree");
        output
    }
}

/// Push children so that the first child is popped first
fn push_children(stack: &mut Vec<(NodeId, String, bool)>, children: &[NodeId], prefix: String) {
    let last = children.len().saturating_sub(1);
    for (index, &child) in children.iter().enumerate().rev() {
        stack.push((child, prefix.clone(), index == last));
    }
}

impl<N: HasParent + Label> Renderer<Tree<N>> for TreeRenderer {
    type Output = String;

    fn render(&self, tree: &Tree<N>) -> Result<Self::Output> {
        Ok(self.render_tree(tree))
    }

    fn name(&self) -> &'static str {
        "tree"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

impl<K: Debug> Renderer<BTree<K>> for TreeRenderer {
    type Output = String;

    fn render(&self, tree: &BTree<K>) -> Result<Self::Output> {
        Ok(self.render_tree(tree.tree()))
    }

    fn name(&self) -> &'static str {
        "btree"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CharacterSet, SequentialIds};

    fn btree(keys: &[i32]) -> BTree<i32> {
        let mut tree = BTree::builder(2).ids(SequentialIds::new()).build().unwrap();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let output = TreeRenderer::new().render(&btree(&[])).unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn test_unicode_layout() {
        let tree = btree(&[10, 20, 5, 6, 12]);
        let output = TreeRenderer::new().render(&tree).unwrap();
        assert_eq!(output, "[10]\n├── [5, 6]\n└── [12, 20]\n");
    }

    #[test]
    fn test_ascii_layout_nested() {
        let tree = btree(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let config = RenderConfig::default().with_charset(CharacterSet::Ascii);
        let output = TreeRenderer::with_config(config).render(&tree).unwrap();
        let expected = "\
[4]
+-- [2]
|   +-- [1]
|   `-- [3]
`-- [6, 8]
    +-- [5]
    +-- [7]
    `-- [9, 10]
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_show_ids_appends_short_id() {
        let tree = btree(&[1]);
        let config = RenderConfig::default().with_ids(true);
        let output = TreeRenderer::with_config(config).render(&tree).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(output, format!("[1] ({})\n", root.short()));
    }
}
