//! B-Tree invariant checking

use super::{BTree, HasKeys};
use crate::core::{GraphError, HasParent, NodeId, Result};

/// What a recursive check learned about one subtree
struct Summary {
    leaf_depth: usize,
    keys: usize,
    nodes: usize,
}

impl<K> BTree<K> {
    /// Check every structural invariant, reporting the first violation
    ///
    /// Keys must be in non-decreasing comparator order within each node
    /// and across separators, every node must hold at most `2t - 1` keys
    /// and every non-root node at least `t - 1`, internal nodes must have
    /// one more child than keys, and all leaves must sit at the same depth.
    /// Tree links, node count and the cached length are checked as well.
    pub fn validate(&self) -> Result<()> {
        self.tree.check_links()?;

        let Some(root) = self.tree.root() else {
            if self.len != 0 || !self.tree.is_empty() {
                return Err(GraphError::invariant(format!(
                    "Tree has no root but holds {} keys in {} nodes",
                    self.len,
                    self.tree.len()
                )));
            }
            return Ok(());
        };

        let summary = self.check_subtree(root, None, None, 0)?;
        if summary.keys != self.len {
            return Err(GraphError::invariant(format!(
                "Length is {} but the tree holds {} keys",
                self.len, summary.keys
            )));
        }
        if summary.nodes != self.tree.len() {
            return Err(GraphError::invariant(format!(
                "{} nodes are reachable from the root but the tree holds {}",
                summary.nodes,
                self.tree.len()
            )));
        }
        Ok(())
    }

    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
    ) -> Result<Summary> {
        let node = self.keyed(id);
        let keys = node.keys();
        let is_root = self.tree.root() == Some(id);

        if keys.len() > self.max_keys() {
            return Err(GraphError::invariant(format!(
                "Node {} holds {} keys, more than {}",
                id,
                keys.len(),
                self.max_keys()
            )));
        }
        let min_keys = if is_root { 1 } else { self.degree - 1 };
        if keys.len() < min_keys {
            return Err(GraphError::invariant(format!(
                "Node {} holds {} keys, fewer than {}",
                id,
                keys.len(),
                min_keys
            )));
        }
        if keys.windows(2).any(|pair| self.compare(&pair[0], &pair[1]).is_gt()) {
            return Err(GraphError::invariant(format!("Keys of node {} are out of order", id)));
        }
        let below = lower.is_some_and(|bound| keys.iter().any(|k| self.compare(k, bound).is_lt()));
        let above = upper.is_some_and(|bound| keys.iter().any(|k| self.compare(k, bound).is_gt()));
        if below || above {
            return Err(GraphError::invariant(format!(
                "Keys of node {} fall outside their separators",
                id
            )));
        }

        let children = node.children();
        if children.is_empty() {
            return Ok(Summary {
                leaf_depth: depth,
                keys: keys.len(),
                nodes: 1,
            });
        }
        if children.len() != keys.len() + 1 {
            return Err(GraphError::invariant(format!(
                "Node {} has {} keys but {} children",
                id,
                keys.len(),
                children.len()
            )));
        }

        let mut total = Summary {
            leaf_depth: 0,
            keys: keys.len(),
            nodes: 1,
        };
        for (index, &child) in children.iter().enumerate() {
            let low = if index == 0 { lower } else { keys.get(index - 1) };
            let high = keys.get(index).or(upper);
            let summary = self.check_subtree(child, low, high, depth + 1)?;
            if index == 0 {
                total.leaf_depth = summary.leaf_depth;
            } else if summary.leaf_depth != total.leaf_depth {
                return Err(GraphError::invariant(format!(
                    "Leaves below node {} sit at depths {} and {}",
                    id, total.leaf_depth, summary.leaf_depth
                )));
            }
            total.keys += summary.keys;
            total.nodes += summary.nodes;
        }
        Ok(total)
    }
}
