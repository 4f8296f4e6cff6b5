//! Tree specialisation of [`Graph`]
//!
//! A [`Tree`] only accepts nodes through [`Tree::add_tree_node`], which
//! attaches each node below an existing parent with a one-way
//! parent-to-child connection. Parent and child links on the nodes mirror
//! those connections and are only ever changed together with them.

use tracing::{debug, trace, warn};

use crate::core::{
    Connection, ConnectionId, Direction, GraphError, HasParent, IdGenerator, NodeId, NodeStore,
    RandomIds, Result, TreeNode,
};
use crate::graph::Graph;

/// Weight given to every parent-to-child connection
const LINK_WEIGHT: f64 = 1.0;

/// A rooted tree of [`HasParent`] nodes
#[derive(Debug)]
pub struct Tree<N = TreeNode> {
    graph: Graph<N>,
    root: Option<NodeId>,
}

impl<N: HasParent> Default for Tree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: HasParent> Tree<N> {
    pub fn new() -> Self {
        Self::with_ids(RandomIds::new())
    }

    pub fn with_ids(ids: impl IdGenerator + 'static) -> Self {
        Self {
            graph: Graph::with_ids(ids),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&N> {
        self.root.and_then(|id| self.graph.node(id))
    }

    /// The underlying graph
    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.graph.node(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains(id)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.graph.node(id).and_then(|node| node.parent())
    }

    /// Children of `id` in order; empty for leaves and non-members
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.graph.node(id).map(|node| node.children()).unwrap_or(&[])
    }

    /// Create a detached node with a fresh id
    pub fn new_node(&mut self) -> N {
        self.graph.new_node()
    }

    /// Attach `node` below `parent`, or make it the root when `parent` is
    /// `None`
    ///
    /// The tree is validated after attaching; if it is no longer acyclic the
    /// attachment is undone and `InvalidOperation` is returned.
    pub fn add_tree_node(&mut self, node: N, parent: Option<NodeId>) -> Result<NodeId> {
        let id = node.id();
        if self.contains(id) {
            return Err(GraphError::invalid_operation(format!(
                "Node {} is already part of the tree",
                id
            )));
        }

        match parent {
            None => {
                if let Some(root) = self.root {
                    warn!(node_id = %id, root = %root, "Rejected second root");
                    return Err(GraphError::invalid_operation(format!(
                        "Tree already has root {}",
                        root
                    )));
                }
                self.graph.add(node);
                self.root = Some(id);
                trace!(node_id = %id, "Added root node");
            }
            Some(parent) => {
                if !self.contains(parent) {
                    return Err(GraphError::node_not_found(parent));
                }
                self.graph.add(node);
                if let Err(err) = self.link_child(parent, usize::MAX, id) {
                    self.graph.remove(id);
                    return Err(err);
                }
                trace!(node_id = %id, parent = %parent, "Added tree node");
            }
        }

        // A fresh leaf cannot close a cycle through tree links alone; the
        // same rollback is exercised by `connect_to_parent`.
        if let Err(err) = self.validate_shape() {
            debug!(node_id = %id, "Rolling back tree node attachment");
            self.unlink_child(id);
            self.graph.remove(id);
            if self.root == Some(id) {
                self.root = None;
            }
            return Err(err);
        }
        Ok(id)
    }

    /// Move `node` so that it becomes the last child of `new_parent`
    ///
    /// Fails if `new_parent` is `node` itself or lies inside `node`'s
    /// subtree. On any failure the previous attachment is restored.
    pub fn connect_to_parent(&mut self, node: NodeId, new_parent: NodeId) -> Result<ConnectionId> {
        if !self.contains(node) {
            return Err(GraphError::node_not_found(node));
        }
        if !self.contains(new_parent) {
            return Err(GraphError::node_not_found(new_parent));
        }
        if node == new_parent {
            return Err(GraphError::invalid_operation(
                "Cannot make a node its own parent",
            ));
        }
        if self.subtree(node)?.contains(&new_parent) {
            warn!(node_id = %node, parent = %new_parent, "Rejected reparent into own subtree");
            return Err(GraphError::invalid_operation(format!(
                "Node {} is a descendant of {}",
                new_parent, node
            )));
        }
        if self.parent(node) == Some(new_parent) {
            if let Some(existing) = self.graph.connection_between(new_parent, node) {
                return Ok(existing.id());
            }
        }

        let previous = self.unlink_child(node);
        let attached = self.link_child(new_parent, usize::MAX, node);
        let outcome = attached.and_then(|id| self.validate_shape().map(|_| id));
        match outcome {
            Ok(id) => {
                debug!(node_id = %node, parent = %new_parent, "Reparented node");
                Ok(id)
            }
            Err(err) => {
                debug!(node_id = %node, "Restoring previous parent after failed reparent");
                self.unlink_child(node);
                if let Some((parent, index)) = previous {
                    self.link_child(parent, index, node)?;
                }
                Err(err)
            }
        }
    }

    /// Detach `id` and its whole subtree from the tree
    ///
    /// Returns the removed nodes in pre-order.
    pub fn remove_tree_node(&mut self, id: NodeId) -> Result<Vec<N>> {
        let subtree = self.subtree(id)?;
        self.unlink_child(id);
        let removed: Vec<N> = subtree
            .into_iter()
            .filter_map(|member| self.graph.remove(member))
            .collect();
        if self.root == Some(id) {
            self.root = None;
        }
        debug!(node_id = %id, removed = removed.len(), "Removed subtree");
        Ok(removed)
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.graph.clear();
        self.root = None;
    }

    /// Verify that parent/child links and connections describe the same
    /// tree
    pub fn check_links(&self) -> Result<()> {
        for node in self.graph.nodes() {
            let id = node.id();
            match node.parent() {
                Some(parent) => {
                    let parent_node = self.graph.node(parent).ok_or_else(|| {
                        GraphError::invariant(format!("Parent {} of {} is missing", parent, id))
                    })?;
                    if !parent_node.children().contains(&id) {
                        return Err(GraphError::invariant(format!(
                            "{} is not listed as a child of its parent {}",
                            id, parent
                        )));
                    }
                }
                None if self.root != Some(id) => {
                    return Err(GraphError::invariant(format!(
                        "Node {} has no parent but is not the root",
                        id
                    )));
                }
                None => {}
            }

            for &child in node.children() {
                let child_node = self.graph.node(child).ok_or_else(|| {
                    GraphError::invariant(format!("Child {} of {} is missing", child, id))
                })?;
                if child_node.parent() != Some(id) {
                    return Err(GraphError::invariant(format!(
                        "Child {} does not point back to {}",
                        child, id
                    )));
                }
                let linked = node
                    .connection_ids()
                    .iter()
                    .filter_map(|c| self.graph.connection(*c))
                    .filter(|c| c.joins(id, child))
                    .count();
                if linked != 1 {
                    return Err(GraphError::invariant(format!(
                        "Expected one connection between {} and {}, found {}",
                        id, child, linked
                    )));
                }
            }
        }

        for conn in self.graph.connections() {
            let to = self.graph.node(conn.to());
            if conn.is_two_way() || to.and_then(|n| n.parent()) != Some(conn.from()) {
                return Err(GraphError::invariant(format!(
                    "Connection {} does not back a parent link",
                    conn.id()
                )));
            }
        }

        if let Some(root) = self.root {
            if self.node(root).and_then(|n| n.parent()).is_some() {
                return Err(GraphError::invariant("Root node has a parent"));
            }
        }
        Ok(())
    }

    fn validate_shape(&self) -> Result<()> {
        if self.graph.is_cyclic() || self.graph.is_directed_cyclic() {
            return Err(GraphError::invalid_operation(
                "Attachment would introduce a cycle",
            ));
        }
        Ok(())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.graph.node_mut(id)
    }

    /// Add a node without attaching it anywhere
    ///
    /// The caller must link it or make it the root before returning.
    pub(crate) fn insert_detached(&mut self, node: N) -> NodeId {
        self.graph.add(node)
    }

    /// Remove a node that has already been unlinked from the tree
    pub(crate) fn take_node(&mut self, id: NodeId) -> Option<N> {
        self.graph.remove(id)
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            self.unlink_child(id);
        }
        self.root = root;
    }

    /// Connect `child` below `parent` at `index` (clamped to the end)
    pub(crate) fn link_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<ConnectionId> {
        let connection = self
            .graph
            .connect(parent, child, Direction::OneWay, LINK_WEIGHT)?;
        if let Some(node) = self.graph.node_mut(parent) {
            node.links_mut().insert_child(index, child);
        }
        if let Some(node) = self.graph.node_mut(child) {
            node.links_mut().set_parent(Some(parent));
        }
        Ok(connection)
    }

    /// Disconnect `child` from its parent
    ///
    /// Returns the former parent and the child's index in its child list.
    pub(crate) fn unlink_child(&mut self, child: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(child)?;
        let connection = self
            .graph
            .connection_between(parent, child)
            .map(Connection::id);
        if let Some(connection) = connection {
            self.graph.disconnect(connection);
        }
        let index = self
            .graph
            .node_mut(parent)
            .and_then(|node| node.links_mut().remove_child(child));
        if let Some(node) = self.graph.node_mut(child) {
            node.links_mut().set_parent(None);
        }
        index.map(|index| (parent, index))
    }
}

impl<N: HasParent> NodeStore for Tree<N> {
    type Node = N;

    /// Adds `node` as the root
    fn add_node(&mut self, node: N) -> Result<NodeId> {
        self.add_tree_node(node, None)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<bool> {
        match self.remove_tree_node(id) {
            Ok(_) => Ok(true),
            Err(GraphError::NodeNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn get_node(&self, id: NodeId) -> Option<&N> {
        self.graph.node(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.nodes()
    }

    fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.graph.connections()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn connection_count(&self) -> usize {
        self.graph.connection_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GraphNode, SequentialIds};

    fn tree() -> Tree {
        Tree::with_ids(SequentialIds::new())
    }

    fn add(tree: &mut Tree, parent: Option<NodeId>) -> NodeId {
        let node = tree.new_node();
        tree.add_tree_node(node, parent).unwrap()
    }

    #[test]
    fn test_first_node_becomes_root() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.len(), 1);
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_second_root_rejected() {
        let mut tree = tree();
        add(&mut tree, None);
        let other = tree.new_node();
        let result = tree.add_tree_node(other, None);
        assert!(matches!(result, Err(GraphError::InvalidOperation { .. })));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_unknown_parent() {
        let mut tree = tree();
        add(&mut tree, None);
        let stranger = tree.new_node().id();
        let node = tree.new_node();
        assert_eq!(
            tree.add_tree_node(node, Some(stranger)),
            Err(GraphError::NodeNotFound { id: stranger })
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_children_keep_order_and_links() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        let a = add(&mut tree, Some(root));
        let b = add(&mut tree, Some(root));
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.graph().connection_count(), 2);
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_reparent_into_descendant_rejected() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        let a = add(&mut tree, Some(root));
        let b = add(&mut tree, Some(a));

        let result = tree.connect_to_parent(a, b);
        assert!(matches!(result, Err(GraphError::InvalidOperation { .. })));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_failed_reparent_restores_previous_parent() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        let a = add(&mut tree, Some(root));
        let b = add(&mut tree, Some(root));
        let c = add(&mut tree, Some(a));
        // a stray edge b -> a closes a -> c -> b -> a once b hangs under c
        let stray = tree
            .graph
            .connect(b, a, Direction::OneWay, 1.0)
            .unwrap();

        let result = tree.connect_to_parent(b, c);
        assert!(matches!(result, Err(GraphError::InvalidOperation { .. })));
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.children(root), &[a, b]);
        assert!(tree.children(c).is_empty());
        assert!(tree.graph().connection_between(c, b).is_none());

        assert!(tree.graph.disconnect(stray));
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_reparent_moves_subtree() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        let a = add(&mut tree, Some(root));
        let b = add(&mut tree, Some(root));
        let c = add(&mut tree, Some(a));

        tree.connect_to_parent(a, b).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.children(b), &[a]);
        assert_eq!(tree.parent(c), Some(a));
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_remove_subtree_returns_pre_order() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        let a = add(&mut tree, Some(root));
        let b = add(&mut tree, Some(a));
        let c = add(&mut tree, Some(root));

        let removed = tree.remove_tree_node(a).unwrap();
        let ids: Vec<NodeId> = removed.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(removed.iter().all(|n| n.parent().is_none() && n.is_leaf()));
        assert_eq!(tree.children(root), &[c]);
        assert_eq!(tree.graph().connection_count(), 1);
        assert!(tree.check_links().is_ok());
    }

    #[test]
    fn test_remove_root_empties_tree() {
        let mut tree = tree();
        let root = add(&mut tree, None);
        add(&mut tree, Some(root));
        tree.remove_tree_node(root).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }
}
