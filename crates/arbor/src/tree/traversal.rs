//! Tree search and traversal
//!
//! All walks use an explicit stack or queue, so depth is not limited by the
//! call stack.

use std::collections::VecDeque;

use super::Tree;
use crate::core::{GraphError, HasParent, NodeId, Result};

impl<N: HasParent> Tree<N> {
    /// First node in pre-order matching `predicate`
    pub fn depth_first_search<P>(&self, mut predicate: P) -> Option<&N>
    where
        P: FnMut(&N) -> bool,
    {
        self.pre_order(self.root())
            .into_iter()
            .filter_map(|id| self.node(id))
            .find(|node| predicate(node))
    }

    /// First node in level order matching `predicate`
    pub fn breadth_first_search<P>(&self, mut predicate: P) -> Option<&N>
    where
        P: FnMut(&N) -> bool,
    {
        self.level_order()
            .into_iter()
            .filter_map(|id| self.node(id))
            .find(|node| predicate(node))
    }

    /// Every node in pre-order
    pub fn depth_first_traverse(&self) -> Vec<&N> {
        self.pre_order(self.root())
            .into_iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    /// Every node in level order
    pub fn breadth_first_traverse(&self) -> Vec<&N> {
        self.level_order()
            .into_iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    /// Ids of `id` and all of its descendants, in pre-order
    pub fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>> {
        if !self.contains(id) {
            return Err(GraphError::node_not_found(id));
        }
        Ok(self.pre_order(Some(id)))
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        if !self.contains(id) {
            return Err(GraphError::node_not_found(id));
        }
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        Ok(depth)
    }

    /// Number of levels; a lone root has height 1 and an empty tree 0
    pub fn height(&self) -> usize {
        self.levels().len()
    }

    /// Largest number of nodes on a single level
    pub fn width(&self) -> usize {
        self.levels().iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Node ids grouped by level, root level first
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = Vec::new();
        let mut current: Vec<NodeId> = self.root().into_iter().collect();
        while !current.is_empty() {
            let next = current
                .iter()
                .flat_map(|id| self.children(*id).iter().copied())
                .collect();
            levels.push(std::mem::replace(&mut current, next));
        }
        levels
    }

    fn pre_order(&self, start: Option<NodeId>) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = start.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    fn level_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut queue: VecDeque<NodeId> = self.root().into_iter().collect();
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        order
    }
}
