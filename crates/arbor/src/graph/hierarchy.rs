//! Nested graphs
//!
//! A graph may sit inside a parent graph and own any number of child graphs.
//! [`GraphHierarchy`] stores the graphs by [`GraphId`] and keeps the
//! parent/child links between them, so no graph holds a reference to another.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::Graph;
use crate::core::{GraphError, GraphId, GraphNode, Node, Result};

#[derive(Debug)]
struct Entry<N> {
    graph: Graph<N>,
    parent: Option<GraphId>,
    children: Vec<GraphId>,
}

/// An arena of graphs linked into a forest
#[derive(Debug)]
pub struct GraphHierarchy<N = Node> {
    entries: HashMap<GraphId, Entry<N>>,
    order: Vec<GraphId>,
}

impl<N: GraphNode> Default for GraphHierarchy<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> GraphHierarchy<N> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Add a top-level graph
    pub fn insert(&mut self, graph: Graph<N>) -> Result<GraphId> {
        let id = graph.id();
        if self.entries.contains_key(&id) {
            return Err(GraphError::invalid_operation(format!(
                "Graph {} is already part of the hierarchy",
                id
            )));
        }
        self.entries.insert(
            id,
            Entry {
                graph,
                parent: None,
                children: Vec::new(),
            },
        );
        self.order.push(id);
        trace!(graph_id = %id, "Inserted graph");
        Ok(id)
    }

    /// Add a graph nested directly under `parent`
    pub fn insert_child(&mut self, graph: Graph<N>, parent: GraphId) -> Result<GraphId> {
        self.entry(parent)?;
        let id = self.insert(graph)?;
        self.link(id, parent);
        Ok(id)
    }

    /// Move `child` (with everything below it) under `parent`
    pub fn nest(&mut self, child: GraphId, parent: GraphId) -> Result<()> {
        self.entry(child)?;
        self.entry(parent)?;
        if child == parent {
            return Err(GraphError::invalid_operation(
                "Cannot nest a graph inside itself",
            ));
        }
        if self.descendants(child)?.contains(&parent) {
            return Err(GraphError::invalid_operation(format!(
                "Cannot nest graph {} inside its own descendant {}",
                child, parent
            )));
        }
        self.unlink(child);
        self.link(child, parent);
        debug!(child = %child, parent = %parent, "Nested graph");
        Ok(())
    }

    /// Make `child` a top-level graph again
    pub fn detach(&mut self, child: GraphId) -> Result<()> {
        self.entry(child)?;
        self.unlink(child);
        Ok(())
    }

    /// Take a graph out of the hierarchy
    ///
    /// Its child graphs are lifted to the removed graph's parent, or become
    /// top-level graphs if it had none.
    pub fn remove(&mut self, id: GraphId) -> Result<Graph<N>> {
        let parent = self.entry(id)?.parent;
        self.unlink(id);
        let children = self.entry(id)?.children.clone();
        for child in children {
            self.unlink(child);
            if let Some(parent) = parent {
                self.link(child, parent);
            }
        }
        let entry = self
            .entries
            .remove(&id)
            .ok_or(GraphError::GraphNotFound { id })?;
        self.order.retain(|g| *g != id);
        debug!(graph_id = %id, "Removed graph from hierarchy");
        Ok(entry.graph)
    }

    pub fn get(&self, id: GraphId) -> Option<&Graph<N>> {
        self.entries.get(&id).map(|entry| &entry.graph)
    }

    pub fn get_mut(&mut self, id: GraphId) -> Option<&mut Graph<N>> {
        self.entries.get_mut(&id).map(|entry| &mut entry.graph)
    }

    pub fn contains(&self, id: GraphId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level graphs in insertion order
    pub fn roots(&self) -> Vec<GraphId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.entries.get(id).is_some_and(|e| e.parent.is_none()))
            .collect()
    }

    pub fn parent(&self, id: GraphId) -> Result<Option<GraphId>> {
        Ok(self.entry(id)?.parent)
    }

    pub fn children(&self, id: GraphId) -> Result<&[GraphId]> {
        Ok(&self.entry(id)?.children)
    }

    /// Enclosing graphs of `id`, outermost first, excluding `id` itself
    pub fn ancestry(&self, id: GraphId) -> Result<Vec<GraphId>> {
        let mut ancestry = Vec::new();
        let mut current = self.entry(id)?.parent;
        while let Some(parent) = current {
            ancestry.push(parent);
            current = self.entry(parent)?.parent;
        }
        ancestry.reverse();
        Ok(ancestry)
    }

    /// Every graph nested below `id`, in pre-order
    pub fn descendants(&self, id: GraphId) -> Result<Vec<GraphId>> {
        let mut descendants = Vec::new();
        let mut stack: Vec<GraphId> = self.entry(id)?.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            descendants.push(next);
            stack.extend(self.entry(next)?.children.iter().rev().copied());
        }
        Ok(descendants)
    }

    /// Nodes of `id` followed by the nodes of every descendant graph
    pub fn all_nodes_recursive(&self, id: GraphId) -> Result<Vec<&N>> {
        let mut nodes: Vec<&N> = self.entry(id)?.graph.nodes().collect();
        for descendant in self.descendants(id)? {
            nodes.extend(self.entry(descendant)?.graph.nodes());
        }
        Ok(nodes)
    }

    fn entry(&self, id: GraphId) -> Result<&Entry<N>> {
        self.entries.get(&id).ok_or(GraphError::GraphNotFound { id })
    }

    fn link(&mut self, child: GraphId, parent: GraphId) {
        if let Some(entry) = self.entries.get_mut(&parent) {
            entry.children.push(child);
        }
        if let Some(entry) = self.entries.get_mut(&child) {
            entry.parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: GraphId) {
        let Some(parent) = self.entries.get_mut(&child).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(entry) = self.entries.get_mut(&parent) {
            entry.children.retain(|c| *c != child);
        }
    }
}
