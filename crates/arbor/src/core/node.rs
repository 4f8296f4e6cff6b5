//! Node records and capability traits
//!
//! Every node variant embeds a [`NodeRecord`] holding its id and the ids of
//! its connections. Capabilities are layered with traits rather than type
//! casts:
//!
//! - [`GraphNode`]: anything that can live in a [`Graph`](crate::graph::Graph)
//! - [`HasParent`]: nodes that carry a parent link and ordered children
//! - [`HasKeys`](crate::btree::HasKeys): B-Tree nodes carrying sorted keys

use super::{ConnectionId, NodeId};

/// Data shared by every node variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    id: NodeId,
    connections: Vec<ConnectionId>,
}

impl NodeRecord {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            connections: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Ids of the connections touching this node
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn has_connection(&self, id: ConnectionId) -> bool {
        self.connections.contains(&id)
    }

    pub(crate) fn push_connection(&mut self, id: ConnectionId) {
        if !self.connections.contains(&id) {
            self.connections.push(id);
        }
    }

    pub(crate) fn remove_connection(&mut self, id: ConnectionId) -> bool {
        match self.connections.iter().position(|c| *c == id) {
            Some(index) => {
                self.connections.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
    }
}

/// A node that can be stored in a graph
pub trait GraphNode {
    /// Create a detached node with the given id
    fn from_id(id: NodeId) -> Self
    where
        Self: Sized;

    fn record(&self) -> &NodeRecord;

    fn record_mut(&mut self) -> &mut NodeRecord;

    fn id(&self) -> NodeId {
        self.record().id()
    }

    /// Ids of the connections touching this node
    fn connection_ids(&self) -> &[ConnectionId] {
        self.record().connections()
    }

    /// Number of connections touching this node
    fn connection_count(&self) -> usize {
        self.record().connections().len()
    }

    /// Forget every reference to other nodes
    ///
    /// Called when a node enters or leaves a graph, since ids held by a
    /// detached node mean nothing outside the arena that issued them.
    fn detach(&mut self) {
        self.record_mut().clear_connections();
    }
}

/// Short human-readable description used by renderers
pub trait Label {
    fn label(&self) -> String;
}

/// A plain graph vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    record: NodeRecord,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            record: NodeRecord::new(id),
        }
    }
}

impl GraphNode for Node {
    fn from_id(id: NodeId) -> Self {
        Self::new(id)
    }

    fn record(&self) -> &NodeRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut NodeRecord {
        &mut self.record
    }
}

impl Label for Node {
    fn label(&self) -> String {
        self.id().short()
    }
}

/// Parent link and ordered child list of a tree node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeLinks {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeLinks {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn insert_child(&mut self, index: usize, child: NodeId) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) -> Option<usize> {
        let index = self.children.iter().position(|c| *c == child)?;
        self.children.remove(index);
        Some(index)
    }

    pub(crate) fn clear(&mut self) {
        self.parent = None;
        self.children.clear();
    }
}

/// A node with at most one parent and an ordered list of children
pub trait HasParent: GraphNode {
    fn links(&self) -> &TreeLinks;

    fn links_mut(&mut self) -> &mut TreeLinks;

    fn parent(&self) -> Option<NodeId> {
        self.links().parent()
    }

    fn children(&self) -> &[NodeId] {
        self.links().children()
    }

    fn child_count(&self) -> usize {
        self.links().children().len()
    }

    fn is_leaf(&self) -> bool {
        self.links().children().is_empty()
    }
}

/// A node of a [`Tree`](crate::tree::Tree)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    record: NodeRecord,
    links: TreeLinks,
}

impl TreeNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            record: NodeRecord::new(id),
            links: TreeLinks::default(),
        }
    }
}

impl GraphNode for TreeNode {
    fn from_id(id: NodeId) -> Self {
        Self::new(id)
    }

    fn record(&self) -> &NodeRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut NodeRecord {
        &mut self.record
    }

    fn detach(&mut self) {
        self.record.clear_connections();
        self.links.clear();
    }
}

impl HasParent for TreeNode {
    fn links(&self) -> &TreeLinks {
        &self.links
    }

    fn links_mut(&mut self) -> &mut TreeLinks {
        &mut self.links
    }
}

impl Label for TreeNode {
    fn label(&self) -> String {
        self.id().short()
    }
}
