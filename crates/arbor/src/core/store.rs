//! Core store trait for node containers
//!
//! This trait is the generic entry point shared by graphs, trees and
//! B-Trees. Each structure decides how (or whether) a bare node may be
//! added or removed through it.

use super::{Connection, NodeId, Result};

/// Core trait for node containers
///
/// The associated type lets each structure fix the node variant it stores.
pub trait NodeStore {
    /// The node type stored in this container
    type Node;

    /// Add a detached node to the container
    fn add_node(&mut self, node: Self::Node) -> Result<NodeId>;

    /// Remove a node (and whatever the structure removes with it)
    ///
    /// Returns `Ok(false)` if the node was not a member.
    fn remove_node(&mut self, id: NodeId) -> Result<bool>;

    /// Get a node by id
    fn get_node(&self, id: NodeId) -> Option<&Self::Node>;

    /// Returns true if the node is a member
    fn contains_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all connections
    fn connections(&self) -> impl Iterator<Item = &Connection>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of connections
    fn connection_count(&self) -> usize;
}
