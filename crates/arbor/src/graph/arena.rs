//! Graph arena
//!
//! A [`Graph`] owns its nodes and the connections between them. Nodes are
//! moved in with [`Graph::add`] and handed back by [`Graph::remove`];
//! everything else refers to them by [`NodeId`].

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::core::{
    Connection, ConnectionId, Direction, GraphError, GraphId, GraphNode, IdGenerator, Node,
    NodeId, NodeStore, RandomIds, Result,
};

/// An owning container of nodes and connections
///
/// Maintains insertion order for deterministic iteration.
#[derive(Debug)]
pub struct Graph<N = Node> {
    id: GraphId,
    /// Nodes indexed by id
    nodes: HashMap<NodeId, N>,
    /// Node ids in insertion order
    node_order: Vec<NodeId>,
    /// Connections indexed by id
    connections: HashMap<ConnectionId, Connection>,
    ids: Box<dyn IdGenerator>,
}

impl<N: GraphNode> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Graph<N> {
    /// Create an empty graph using random ids
    pub fn new() -> Self {
        Self::with_ids(RandomIds::new())
    }

    /// Create an empty graph drawing ids from `ids`
    pub fn with_ids(ids: impl IdGenerator + 'static) -> Self {
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        Self {
            id: GraphId::new(ids.next_id()),
            nodes: HashMap::new(),
            node_order: Vec::new(),
            connections: HashMap::new(),
            ids,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Allocate a fresh node id from this graph's generator
    pub fn next_node_id(&mut self) -> NodeId {
        NodeId::new(self.ids.next_id())
    }

    /// Create a detached node with a fresh id
    ///
    /// The node is not a member until passed to [`Graph::add`].
    pub fn new_node(&mut self) -> N {
        let id = self.next_node_id();
        N::from_id(id)
    }

    /// Add a detached node
    ///
    /// Adding a node whose id is already a member is a no-op; the existing
    /// member is kept.
    pub fn add(&mut self, mut node: N) -> NodeId {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            trace!(node_id = %id, "Node already a member, ignoring");
            return id;
        }
        node.detach();
        trace!(node_id = %id, graph_id = %self.id, "Adding node to graph");
        self.nodes.insert(id, node);
        self.node_order.push(id);
        debug!(node_count = self.nodes.len(), "Node added");
        id
    }

    /// Remove a node, disconnecting it from every neighbour first
    ///
    /// Returns the detached node, or `None` if it was not a member.
    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        let incident: Vec<ConnectionId> = self.nodes.get(&id)?.connection_ids().to_vec();
        for connection in incident {
            self.disconnect(connection);
        }

        let mut node = self.nodes.remove(&id)?;
        self.node_order.retain(|n| *n != id);
        node.detach();
        trace!(node_id = %id, graph_id = %self.id, "Removed node from graph");
        debug!(node_count = self.nodes.len(), "Node removed");
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(&id)
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and connection
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_order.clear();
        self.connections.clear();
    }

    /// Connect `from` to `to`
    ///
    /// Repeated requests never duplicate an edge:
    ///
    /// - the same request again returns the existing connection
    /// - a one-way request against an existing reverse one-way connection
    ///   upgrades that connection to two-way
    /// - a two-way request against any existing one-way connection between
    ///   the pair upgrades it to two-way
    /// - any request against an existing two-way connection returns it
    ///
    /// Otherwise a new connection is created and recorded on both
    /// endpoints.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        direction: Direction,
        weight: f64,
    ) -> Result<ConnectionId> {
        if from == to {
            return Err(GraphError::invalid_operation(
                "Cannot connect node to itself",
            ));
        }
        if !weight.is_finite() {
            return Err(GraphError::invalid_argument(format!(
                "Connection weight must be finite, got {}",
                weight
            )));
        }
        let source = self
            .nodes
            .get(&from)
            .ok_or(GraphError::NodeNotFound { id: from })?;
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::NodeNotFound { id: to });
        }

        let existing = source
            .connection_ids()
            .iter()
            .filter_map(|id| self.connections.get(id))
            .find(|conn| conn.joins(from, to))
            .map(|conn| (conn.id(), conn.direction(), conn.from() == from));

        if let Some((id, current, same_orientation)) = existing {
            match (direction, current) {
                (Direction::OneWay, Direction::OneWay) if same_orientation => {
                    trace!(connection_id = %id, "Connection already exists");
                    return Ok(id);
                }
                (Direction::OneWay, Direction::OneWay) | (Direction::TwoWay, Direction::OneWay) => {
                    if let Some(conn) = self.connections.get_mut(&id) {
                        conn.set_direction(Direction::TwoWay);
                    }
                    debug!(connection_id = %id, "Upgraded connection to two-way");
                    return Ok(id);
                }
                (_, Direction::TwoWay) => {
                    trace!(connection_id = %id, "Two-way connection already exists");
                    return Ok(id);
                }
            }
        }

        let id = ConnectionId::new(self.ids.next_id());
        self.connections
            .insert(id, Connection::new(id, from, to, direction, weight));
        for endpoint in [from, to] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.record_mut().push_connection(id);
            }
        }
        trace!(
            connection_id = %id,
            from = %from,
            to = %to,
            direction = %direction,
            weight,
            "Connected nodes"
        );
        debug!(connection_count = self.connections.len(), "Connection added");
        Ok(id)
    }

    /// Remove `connection` from `node`'s connection set
    ///
    /// The connection is dropped from both endpoints at once. Returns false
    /// if `node` does not hold the connection.
    pub fn remove_connection(&mut self, node: NodeId, connection: ConnectionId) -> bool {
        let held = self
            .nodes
            .get(&node)
            .is_some_and(|n| n.record().has_connection(connection));
        held && self.disconnect(connection)
    }

    /// Remove a connection from both endpoints and from the graph
    ///
    /// Returns false if the connection does not exist.
    pub fn disconnect(&mut self, connection: ConnectionId) -> bool {
        let Some(conn) = self.connections.remove(&connection) else {
            return false;
        };
        for endpoint in [conn.from(), conn.to()] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.record_mut().remove_connection(connection);
            }
        }
        trace!(connection_id = %connection, "Disconnected nodes");
        true
    }

    /// Change the weight of an existing connection
    pub fn set_weight(&mut self, connection: ConnectionId, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(GraphError::invalid_argument(format!(
                "Connection weight must be finite, got {}",
                weight
            )));
        }
        let conn = self
            .connections
            .get_mut(&connection)
            .ok_or(GraphError::ConnectionNotFound { id: connection })?;
        conn.set_weight(weight);
        trace!(connection_id = %connection, weight, "Updated connection weight");
        Ok(())
    }

    /// Connection linking `a` and `b` in either orientation
    pub fn connection_between(&self, a: NodeId, b: NodeId) -> Option<&Connection> {
        self.nodes
            .get(&a)?
            .connection_ids()
            .iter()
            .filter_map(|id| self.connections.get(id))
            .find(|conn| conn.joins(a, b))
    }

    /// Every connection touching `node`, in the order they were made
    pub fn connections_of(&self, node: NodeId) -> Result<Vec<&Connection>> {
        let member = self.nodes.get(&node).ok_or(GraphError::NodeNotFound { id: node })?;
        Ok(member
            .connection_ids()
            .iter()
            .filter_map(|id| self.connections.get(id))
            .collect())
    }

    /// Nodes reachable from `node` over a single connection
    ///
    /// One-way connections contribute their target only when `node` is the
    /// source; two-way connections contribute the opposite endpoint.
    pub fn neighbours(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let mut neighbours = Vec::new();
        for conn in self.connections_of(node)? {
            if let Some(next) = conn.leads_from(node) {
                if !neighbours.contains(&next) {
                    neighbours.push(next);
                }
            }
        }
        Ok(neighbours)
    }

    /// One-way connections leaving `node`, plus every two-way connection
    pub fn outbound_connections(&self, node: NodeId) -> Result<Vec<&Connection>> {
        Ok(self
            .connections_of(node)?
            .into_iter()
            .filter(|conn| conn.is_two_way() || conn.from() == node)
            .collect())
    }

    /// One-way connections entering `node`, plus every two-way connection
    pub fn inbound_connections(&self, node: NodeId) -> Result<Vec<&Connection>> {
        Ok(self
            .connections_of(node)?
            .into_iter()
            .filter(|conn| conn.is_two_way() || conn.to() == node)
            .collect())
    }
}

impl<N: GraphNode> NodeStore for Graph<N> {
    type Node = N;

    fn add_node(&mut self, node: N) -> Result<NodeId> {
        Ok(self.add(node))
    }

    fn remove_node(&mut self, id: NodeId) -> Result<bool> {
        Ok(self.remove(id).is_some())
    }

    fn get_node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    fn nodes(&self) -> impl Iterator<Item = &N> {
        Graph::nodes(self)
    }

    fn connections(&self) -> impl Iterator<Item = &Connection> {
        Graph::connections(self)
    }

    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn connection_count(&self) -> usize {
        Graph::connection_count(self)
    }
}
