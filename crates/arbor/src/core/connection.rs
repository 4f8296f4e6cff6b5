//! Connection records
//!
//! A connection is an edge between two distinct nodes. It is stored once in
//! the owning graph and referenced by id from both endpoints.

use super::{ConnectionId, Direction, NodeId};

/// An edge between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    from: NodeId,
    to: NodeId,
    direction: Direction,
    weight: f64,
}

impl Connection {
    pub(crate) fn new(
        id: ConnectionId,
        from: NodeId,
        to: NodeId,
        direction: Direction,
        weight: f64,
    ) -> Self {
        debug_assert_ne!(from, to, "connection endpoints must differ");
        Self {
            id,
            from,
            to,
            direction,
            weight,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Node the connection was requested from
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Node the connection was requested to
    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_two_way(&self) -> bool {
        self.direction.is_two_way()
    }

    pub fn is_one_way(&self) -> bool {
        self.direction.is_one_way()
    }

    /// Returns true if `node` is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The endpoint opposite to `node`, regardless of direction
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// Returns true if the connection links `a` and `b` in either orientation
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint reachable by walking this connection away from `node`
    ///
    /// One-way connections can only be walked from `from`; two-way
    /// connections from either end.
    pub fn leads_from(&self, node: NodeId) -> Option<NodeId> {
        match self.direction {
            Direction::OneWay if self.from == node => Some(self.to),
            Direction::OneWay => None,
            Direction::TwoWay => self.other(node),
        }
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}
