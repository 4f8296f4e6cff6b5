//! Cycle detection
//!
//! Two independent predicates over a [`Graph`]:
//!
//! - cyclic: one-way connections are walked from `from` to `to` and two-way
//!   connections from either end, never back over the connection just used
//! - directed cyclic: only one-way connections count
//!
//! Both walks start from every node so that cycles in components unreachable
//! from the first node are still found.

use std::collections::HashSet;

use tracing::trace;

use super::Graph;
use crate::core::{ConnectionId, GraphNode, NodeId};

impl<N: GraphNode> Graph<N> {
    /// Returns true if at least one one-way connection exists
    pub fn is_directed(&self) -> bool {
        self.connections().any(|conn| conn.is_one_way())
    }

    /// Returns true if walking connections in their permitted direction
    /// can return to a node still on the current path
    ///
    /// A lone two-way connection is not a cycle; two paths that merge again
    /// are not one either.
    pub fn is_cyclic(&self) -> bool {
        let mut visited = HashSet::new();
        let mut active = HashSet::new();
        for &start in self.node_ids() {
            if !visited.contains(&start)
                && self.cycle_from(start, None, &mut visited, &mut active)
            {
                trace!(start = %start, "Found cycle");
                return true;
            }
        }
        false
    }

    pub fn is_acyclic(&self) -> bool {
        !self.is_cyclic()
    }

    /// Returns true if the one-way connections form a cycle
    ///
    /// A graph with no one-way connection is not directed at all, so this
    /// is false for it.
    pub fn is_directed_cyclic(&self) -> bool {
        if !self.is_directed() {
            return false;
        }
        let mut visited = HashSet::new();
        let mut active = HashSet::new();
        for &start in self.node_ids() {
            if !visited.contains(&start)
                && self.directed_cycle_from(start, &mut visited, &mut active)
            {
                trace!(start = %start, "Found directed cycle");
                return true;
            }
        }
        false
    }

    /// Returns true if the graph is directed and its one-way connections
    /// form no cycle
    pub fn is_directed_acyclic(&self) -> bool {
        self.is_directed() && !self.is_directed_cyclic()
    }

    /// Depth-first walk that never goes back over the connection it
    /// arrived by; reaching a node still on the path closes a cycle.
    fn cycle_from(
        &self,
        node: NodeId,
        arrived_by: Option<ConnectionId>,
        visited: &mut HashSet<NodeId>,
        active: &mut HashSet<NodeId>,
    ) -> bool {
        visited.insert(node);
        active.insert(node);
        let Ok(outbound) = self.outbound_connections(node) else {
            return false;
        };
        for conn in outbound {
            if Some(conn.id()) == arrived_by {
                continue;
            }
            let Some(next) = conn.leads_from(node) else {
                continue;
            };
            if active.contains(&next) {
                return true;
            }
            if !visited.contains(&next)
                && self.cycle_from(next, Some(conn.id()), visited, active)
            {
                return true;
            }
        }
        active.remove(&node);
        false
    }

    fn directed_cycle_from(
        &self,
        node: NodeId,
        visited: &mut HashSet<NodeId>,
        active: &mut HashSet<NodeId>,
    ) -> bool {
        visited.insert(node);
        active.insert(node);
        let Ok(outbound) = self.outbound_connections(node) else {
            return false;
        };
        for conn in outbound.into_iter().filter(|conn| conn.is_one_way()) {
            let next = conn.to();
            if active.contains(&next) {
                return true;
            }
            if !visited.contains(&next) && self.directed_cycle_from(next, visited, active) {
                return true;
            }
        }
        active.remove(&node);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Node, SequentialIds};

    fn graph_with(count: usize) -> (Graph<Node>, Vec<NodeId>) {
        let mut graph = Graph::with_ids(SequentialIds::new());
        let ids = (0..count)
            .map(|_| {
                let node = graph.new_node();
                graph.add(node)
            })
            .collect();
        (graph, ids)
    }

    #[test]
    fn test_empty_graph_is_acyclic_and_undirected() {
        let (graph, _) = graph_with(0);
        assert!(graph.is_acyclic());
        assert!(!graph.is_directed());
        assert!(!graph.is_directed_cyclic());
        assert!(!graph.is_directed_acyclic());
    }

    #[test]
    fn test_single_edge_is_not_a_cycle() {
        let (mut graph, ids) = graph_with(2);
        graph.connect(ids[0], ids[1], Direction::TwoWay, 1.0).unwrap();
        assert!(graph.is_acyclic());
        assert!(!graph.is_directed());
    }

    #[test]
    fn test_two_way_triangle() {
        let (mut graph, ids) = graph_with(3);
        graph.connect(ids[0], ids[1], Direction::TwoWay, 1.0).unwrap();
        graph.connect(ids[1], ids[2], Direction::TwoWay, 1.0).unwrap();
        graph.connect(ids[2], ids[0], Direction::TwoWay, 1.0).unwrap();
        assert!(graph.is_cyclic());
        assert!(!graph.is_acyclic());
        assert!(!graph.is_directed_cyclic());
    }

    #[test]
    fn test_one_way_triangle() {
        let (mut graph, ids) = graph_with(3);
        graph.connect(ids[0], ids[1], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[1], ids[2], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[2], ids[0], Direction::OneWay, 1.0).unwrap();
        assert!(graph.is_cyclic());
        assert!(graph.is_directed_cyclic());
        assert!(!graph.is_directed_acyclic());
    }

    #[test]
    fn test_one_way_diamond_is_acyclic() {
        let (mut graph, ids) = graph_with(4);
        graph.connect(ids[0], ids[1], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[0], ids[2], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[1], ids[3], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[2], ids[3], Direction::OneWay, 1.0).unwrap();
        assert!(graph.is_acyclic());
        assert!(!graph.is_cyclic());
        assert!(graph.is_directed_acyclic());
    }

    #[test]
    fn test_two_way_diamond_is_cyclic() {
        let (mut graph, ids) = graph_with(4);
        graph.connect(ids[0], ids[1], Direction::TwoWay, 1.0).unwrap();
        graph.connect(ids[0], ids[2], Direction::TwoWay, 1.0).unwrap();
        graph.connect(ids[1], ids[3], Direction::TwoWay, 1.0).unwrap();
        graph.connect(ids[2], ids[3], Direction::TwoWay, 1.0).unwrap();
        assert!(graph.is_cyclic());
        assert!(!graph.is_directed());
    }

    #[test]
    fn test_reversed_edge_closes_no_cycle() {
        let (mut graph, ids) = graph_with(3);
        graph.connect(ids[0], ids[1], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[2], ids[1], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[0], ids[2], Direction::OneWay, 1.0).unwrap();
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_cycle_in_second_component() {
        let (mut graph, ids) = graph_with(5);
        graph.connect(ids[0], ids[1], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[2], ids[3], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[3], ids[4], Direction::OneWay, 1.0).unwrap();
        graph.connect(ids[4], ids[2], Direction::OneWay, 1.0).unwrap();
        assert!(graph.is_cyclic());
        assert!(graph.is_directed_cyclic());
    }
}
