//! Tests for nested graphs

use arbor::prelude::*;

fn graph_with(seed: u128, count: usize) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::with_ids(SequentialIds::starting_at(seed));
    let ids = (0..count)
        .map(|_| {
            let node = graph.new_node();
            graph.add(node)
        })
        .collect();
    (graph, ids)
}

#[test]
fn test_ancestry_is_outermost_first() {
    let mut hierarchy = GraphHierarchy::new();
    let (outer, _) = graph_with(100, 0);
    let (middle, _) = graph_with(200, 0);
    let (inner, _) = graph_with(300, 0);

    let outer = hierarchy.insert(outer).unwrap();
    let middle = hierarchy.insert_child(middle, outer).unwrap();
    let inner = hierarchy.insert_child(inner, middle).unwrap();

    let ancestry = hierarchy.ancestry(inner).unwrap();
    assert_eq!(ancestry.len(), 2);
    assert_eq!(ancestry, vec![outer, middle]);
}

#[test]
fn test_all_nodes_recursive_lists_own_nodes_first() {
    let mut hierarchy = GraphHierarchy::new();
    let (top, top_nodes) = graph_with(100, 2);
    let (left, left_nodes) = graph_with(200, 1);
    let (right, right_nodes) = graph_with(300, 2);
    let (deep, deep_nodes) = graph_with(400, 1);

    let top = hierarchy.insert(top).unwrap();
    let left = hierarchy.insert_child(left, top).unwrap();
    let right = hierarchy.insert_child(right, top).unwrap();
    let deep = hierarchy.insert_child(deep, left).unwrap();

    assert_eq!(hierarchy.descendants(top).unwrap(), vec![left, deep, right]);

    let all: Vec<NodeId> = hierarchy
        .all_nodes_recursive(top)
        .unwrap()
        .into_iter()
        .map(|n| n.id())
        .collect();
    let expected: Vec<NodeId> = [top_nodes, left_nodes, deep_nodes, right_nodes].concat();
    assert_eq!(all, expected);
}

#[test]
fn test_nest_and_detach() {
    let mut hierarchy = GraphHierarchy::new();
    let a = hierarchy.insert(graph_with(100, 0).0).unwrap();
    let b = hierarchy.insert(graph_with(200, 0).0).unwrap();
    assert_eq!(hierarchy.roots(), vec![a, b]);

    hierarchy.nest(b, a).unwrap();
    assert_eq!(hierarchy.parent(b).unwrap(), Some(a));
    assert_eq!(hierarchy.roots(), vec![a]);

    hierarchy.detach(b).unwrap();
    assert_eq!(hierarchy.parent(b).unwrap(), None);
    assert!(hierarchy.children(a).unwrap().is_empty());
}

#[test]
fn test_nest_into_own_descendant_rejected() {
    let mut hierarchy = GraphHierarchy::new();
    let a = hierarchy.insert(graph_with(100, 0).0).unwrap();
    let b = hierarchy.insert_child(graph_with(200, 0).0, a).unwrap();
    let c = hierarchy.insert_child(graph_with(300, 0).0, b).unwrap();

    let result = hierarchy.nest(a, c);
    assert!(matches!(result, Err(GraphError::InvalidOperation { .. })));
    assert_eq!(hierarchy.ancestry(c).unwrap(), vec![a, b]);
}

#[test]
fn test_graphs_stay_mutable_inside_hierarchy() {
    let mut hierarchy = GraphHierarchy::new();
    let (graph, ids) = graph_with(100, 2);
    let id = hierarchy.insert(graph).unwrap();

    let graph = hierarchy.get_mut(id).unwrap();
    graph.connect(ids[0], ids[1], Direction::TwoWay, 1.0).unwrap();
    assert_eq!(hierarchy.get(id).unwrap().connection_count(), 1);
}

#[test]
fn test_unknown_graph_id() {
    let mut hierarchy: GraphHierarchy = GraphHierarchy::new();
    let known = hierarchy.insert(graph_with(100, 0).0).unwrap();
    let stranger = graph_with(500, 0).0.id();

    assert_eq!(
        hierarchy.parent(stranger),
        Err(GraphError::GraphNotFound { id: stranger })
    );
    assert!(matches!(
        hierarchy.nest(known, stranger),
        Err(GraphError::GraphNotFound { .. })
    ));
    assert!(hierarchy.remove(stranger).is_err());
}
