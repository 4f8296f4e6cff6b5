//! Property tests for graphs and B-Trees

use arbor::prelude::*;
use proptest::prelude::*;

fn build(degree: usize, keys: &[i16]) -> BTree<i16> {
    let mut tree = BTree::new(degree).unwrap();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

/// Keys together with a shuffled copy of themselves
fn keys_and_permutation() -> impl Strategy<Value = (Vec<i16>, Vec<i16>)> {
    prop::collection::vec(-500i16..500, 0..150)
        .prop_flat_map(|keys| (Just(keys.clone()), Just(keys).prop_shuffle()))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::OneWay), Just(Direction::TwoWay)]
}

proptest! {
    #[test]
    fn in_order_keys_are_sorted(degree in 2usize..6, keys in prop::collection::vec(any::<i16>(), 0..300)) {
        let tree = build(degree, &keys);
        let mut expected = keys.clone();
        expected.sort();
        let collected: Vec<i16> = tree.keys().into_iter().copied().collect();
        prop_assert_eq!(collected, expected);
        prop_assert_eq!(tree.len(), keys.len());
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn deleting_every_key_empties_the_tree(degree in 2usize..6, (keys, order) in keys_and_permutation()) {
        let mut tree = build(degree, &keys);
        for key in &order {
            prop_assert!(tree.remove(key).is_ok());
            let valid = tree.validate();
            prop_assert!(valid.is_ok(), "{:?}", valid);
        }
        prop_assert!(tree.is_empty());
        prop_assert!(tree.root().is_none());
        prop_assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn absent_key_deletion_changes_nothing(
        degree in 2usize..5,
        keys in prop::collection::vec(0i16..1000, 1..100),
        probe in 1000i16..2000,
    ) {
        let mut tree = build(degree, &keys);
        let before: Vec<Vec<i16>> = tree
            .tree()
            .depth_first_traverse()
            .into_iter()
            .map(|n| n.keys().to_vec())
            .collect();

        prop_assert_eq!(tree.remove(&probe).unwrap_err(), GraphError::KeyNotFound);

        let after: Vec<Vec<i16>> = tree
            .tree()
            .depth_first_traverse()
            .into_iter()
            .map(|n| n.keys().to_vec())
            .collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(tree.len(), keys.len());
    }

    #[test]
    fn partial_deletion_keeps_remaining_keys(degree in 2usize..5, (keys, order) in keys_and_permutation()) {
        let mut tree = build(degree, &keys);
        let half = order.len() / 2;
        for key in &order[..half] {
            tree.remove(key).unwrap();
        }
        let mut expected = order[half..].to_vec();
        expected.sort();
        let collected: Vec<i16> = tree.keys().into_iter().copied().collect();
        prop_assert_eq!(collected, expected);
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn repeated_connects_never_duplicate(
        requests in prop::collection::vec((0usize..6, 0usize..6, direction()), 0..60),
    ) {
        let mut graph: Graph = Graph::with_ids(SequentialIds::new());
        let ids: Vec<NodeId> = (0..6)
            .map(|_| {
                let node = graph.new_node();
                graph.add(node)
            })
            .collect();

        for (from, to, direction) in &requests {
            let result = graph.connect(ids[*from], ids[*to], *direction, 1.0);
            prop_assert_eq!(result.is_ok(), from != to);
        }

        let mut pairs: Vec<(usize, usize)> = requests
            .iter()
            .filter(|(from, to, _)| from != to)
            .map(|(from, to, _)| (*from.min(to), *from.max(to)))
            .collect();
        pairs.sort();
        pairs.dedup();
        prop_assert_eq!(graph.connection_count(), pairs.len());

        for node in graph.nodes() {
            let mut seen = node.connection_ids().to_vec();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), node.connection_count());
        }
    }

    #[test]
    fn removing_nodes_leaves_no_dangling_connections(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..40),
        victim in 0usize..8,
    ) {
        let mut graph: Graph = Graph::with_ids(SequentialIds::new());
        let ids: Vec<NodeId> = (0..8)
            .map(|_| {
                let node = graph.new_node();
                graph.add(node)
            })
            .collect();
        for (from, to) in edges.into_iter().filter(|(from, to)| from != to) {
            graph.connect(ids[from], ids[to], Direction::OneWay, 1.0).unwrap();
        }

        graph.remove(ids[victim]);

        for connection in graph.connections() {
            prop_assert!(!connection.touches(ids[victim]));
            prop_assert!(graph.contains(connection.from()));
            prop_assert!(graph.contains(connection.to()));
        }
        for node in graph.nodes() {
            for id in node.connection_ids() {
                prop_assert!(graph.connection(*id).is_some());
            }
        }
    }
}
