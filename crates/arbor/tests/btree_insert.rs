//! Tests for B-Tree insertion

use arbor::prelude::*;

fn build(degree: usize, keys: &[i32]) -> BTree<i32> {
    let mut tree = BTree::new(degree).unwrap();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

fn root_and_children(tree: &BTree<i32>) -> (Vec<i32>, Vec<Vec<i32>>) {
    let root = tree.root_node().unwrap();
    let children = root
        .children()
        .iter()
        .map(|id| tree.tree().node(*id).unwrap().keys().to_vec())
        .collect();
    (root.keys().to_vec(), children)
}

#[test]
fn test_insert_into_empty_tree() {
    let tree = build(3, &[10]);
    let root = tree.root_node().unwrap();
    assert_eq!(root.keys(), &[10]);
    assert!(root.is_leaf());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.height(), 1);
}

#[test]
fn test_split_with_degree_three() {
    let tree = build(3, &[10, 20, 5, 6, 12, 30]);
    let (root, children) = root_and_children(&tree);
    assert_eq!(root, vec![10]);
    assert_eq!(children, vec![vec![5, 6], vec![12, 20, 30]]);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_split_with_degree_two() {
    let tree = build(2, &[10, 20, 5, 6, 12]);
    let (root, children) = root_and_children(&tree);
    assert_eq!(root, vec![10]);
    assert_eq!(children, vec![vec![5, 6], vec![12, 20]]);
}

#[test]
fn test_in_order_keys_are_sorted() {
    let keys = [50, 20, 70, 10, 30, 60, 80, 15, 25, 65];
    let tree = build(2, &keys);
    let mut expected = keys.to_vec();
    expected.sort();
    let collected: Vec<i32> = tree.keys().into_iter().copied().collect();
    assert_eq!(collected, expected);
    assert_eq!(tree.first(), Some(&10));
    assert_eq!(tree.last(), Some(&80));
}

#[test]
fn test_duplicates_are_kept() {
    let tree = build(2, &[10, 20, 10, 30, 20, 10]);
    let collected: Vec<i32> = tree.keys().into_iter().copied().collect();
    assert_eq!(collected, vec![10, 10, 10, 20, 20, 30]);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.count(&10), 3);
    assert_eq!(tree.count(&20), 2);
    assert_eq!(tree.count(&30), 1);
    assert_eq!(tree.count(&40), 0);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_nodes_never_exceed_maximum_keys() {
    for degree in 2..=5 {
        let keys: Vec<i32> = (0..200).map(|k| (k * 7919) % 211).collect();
        let tree = build(degree, &keys);
        for node in tree.tree().depth_first_traverse() {
            assert!(node.key_count() <= 2 * degree - 1);
        }
        assert!(tree.validate().is_ok());
        assert_eq!(tree.len(), 200);
    }
}

#[test]
fn test_ascending_and_descending_runs() {
    let ascending: Vec<i32> = (0..64).collect();
    let descending: Vec<i32> = (0..64).rev().collect();
    for keys in [ascending, descending] {
        let tree = build(2, &keys);
        assert!(tree.validate().is_ok());
        let collected: Vec<i32> = tree.keys().into_iter().copied().collect();
        assert_eq!(collected, (0..64).collect::<Vec<_>>());
    }
}

#[test]
fn test_extreme_values() {
    let tree = build(2, &[0, i32::MAX, -5, i32::MIN, 1_000_000, -1_000_000]);
    assert!(tree.contains(&0));
    assert!(tree.contains(&i32::MAX));
    assert!(tree.contains(&i32::MIN));
    assert_eq!(tree.first(), Some(&i32::MIN));
    assert_eq!(tree.last(), Some(&i32::MAX));
}

#[test]
fn test_height_grows_only_at_root() {
    let mut tree = BTree::new(2).unwrap();
    let mut heights = Vec::new();
    for key in 0..20 {
        tree.insert(key);
        heights.push(tree.height());
    }
    assert!(heights.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1));
    assert!(tree.validate().is_ok());
}

#[test]
fn test_custom_comparator_orders_strings_by_length() {
    let mut tree = BTree::with_comparator(2, |a: &String, b: &String| a.len().cmp(&b.len()))
        .unwrap();
    for word in ["pear", "fig", "banana", "kiwi", "apple"] {
        tree.insert(word.to_string());
    }
    let ordered: Vec<&str> = tree.keys().into_iter().map(String::as_str).collect();
    assert_eq!(ordered, vec!["fig", "pear", "kiwi", "apple", "banana"]);
    assert!(tree.contains(&"plum".to_string()));
}

#[test]
fn test_builder_with_sequential_ids() {
    let mut tree = BTree::builder(2)
        .ids(SequentialIds::starting_at(1000))
        .build()
        .unwrap();
    tree.insert(1);
    assert_eq!(tree.root().unwrap().id(), arbor::Id::from_u128(1001));
}
