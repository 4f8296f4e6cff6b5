//! B-Tree container, construction and queries

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::{HasKeys, KeyedNode};
use crate::core::{
    Connection, GraphError, HasParent, IdGenerator, NodeId, NodeStore, RandomIds, Result,
};
use crate::tree::Tree;

/// Ordering used for every key comparison in a [`BTree`]
pub type Comparator<K> = Arc<dyn Fn(&K, &K) -> Ordering + Send + Sync>;

/// A self-balancing multi-way search tree of minimum degree `t`
///
/// Every node holds at most `2t - 1` keys and every node but the root at
/// least `t - 1`. Duplicate keys are kept as separate entries, in insertion
/// order.
///
/// # Example
/// ```
/// use arbor::btree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for key in [10, 20, 5, 6, 12, 30] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.keys(), vec![&5, &6, &10, &12, &20, &30]);
/// assert_eq!(tree.height(), 2);
/// ```
pub struct BTree<K> {
    pub(super) tree: Tree<KeyedNode<K>>,
    pub(super) degree: usize,
    pub(super) comparator: Comparator<K>,
    pub(super) len: usize,
}

impl<K: Ord + 'static> BTree<K> {
    /// Create an empty tree ordered by `K`'s natural ordering
    pub fn new(degree: usize) -> Result<Self> {
        Self::builder(degree).build()
    }

    pub fn builder(degree: usize) -> BTreeBuilder<K> {
        BTreeBuilder::new(degree, Arc::new(|a: &K, b: &K| a.cmp(b)))
    }
}

impl<K> BTree<K> {
    /// Create an empty tree ordered by `comparator`
    pub fn with_comparator<F>(degree: usize, comparator: F) -> Result<Self>
    where
        F: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        BTreeBuilder::new(degree, Arc::new(comparator)).build()
    }

    /// Minimum degree `t`
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Total number of keys, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn root_node(&self) -> Option<&KeyedNode<K>> {
        self.tree.root_node()
    }

    /// The underlying tree of nodes
    pub fn tree(&self) -> &Tree<KeyedNode<K>> {
        &self.tree
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn width(&self) -> usize {
        self.tree.width()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Node holding `key`, closest to the root
    pub fn find(&self, key: &K) -> Option<&KeyedNode<K>> {
        let mut current = self.tree.root()?;
        loop {
            let node = self.keyed(current);
            let index = self.lower_bound(node.keys(), key);
            if index < node.key_count() && self.compare(&node.keys()[index], key).is_eq() {
                return Some(node);
            }
            current = *node.children().get(index)?;
        }
    }

    /// Number of entries equal to `key`
    pub fn count(&self, key: &K) -> usize {
        self.tree
            .depth_first_traverse()
            .into_iter()
            .flat_map(|node| node.keys())
            .filter(|probe| self.compare(probe, key).is_eq())
            .count()
    }

    /// Every key in comparator order
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.tree.root() {
            self.collect_in_order(root, &mut keys);
        }
        keys
    }

    /// Smallest key
    pub fn first(&self) -> Option<&K> {
        let mut current = self.tree.root()?;
        while let Some(&child) = self.tree.children(current).first() {
            current = child;
        }
        self.keyed(current).first_key()
    }

    /// Largest key
    pub fn last(&self) -> Option<&K> {
        let mut current = self.tree.root()?;
        while let Some(&child) = self.tree.children(current).last() {
            current = child;
        }
        self.keyed(current).last_key()
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    fn collect_in_order<'a>(&'a self, id: NodeId, keys: &mut Vec<&'a K>) {
        let node = self.keyed(id);
        let children = node.children();
        for (index, key) in node.keys().iter().enumerate() {
            if let Some(&child) = children.get(index) {
                self.collect_in_order(child, keys);
            }
            keys.push(key);
        }
        if let Some(&child) = children.get(node.key_count()) {
            self.collect_in_order(child, keys);
        }
    }

    pub(super) fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.comparator)(a, b)
    }

    /// Index of the first key not less than `key`
    pub(super) fn lower_bound(&self, keys: &[K], key: &K) -> usize {
        keys.partition_point(|probe| self.compare(probe, key).is_lt())
    }

    /// Index of the first key greater than `key`
    pub(super) fn upper_bound(&self, keys: &[K], key: &K) -> usize {
        keys.partition_point(|probe| self.compare(probe, key).is_le())
    }

    pub(super) fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }

    pub(super) fn keyed(&self, id: NodeId) -> &KeyedNode<K> {
        self.tree
            .node(id)
            .unwrap_or_else(|| panic!("B-Tree node {} is missing from the arena", id))
    }

    pub(super) fn keyed_mut(&mut self, id: NodeId) -> &mut KeyedNode<K> {
        self.tree
            .node_mut(id)
            .unwrap_or_else(|| panic!("B-Tree node {} is missing from the arena", id))
    }

    pub(super) fn key_count(&self, id: NodeId) -> usize {
        self.keyed(id).key_count()
    }

    pub(super) fn is_leaf(&self, id: NodeId) -> bool {
        self.keyed(id).is_leaf()
    }

    /// `index`-th child of `parent`
    pub(super) fn child(&self, parent: NodeId, index: usize) -> NodeId {
        self.tree.children(parent)[index]
    }

    /// Add a new node holding `keys`, not yet attached anywhere
    pub(super) fn spawn(&mut self, keys: Vec<K>) -> NodeId {
        let mut node = self.tree.new_node();
        *node.keys_mut() = keys;
        self.tree.insert_detached(node)
    }

    /// Attach `child` below `parent` at `index`, detaching it from any
    /// previous parent
    pub(super) fn attach(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.tree.unlink_child(child);
        if let Err(err) = self.tree.link_child(parent, index, child) {
            panic!("Cannot link B-Tree node {} under {}: {}", child, parent, err);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("degree", &self.degree)
            .field("len", &self.len)
            .field("keys", &self.keys())
            .finish()
    }
}

impl<K> NodeStore for BTree<K> {
    type Node = KeyedNode<K>;

    fn add_node(&mut self, _node: KeyedNode<K>) -> Result<NodeId> {
        Err(GraphError::unsupported("add_node", "BTree"))
    }

    fn remove_node(&mut self, _id: NodeId) -> Result<bool> {
        Err(GraphError::unsupported("remove_node", "BTree"))
    }

    fn get_node(&self, id: NodeId) -> Option<&KeyedNode<K>> {
        self.tree.node(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &KeyedNode<K>> {
        self.tree.graph().nodes()
    }

    fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.tree.graph().connections()
    }

    fn node_count(&self) -> usize {
        self.tree.len()
    }

    fn connection_count(&self) -> usize {
        self.tree.graph().connection_count()
    }
}

/// Builder for [`BTree`]
pub struct BTreeBuilder<K> {
    degree: usize,
    comparator: Comparator<K>,
    ids: Box<dyn IdGenerator>,
}

impl<K> BTreeBuilder<K> {
    pub fn new(degree: usize, comparator: Comparator<K>) -> Self {
        Self {
            degree,
            comparator,
            ids: Box::new(RandomIds::new()),
        }
    }

    /// Order keys with `comparator` instead of the default
    pub fn comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Arc::new(comparator);
        self
    }

    /// Draw node ids from `ids`
    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Fails with `InvalidArgument` if the degree is below 2
    pub fn build(self) -> Result<BTree<K>> {
        if self.degree < 2 {
            return Err(GraphError::invalid_argument(format!(
                "B-Tree degree must be at least 2, got {}",
                self.degree
            )));
        }
        Ok(BTree {
            tree: Tree::with_ids(self.ids),
            degree: self.degree,
            comparator: self.comparator,
            len: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequentialIds;

    #[test]
    fn test_degree_below_two_rejected() {
        assert!(matches!(
            BTree::<i32>::new(1),
            Err(GraphError::InvalidArgument { .. })
        ));
        assert!(BTree::<i32>::new(2).is_ok());
    }

    #[test]
    fn test_empty_queries() {
        let tree = BTree::<i32>::new(2).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert!(!tree.contains(&1));
        assert!(tree.keys().is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_generic_entry_points_unsupported() {
        let mut tree = BTree::builder(2).ids(SequentialIds::new()).build().unwrap();
        tree.insert(1);
        let node = KeyedNode::with_keys(NodeId::new(crate::core::Id::from_u128(99)), vec![5]);
        assert!(matches!(
            tree.add_node(node),
            Err(GraphError::Unsupported { .. })
        ));
        let root = tree.root().unwrap();
        assert!(matches!(
            tree.remove_node(root),
            Err(GraphError::Unsupported { .. })
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_reverse_comparator() {
        let mut tree = BTree::builder(2)
            .comparator(|a: &i32, b: &i32| b.cmp(a))
            .build()
            .unwrap();
        for key in [3, 1, 4, 1, 5, 9, 2, 6] {
            tree.insert(key);
        }
        assert_eq!(tree.keys(), vec![&9, &6, &5, &4, &3, &2, &1, &1]);
        assert_eq!(tree.first(), Some(&9));
        assert_eq!(tree.last(), Some(&1));
        assert_eq!(tree.count(&1), 2);
    }

    #[test]
    fn test_find_returns_holding_node() {
        let mut tree = BTree::new(2).unwrap();
        for key in [10, 20, 5, 6, 12] {
            tree.insert(key);
        }
        assert_eq!(tree.find(&10).map(|n| n.keys().to_vec()), Some(vec![10]));
        assert_eq!(tree.find(&12).map(|n| n.keys().to_vec()), Some(vec![12, 20]));
        assert!(tree.find(&7).is_none());
    }
}
