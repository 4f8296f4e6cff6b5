//! B-Tree insertion
//!
//! Single pass, top-down: every full node met on the way down is split
//! before the descent enters it, so the leaf that receives the key always
//! has room. The tree only grows in height when the root itself is split.

use tracing::{debug, trace};

use super::{BTree, HasKeys};
use crate::core::NodeId;

impl<K> BTree<K> {
    /// Insert `key`
    ///
    /// Keys equal to an existing key are kept as separate entries and sort
    /// after the entries already present.
    pub fn insert(&mut self, key: K) {
        let root = match self.tree.root() {
            None => {
                let root = self.spawn(vec![key]);
                self.tree.set_root(Some(root));
                self.len += 1;
                trace!(node_id = %root, "Created root for first key");
                return;
            }
            Some(root) => root,
        };

        let start = if self.key_count(root) == self.max_keys() {
            let new_root = self.spawn(Vec::new());
            self.tree.set_root(Some(new_root));
            self.attach(new_root, 0, root);
            self.split_child(new_root, 0);
            debug!(old_root = %root, new_root = %new_root, "Root split, tree grew");
            new_root
        } else {
            root
        };

        self.insert_non_full(start, key);
        self.len += 1;
    }

    /// Split the full `index`-th child of `parent` around its median
    ///
    /// The upper half of the keys (and children) move to a new right
    /// sibling and the median moves up into `parent`.
    pub(super) fn split_child(&mut self, parent: NodeId, index: usize) {
        let t = self.degree;
        let full = self.child(parent, index);
        debug_assert_eq!(self.key_count(full), self.max_keys());

        let keys = self.keyed_mut(full).keys_mut();
        let upper = keys.split_off(t);
        let median = keys.pop();
        let Some(median) = median else {
            panic!("Split of B-Tree node {} found no median key", full);
        };

        let sibling = self.spawn(upper);
        if !self.is_leaf(full) {
            let moved: Vec<NodeId> = self.tree.children(full)[t..].to_vec();
            for (offset, child) in moved.into_iter().enumerate() {
                self.attach(sibling, offset, child);
            }
        }

        self.keyed_mut(parent).keys_mut().insert(index, median);
        self.attach(parent, index + 1, sibling);
        debug!(node_id = %full, sibling = %sibling, parent = %parent, "Split node");
    }

    fn insert_non_full(&mut self, start: NodeId, key: K) {
        let mut current = start;
        loop {
            let mut index = self.upper_bound(self.keyed(current).keys(), &key);
            if self.is_leaf(current) {
                debug_assert!(self.key_count(current) < self.max_keys());
                self.keyed_mut(current).keys_mut().insert(index, key);
                trace!(node_id = %current, index, "Inserted key into leaf");
                return;
            }

            if self.key_count(self.child(current, index)) == self.max_keys() {
                self.split_child(current, index);
                let promoted = &self.keyed(current).keys()[index];
                if self.compare(promoted, &key).is_le() {
                    index += 1;
                }
            }
            current = self.child(current, index);
        }
    }
}
