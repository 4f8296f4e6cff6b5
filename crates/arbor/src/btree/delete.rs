//! B-Tree deletion
//!
//! Single pass, top-down: before descending into a child that holds only
//! `t - 1` keys, the child is topped up by borrowing a key from a sibling
//! or merging with one, so the key can always be removed from the node it
//! is found in without underflow. Nodes emptied by merges and root collapse
//! are returned to the caller.

use std::mem;

use tracing::{debug, trace};

use super::{BTree, HasKeys, KeyedNode};
use crate::core::{GraphError, NodeId, Result};

impl<K> BTree<K> {
    /// Remove one entry equal to `key`
    ///
    /// Returns the nodes retired by merges and root collapse. Fails with
    /// `KeyNotFound`, leaving the tree untouched, if no entry matches.
    pub fn remove(&mut self, key: &K) -> Result<Vec<KeyedNode<K>>> {
        if !self.contains(key) {
            return Err(GraphError::KeyNotFound);
        }
        let Some(root) = self.tree.root() else {
            return Err(GraphError::KeyNotFound);
        };

        let mut retired = Vec::new();
        self.delete_from(root, key, &mut retired);
        self.len -= 1;

        if self.key_count(root) == 0 {
            let next_root = self.tree.children(root).first().copied();
            self.tree.set_root(next_root);
            if let Some(old) = self.tree.take_node(root) {
                retired.push(old);
            }
            match next_root {
                Some(next) => debug!(old_root = %root, new_root = %next, "Root collapsed"),
                None => debug!(old_root = %root, "Last key removed, tree is empty"),
            }
        }
        Ok(retired)
    }

    fn delete_from(&mut self, node: NodeId, key: &K, retired: &mut Vec<KeyedNode<K>>) {
        let keys = self.keyed(node).keys();
        let index = self.lower_bound(keys, key);
        let found = index < keys.len() && self.compare(&keys[index], key).is_eq();

        if found {
            if self.is_leaf(node) {
                self.keyed_mut(node).keys_mut().remove(index);
                trace!(node_id = %node, index, "Removed key from leaf");
            } else {
                self.delete_internal(node, index, key, retired);
            }
            return;
        }

        if self.is_leaf(node) {
            return;
        }

        let was_last = index == self.key_count(node);
        if self.key_count(self.child(node, index)) < self.degree {
            self.fill(node, index, retired);
        }
        // A merge with the left sibling shifts the target child down by one
        let index = if was_last && index > self.key_count(node) {
            index - 1
        } else {
            index
        };
        let child = self.child(node, index);
        self.delete_from(child, key, retired);
    }

    /// Remove the key at `index` of an internal node
    fn delete_internal(
        &mut self,
        node: NodeId,
        index: usize,
        key: &K,
        retired: &mut Vec<KeyedNode<K>>,
    ) {
        let t = self.degree;
        let left = self.child(node, index);
        let right = self.child(node, index + 1);

        if self.key_count(left) >= t {
            let predecessor = self.pop_last(left, retired);
            self.keyed_mut(node).keys_mut()[index] = predecessor;
            trace!(node_id = %node, index, "Replaced key with predecessor");
        } else if self.key_count(right) >= t {
            let successor = self.pop_first(right, retired);
            self.keyed_mut(node).keys_mut()[index] = successor;
            trace!(node_id = %node, index, "Replaced key with successor");
        } else {
            self.merge(node, index, retired);
            self.delete_from(left, key, retired);
        }
    }

    /// Take the largest key out of the subtree rooted at `node`, which must
    /// hold at least `t` keys
    fn pop_last(&mut self, node: NodeId, retired: &mut Vec<KeyedNode<K>>) -> K {
        let mut current = node;
        while !self.is_leaf(current) {
            let mut index = self.key_count(current);
            if self.key_count(self.child(current, index)) < self.degree {
                self.fill(current, index, retired);
                index = index.min(self.key_count(current));
            }
            current = self.child(current, index);
        }
        match self.keyed_mut(current).keys_mut().pop() {
            Some(key) => key,
            None => panic!("B-Tree leaf {} is empty", current),
        }
    }

    /// Take the smallest key out of the subtree rooted at `node`, which must
    /// hold at least `t` keys
    fn pop_first(&mut self, node: NodeId, retired: &mut Vec<KeyedNode<K>>) -> K {
        let mut current = node;
        while !self.is_leaf(current) {
            if self.key_count(self.child(current, 0)) < self.degree {
                self.fill(current, 0, retired);
            }
            current = self.child(current, 0);
        }
        let keys = self.keyed_mut(current).keys_mut();
        if keys.is_empty() {
            panic!("B-Tree leaf {} is empty", current);
        }
        keys.remove(0)
    }

    /// Give the `index`-th child of `node` at least `t` keys
    fn fill(&mut self, node: NodeId, index: usize, retired: &mut Vec<KeyedNode<K>>) {
        let t = self.degree;
        let key_count = self.key_count(node);

        if index > 0 && self.key_count(self.child(node, index - 1)) >= t {
            self.borrow_from_previous(node, index);
        } else if index < key_count && self.key_count(self.child(node, index + 1)) >= t {
            self.borrow_from_next(node, index);
        } else if index < key_count {
            self.merge(node, index, retired);
        } else {
            self.merge(node, index - 1, retired);
        }
    }

    /// Rotate the left sibling's last key up into `node` and the separator
    /// down to the front of the `index`-th child
    fn borrow_from_previous(&mut self, node: NodeId, index: usize) {
        let child = self.child(node, index);
        let sibling = self.child(node, index - 1);

        let Some(up) = self.keyed_mut(sibling).keys_mut().pop() else {
            panic!("B-Tree sibling {} has no key to lend", sibling);
        };
        let down = mem::replace(&mut self.keyed_mut(node).keys_mut()[index - 1], up);
        self.keyed_mut(child).keys_mut().insert(0, down);

        if let Some(&moved) = self.tree.children(sibling).last() {
            self.attach(child, 0, moved);
        }
        debug!(node_id = %child, sibling = %sibling, "Borrowed key from previous sibling");
    }

    /// Rotate the right sibling's first key up into `node` and the
    /// separator down to the end of the `index`-th child
    fn borrow_from_next(&mut self, node: NodeId, index: usize) {
        let child = self.child(node, index);
        let sibling = self.child(node, index + 1);

        let sibling_keys = self.keyed_mut(sibling).keys_mut();
        if sibling_keys.is_empty() {
            panic!("B-Tree sibling {} has no key to lend", sibling);
        }
        let up = sibling_keys.remove(0);
        let down = mem::replace(&mut self.keyed_mut(node).keys_mut()[index], up);
        self.keyed_mut(child).keys_mut().push(down);

        if let Some(&moved) = self.tree.children(sibling).first() {
            self.attach(child, usize::MAX, moved);
        }
        debug!(node_id = %child, sibling = %sibling, "Borrowed key from next sibling");
    }

    /// Fold the `index + 1`-th child and the separator at `index` into the
    /// `index`-th child, retiring the emptied sibling
    fn merge(&mut self, node: NodeId, index: usize, retired: &mut Vec<KeyedNode<K>>) {
        let child = self.child(node, index);
        let sibling = self.child(node, index + 1);

        let separator = self.keyed_mut(node).keys_mut().remove(index);
        let sibling_keys = mem::take(self.keyed_mut(sibling).keys_mut());
        let keys = self.keyed_mut(child).keys_mut();
        keys.push(separator);
        keys.extend(sibling_keys);

        let moved: Vec<NodeId> = self.tree.children(sibling).to_vec();
        for grandchild in moved {
            self.attach(child, usize::MAX, grandchild);
        }

        self.tree.unlink_child(sibling);
        if let Some(old) = self.tree.take_node(sibling) {
            retired.push(old);
        }
        debug_assert!(self.key_count(child) <= self.max_keys());
        debug!(node_id = %child, retired = %sibling, "Merged siblings");
    }
}
