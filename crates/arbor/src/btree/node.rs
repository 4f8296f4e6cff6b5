//! B-Tree nodes

use std::fmt::Debug;

use crate::core::{GraphNode, HasParent, Label, NodeId, NodeRecord, TreeLinks};

/// A tree node holding an ordered run of keys
pub trait HasKeys: HasParent {
    type Key;

    fn keys(&self) -> &[Self::Key];

    fn key_count(&self) -> usize {
        self.keys().len()
    }

    fn first_key(&self) -> Option<&Self::Key> {
        self.keys().first()
    }

    fn last_key(&self) -> Option<&Self::Key> {
        self.keys().last()
    }
}

/// A node of a [`BTree`](super::BTree)
///
/// Keys are only changed by the B-Tree algorithms, never by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedNode<K> {
    record: NodeRecord,
    links: TreeLinks,
    keys: Vec<K>,
}

impl<K> KeyedNode<K> {
    pub(crate) fn with_keys(id: NodeId, keys: Vec<K>) -> Self {
        Self {
            record: NodeRecord::new(id),
            links: TreeLinks::default(),
            keys,
        }
    }

    pub(crate) fn keys_mut(&mut self) -> &mut Vec<K> {
        &mut self.keys
    }
}

impl<K> GraphNode for KeyedNode<K> {
    fn from_id(id: NodeId) -> Self {
        Self::with_keys(id, Vec::new())
    }

    fn record(&self) -> &NodeRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut NodeRecord {
        &mut self.record
    }

    fn detach(&mut self) {
        self.record.clear_connections();
        self.links.clear();
    }
}

impl<K> HasParent for KeyedNode<K> {
    fn links(&self) -> &TreeLinks {
        &self.links
    }

    fn links_mut(&mut self) -> &mut TreeLinks {
        &mut self.links
    }
}

impl<K> HasKeys for KeyedNode<K> {
    type Key = K;

    fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K: Debug> Label for KeyedNode<K> {
    fn label(&self) -> String {
        format!("{:?}", self.keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Id;

    #[test]
    fn test_label_lists_keys() {
        let node = KeyedNode::with_keys(NodeId::new(Id::from_u128(1)), vec![3, 7]);
        assert_eq!(node.label(), "[3, 7]");
        assert_eq!(node.key_count(), 2);
        assert_eq!(node.first_key(), Some(&3));
        assert_eq!(node.last_key(), Some(&7));
    }

    #[test]
    fn test_detach_keeps_keys() {
        let mut node = KeyedNode::with_keys(NodeId::new(Id::from_u128(1)), vec!["a"]);
        node.links_mut().set_parent(Some(NodeId::new(Id::from_u128(2))));
        node.detach();
        assert!(node.parent().is_none());
        assert_eq!(node.keys(), &["a"]);
    }
}
