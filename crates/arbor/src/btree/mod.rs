//! Self-balancing B-Tree
//!
//! [`BTree`] keeps its keys in [`KeyedNode`]s arranged as a
//! [`Tree`](crate::tree::Tree). All structural changes go through
//! insertion (node splits) and deletion (borrows, merges, root collapse);
//! the generic add/remove entry points are rejected.

mod delete;
mod insert;
mod node;
mod structure;
mod validate;

pub use node::{HasKeys, KeyedNode};
pub use structure::{BTree, BTreeBuilder, Comparator};
