//! Arbor - Graphs, trees and B-Trees over an id-addressed arena
//!
//! A library for building weighted graphs of nodes and connections, rooted
//! trees that stay acyclic, and self-balancing B-Trees layered on top of
//! those trees.
//!
//! # Quick Start
//!
//! ```rust
//! use arbor::btree::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12] {
//!     tree.insert(key);
//! }
//! print!("{}", arbor::render(&tree).unwrap());
//! ```
//!
//! # Graphs and Trees
//!
//! Nodes are created detached and moved into a container, which hands out
//! [`NodeId`]s for every later reference:
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! let mut graph: Graph = Graph::new();
//! let a = graph.new_node();
//! let a = graph.add(a);
//! let b = graph.new_node();
//! let b = graph.add(b);
//!
//! graph.connect(a, b, Direction::OneWay, 1.0).unwrap();
//! graph.connect(b, a, Direction::OneWay, 1.0).unwrap();
//! assert_eq!(graph.connection_count(), 1);
//! assert_eq!(graph.neighbours(b).unwrap(), vec![a]);
//!
//! let mut tree: Tree = Tree::new();
//! let root = tree.new_node();
//! let root = tree.add_tree_node(root, None).unwrap();
//! let leaf = tree.new_node();
//! tree.add_tree_node(leaf, Some(root)).unwrap();
//! assert_eq!(tree.height(), 2);
//! ```

pub mod btree;
pub mod core;
pub mod graph;
pub mod tree;

pub use core::*;

use std::fmt::Debug;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::btree::{BTree, BTreeBuilder, HasKeys, KeyedNode};
    pub use crate::core::{
        CharacterSet, Connection, ConnectionId, Direction, GraphError, GraphId, GraphNode,
        HasParent, IdGenerator, Label, Node, NodeId, NodeStore, RandomIds, RenderConfig,
        Renderer, SequentialIds, TreeNode,
    };
    pub use crate::graph::{Graph, GraphHierarchy};
    pub use crate::tree::{Tree, TreeRenderer};
}

/// Render a B-Tree as an indented text dump
///
/// Uses the default Unicode character set.
///
/// # Example
/// ```rust
/// use arbor::btree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in [10, 20, 5, 6, 12] {
///     tree.insert(key);
/// }
/// let dump = arbor::render(&tree).unwrap();
/// assert_eq!(dump, "[10]\n├── [5, 6]\n└── [12, 20]\n");
/// ```
pub fn render<K: Debug>(source: &btree::BTree<K>) -> Result<String> {
    render_with_style(source, CharacterSet::default())
}

/// Render a B-Tree with a specific character set
///
/// # Example
/// ```rust
/// use arbor::{btree::BTree, render_with_style, CharacterSet};
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in [1, 2, 3, 4] {
///     tree.insert(key);
/// }
/// let dump = render_with_style(&tree, CharacterSet::Ascii).unwrap();
/// assert_eq!(dump, "[2]\n+-- [1]\n`-- [3, 4]\n");
/// ```
pub fn render_with_style<K: Debug>(source: &btree::BTree<K>, style: CharacterSet) -> Result<String> {
    let renderer = tree::TreeRenderer::with_config(RenderConfig::default().with_charset(style));
    renderer.render(source)
}
