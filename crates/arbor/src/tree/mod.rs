//! Rooted trees
//!
//! [`Tree`] restricts a [`Graph`](crate::graph::Graph) to a single-parent,
//! acyclic shape and adds search, traversal and measurement.
//! [`TreeRenderer`] dumps trees as indented text.

mod renderer;
mod structure;
mod traversal;

pub use renderer::TreeRenderer;
pub use structure::Tree;
