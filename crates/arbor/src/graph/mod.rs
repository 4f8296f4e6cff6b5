//! Graph model
//!
//! [`Graph`] owns nodes and the weighted connections between them and
//! answers neighbour and cycle queries. [`GraphHierarchy`] nests graphs
//! inside one another.

mod arena;
mod cycles;
mod hierarchy;

pub use arena::Graph;
pub use hierarchy::GraphHierarchy;
