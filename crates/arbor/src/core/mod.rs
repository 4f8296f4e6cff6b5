//! Core building blocks
//!
//! Identifiers, connection and node records, the shared error type, the
//! generic store and renderer traits, and logging setup. The graph, tree
//! and B-Tree modules are all built from these pieces.

mod connection;
mod error;
mod glyphs;
mod id;
pub mod logging;
mod node;
mod renderer;
mod store;
mod types;

pub use connection::*;
pub use error::*;
pub use glyphs::*;
pub use id::*;
pub use logging::*;
pub use node::*;
pub use renderer::*;
pub use store::*;
pub use types::*;
