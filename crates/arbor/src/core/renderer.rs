//! Core renderer trait for diagnostic output
//!
//! Renderers are read-only visitors: they walk a structure and produce a
//! human-readable description without mutating it.

use super::{NodeStore, Result};

/// Core trait for renderers
///
/// # Example
/// ```
/// use arbor::btree::BTree;
/// use arbor::core::Renderer;
/// use arbor::tree::TreeRenderer;
///
/// let mut tree = BTree::new(2).unwrap();
/// tree.insert(1);
/// let output = TreeRenderer::new().render(&tree).unwrap();
/// assert_eq!(output, "[1]\n");
/// ```
pub trait Renderer<S: NodeStore>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the structure into the output format
    fn render(&self, source: &S) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
