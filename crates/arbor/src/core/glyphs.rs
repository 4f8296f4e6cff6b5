//! Branch drawing characters for tree dumps
//!
//! Shared by every renderer so ASCII and Unicode output stay consistent.

use super::CharacterSet;

/// Prefixes drawn in front of a node line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchChars {
    /// A child that has later siblings
    pub tee: &'static str,
    /// The last child of its parent
    pub corner: &'static str,
    /// Continuation under a child that has later siblings
    pub pipe: &'static str,
    /// Continuation under the last child
    pub blank: &'static str,
}

impl BranchChars {
    /// Glyphs for the given character set
    pub fn for_charset(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self::unicode(),
        }
    }

    /// ASCII-only glyphs
    pub fn ascii() -> Self {
        Self {
            tee: "+-- ",
            corner: "`-- ",
            pipe: "|   ",
            blank: "    ",
        }
    }

    /// Unicode box-drawing glyphs
    pub fn unicode() -> Self {
        Self {
            tee: "├── ",
            corner: "└── ",
            pipe: "│   ",
            blank: "    ",
        }
    }

    /// Prefix for a node line
    pub fn branch(&self, is_last: bool) -> &'static str {
        if is_last {
            self.corner
        } else {
            self.tee
        }
    }

    /// Indentation handed down to the node's children
    pub fn continuation(&self, is_last: bool) -> &'static str {
        if is_last {
            self.blank
        } else {
            self.pipe
        }
    }
}
