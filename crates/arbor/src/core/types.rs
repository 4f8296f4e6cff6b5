//! Core type definitions
//!
//! Connection direction, the character set used by the diagnostic renderer
//! and the renderer configuration.

use std::fmt;
use std::str::FromStr;

/// Direction of a connection between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Traversable only from `from` to `to`
    #[default]
    OneWay,
    /// Traversable from either endpoint
    TwoWay,
}

impl Direction {
    /// Returns true for [`Direction::OneWay`]
    pub fn is_one_way(&self) -> bool {
        matches!(self, Direction::OneWay)
    }

    /// Returns true for [`Direction::TwoWay`]
    pub fn is_two_way(&self) -> bool {
        matches!(self, Direction::TwoWay)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::OneWay => write!(f, "-->"),
            Direction::TwoWay => write!(f, "<->"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-way" | "oneway" | "directed" | "-->" => Ok(Direction::OneWay),
            "two-way" | "twoway" | "undirected" | "<->" => Ok(Direction::TwoWay),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Character set for rendering output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII characters only: | + ` -
    Ascii,
    /// Unicode box-drawing characters: │ ├ └ ─
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Configuration for the diagnostic renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Glyphs used for branches
    pub charset: CharacterSet,
    /// Append the short node id to every line
    pub show_ids: bool,
}

impl RenderConfig {
    pub fn new(charset: CharacterSet, show_ids: bool) -> Self {
        Self { charset, show_ids }
    }

    /// Same configuration with a different character set
    pub fn with_charset(mut self, charset: CharacterSet) -> Self {
        self.charset = charset;
        self
    }

    /// Same configuration with node ids shown or hidden
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }
}
