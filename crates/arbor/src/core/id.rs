//! Identifiers for nodes, connections and graphs
//!
//! Every entity in an arbor structure is addressed by an opaque [`Id`].
//! Ids are produced by an [`IdGenerator`] that the owning structure receives
//! at construction time, so tests can swap the random default for a
//! deterministic sequence.

use std::fmt;

use uuid::Uuid;

/// Opaque, globally unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(Uuid);

impl Id {
    /// Build an id from a raw 128-bit value
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Last eight hex digits, handy for diagnostics
    pub fn short(&self) -> String {
        let text = self.0.simple().to_string();
        text[text.len() - 8..].to_string()
    }
}

impl From<Uuid> for Id {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Id);

        impl $name {
            /// Wrap a raw id
            pub const fn new(id: Id) -> Self {
                Self(id)
            }

            /// The raw id
            pub fn id(&self) -> Id {
                self.0
            }

            /// Last eight hex digits of the id
            pub fn short(&self) -> String {
                self.0.short()
            }
        }

        impl From<Id> for $name {
            fn from(id: Id) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(
    /// Identifier of a node inside a graph
    NodeId
);
typed_id!(
    /// Identifier of a connection between two nodes
    ConnectionId
);
typed_id!(
    /// Identifier of a graph
    GraphId
);

/// Source of fresh identifiers
///
/// Implementations must never hand out the same id twice.
pub trait IdGenerator: fmt::Debug + Send + Sync {
    /// Produce the next id
    fn next_id(&mut self) -> Id;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> Id {
        (**self).next_id()
    }
}

/// Random version 4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl RandomIds {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Id {
        Id(Uuid::new_v4())
    }
}

/// Deterministic ids counting up from a starting value
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start counting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `start`
    pub fn starting_at(start: u128) -> Self {
        Self { next: start }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Id {
        let id = Id::from_u128(self.next);
        self.next += 1;
        id
    }
}
