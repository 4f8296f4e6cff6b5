//! Core error types
//!
//! Every fallible operation in arbor reports one of these variants. Errors
//! are raised only after any partial mutation has been undone, so a
//! structure is never left half-updated.

use thiserror::Error;

use super::{ConnectionId, GraphId, NodeId};

/// Core error type for graph, tree and B-Tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("Connection not found: {id}")]
    ConnectionNotFound { id: ConnectionId },

    #[error("Graph not found: {id}")]
    GraphNotFound { id: GraphId },

    #[error("Key not found")]
    KeyNotFound,

    #[error("Unsupported operation: {operation} is not available on {structure}")]
    Unsupported {
        operation: &'static str,
        structure: &'static str,
    },

    #[error("Invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl GraphError {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a new node not found error
    pub fn node_not_found(id: NodeId) -> Self {
        Self::NodeNotFound { id }
    }

    /// Create a new unsupported operation error
    pub fn unsupported(operation: &'static str, structure: &'static str) -> Self {
        Self::Unsupported {
            operation,
            structure,
        }
    }

    /// Create a new invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
