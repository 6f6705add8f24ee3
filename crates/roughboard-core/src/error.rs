//! Error types for the board core.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Errors reported by the fallible parts of the core API.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Shape {id} does not exist (collection holds {len} shapes)")]
    UnknownShape { id: ShapeId, len: usize },
    #[error("Shape at position {position} carries id {id}")]
    MisplacedShape { position: usize, id: ShapeId },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
