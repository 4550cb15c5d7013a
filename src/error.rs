use thiserror::Error;

/// Result type for all graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph construction, serialization and contraction.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A caller-supplied argument or graph state violated a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Edge selection was attempted on an empty (or, in weighted mode,
    /// non-positively weighted) edge multiset while more than two vertices
    /// remain. This means the input graph was disconnected or malformed.
    #[error("edge selection on an empty or zero-weight edge set")]
    EmptyEdgeSet,

    /// An edge operation referenced a vertex that is not one of the edge's
    /// two endpoints.
    #[error("edge {edge:?} does not contain vertex {vertex}")]
    VertexNotOnEdge { edge: (usize, usize), vertex: usize },

    /// Filesystem failure while saving or loading a graph file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of a serialized graph file could not be parsed. The offending
    /// line is carried verbatim so the caller can report it.
    #[error("malformed graph line {line:?}: {reason}")]
    Parse { line: String, reason: String },
}

impl GraphError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }
}
