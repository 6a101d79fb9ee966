use thiserror::Error;

/// Failure to parse a user-facing name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No algorithm with this identifier
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Not one of inorder, preorder or postorder
    #[error("unknown traversal order: {0}")]
    UnknownTraversal(String),
}
