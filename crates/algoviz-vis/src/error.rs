//! Error types for the replay engine and server.

use algoviz_algorithms::Algorithm;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Errors that can occur while driving a visualization.
#[derive(Debug, Error)]
pub enum VisError {
    /// A run or traversal is already in flight
    #[error("an animation is already running")]
    AlreadyRunning,

    /// Playback control used without a captured run
    #[error("no animation to control")]
    NotRunning,

    /// The generator produced an empty log
    #[error("{0} produced no steps for the current input")]
    NothingToAnimate(Algorithm),

    /// The algorithm is driven by user actions, not a step log
    #[error("{0} is driven by user actions")]
    Interactive(Algorithm),

    /// Operation does not apply to the selected algorithm
    #[error("{op} is not available for {algorithm}")]
    WrongAlgorithm { op: &'static str, algorithm: Algorithm },

    /// Traversal requested on an empty tree
    #[error("tree is empty")]
    EmptyTree,

    /// Bad request payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Environment variable with an unusable value
    #[error("invalid {var}: {value:?}")]
    Config { var: &'static str, value: String },

    /// Model error
    #[error(transparent)]
    Model(#[from] algoviz_core::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VisError::AlreadyRunning | VisError::NotRunning => StatusCode::CONFLICT,
            VisError::NothingToAnimate(_)
            | VisError::Interactive(_)
            | VisError::WrongAlgorithm { .. }
            | VisError::EmptyTree
            | VisError::InvalidInput(_)
            | VisError::Model(_) => StatusCode::UNPROCESSABLE_ENTITY,
            VisError::Config { .. } | VisError::Serialization(_) | VisError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for VisError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
