//! Error types for the visualizer model.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while preparing or mutating algorithm inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Grid lacks exactly one start and one finish
    #[error("grid needs exactly one start and one finish node")]
    MissingEndpoints,

    /// A required input was empty
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Puzzle board with the wrong number of cells
    #[error("board has {found} cells, expected {expected}")]
    BoardSize { expected: usize, found: usize },

    /// Coordinate outside the grid
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    /// Start and finish cells cannot become walls
    #[error("cell ({row}, {col}) is a start or finish node")]
    ProtectedCell { row: usize, col: usize },
}
