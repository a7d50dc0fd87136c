use thiserror::Error;

/// Errors raised while constructing a [Grid](crate::grid::Grid). These signal a bug in the
/// caller; searching on an existing grid never fails with an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have a positive area, got {width}x{height}")]
    ZeroArea { width: usize, height: usize },

    #[error("grid of {width}x{height} cells is too large to index")]
    TooLarge { width: usize, height: usize },

    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, GridError>;
