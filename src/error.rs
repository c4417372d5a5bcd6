use thiserror::Error;

/// Failure to construct a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Both dimensions must be at least 1.
    #[error("invalid grid dimensions {rows}x{cols}: rows and columns must be positive")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Failure to decode a seed pattern. A pattern that fails is never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("illegal character {ch:?} at row {row}, column {col} (expected '0' or '1')")]
    IllegalCharacter { row: usize, col: usize, ch: char },

    #[error("pattern row {row} has {len} cells but the grid has only {max} columns")]
    RowTooLong { row: usize, len: usize, max: usize },

    #[error("pattern has {count} rows but the grid has only {max} rows")]
    TooManyRows { count: usize, max: usize },
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid construction failed: {0}")]
    Grid(#[from] GridError),

    #[error("seed pattern rejected: {0}")]
    Pattern(#[from] PatternError),

    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),
}
