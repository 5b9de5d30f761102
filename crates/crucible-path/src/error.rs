//! Errors raised while building a cost grid or searching it.

/// Problems with the textual grid handed to [`CostGrid`](crate::CostGrid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInput {
    #[error("the grid has no cells")]
    EmptyGrid,
    #[error("line {line}, column {column}: expected a digit, found {found:?}")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },
    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed grid input: {0}")]
    MalformedInput(#[from] MalformedInput),
    #[error("min straight run {min_straight} exceeds max straight run {max_straight}")]
    InvalidConstraints { min_straight: u32, max_straight: u32 },
    #[error("no path reaches the target with straight runs between {min_straight} and {max_straight}")]
    NoPathFound { min_straight: u32, max_straight: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
