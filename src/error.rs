use thiserror::Error;

/// Precondition failures. Any of these aborts a solve before the first pivot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("the problem matrix has no rows or no columns")]
    EmptyProblem,
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("entry at row {row}, column {col} is not a finite number")]
    NonFiniteEntry { row: usize, col: usize },
    #[error(
        "problem of {rows}x{cols} (including slack columns) exceeds the {max_rows}x{max_cols} capacity"
    )]
    CapacityExceeded {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },
    #[error("constraint row {row} has a negative right-hand side {rhs}; the all-slack basis is infeasible")]
    InfeasibleStart { row: usize, rhs: f64 },
    #[error("slack variables have already been added to this tableau")]
    AlreadyAugmented,
    #[error("expected {expected} structural variables, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimplexError>;
