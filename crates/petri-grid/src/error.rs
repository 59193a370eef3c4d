//! Error types for the grid engine.

use std::error::Error;
use std::fmt;

/// Errors from grid construction and cell addressing.
///
/// Both variants are local, recoverable conditions: the operation that
/// raised them is rejected and the existing grid is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A requested dimension was zero or negative at grid-creation time.
    InvalidDimension {
        /// The requested row count.
        rows: i32,
        /// The requested column count.
        cols: i32,
    },
    /// A cell index fell outside the grid extent.
    OutOfBounds {
        /// The requested row.
        row: i32,
        /// The requested column.
        col: i32,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        cols: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "cell ({row}, {col}) outside grid bounds [0, {rows}) x [0, {cols})"
                )
            }
        }
    }
}

impl Error for GridError {}
