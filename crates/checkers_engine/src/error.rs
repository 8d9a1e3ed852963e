//! Error types for checkers engine
//!
//! Provides custom error types for board operations: move validation and
//! square decoding.

use thiserror::Error;

use crate::types::Move;

/// Errors that can occur in the checkers engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Move is not in the legal set for its source square
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// Square outside the 8x8 board
    #[error("Invalid square ({row}, {col}) (must be 0-7)")]
    InvalidSquare { row: i8, col: i8 },

    /// Wire code outside the 32 playable squares
    #[error("Invalid square code: {code} (must be 0-31)")]
    InvalidSquareCode { code: u8 },
}

/// Result type alias for checkers engine operations
pub type EngineResult<T> = Result<T, EngineError>;
