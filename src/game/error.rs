//! Error types for game module
//!
//! Provides custom error types for the turn loop: transport failures,
//! engine rejections, closed input and failed search workers.

use checkers_engine::EngineError;

use crate::networking::NetworkError;

/// Errors that can end a game early
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Connection to the remote player failed
    #[error("Transport failure: {0}")]
    Transport(#[from] NetworkError),

    /// Board engine rejected a move
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Local move input was closed before the game ended
    #[error("Local move input closed")]
    InputClosed,

    /// Search worker panicked or was cancelled
    #[error("AI search failed: {message}")]
    SearchFailed { message: String },

    /// Invalid turn phase transition
    #[error("Invalid game state transition: {message}")]
    InvalidStateTransition { message: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
