//! Checkers rules engine and computer opponent
//!
//! - [`types`] - sides, pieces, squares, moves and the square wire code
//! - [`board`] - board state, move application, terminal detection
//! - [`move_gen`] - legal move generation with forced captures
//! - [`evaluation`] - material heuristic
//! - [`search`] - minimax with alpha-beta pruning
//! - [`api`] - convenience entry points used by the game layer

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod move_gen;
pub mod search;
pub mod types;

pub use board::Board;
pub use error::{EngineError, EngineResult};
pub use types::{Move, Piece, Position, Side};
