//! Public API for the checkers engine
//!
//! Thin entry points for game management and AI move generation.

use crate::board::Board;
use crate::constants::{MAX_DEPTH, MIN_DEPTH};
use crate::search::{search, SearchResult};
use crate::types::Side;

/// Create a new game with the initial position
pub fn new_game(local_side: Side) -> Board {
    Board::new(local_side)
}

/// Get the AI's reply for the current position
///
/// `depth` is clamped to the supported difficulty range.
pub fn reply(board: &Board, depth: u8) -> SearchResult {
    search(board, depth.clamp(MIN_DEPTH, MAX_DEPTH))
}
