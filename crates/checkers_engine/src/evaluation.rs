//! Static evaluation
//!
//! Material only: a pawn is worth [`PAWN_VALUE`], a king [`KING_VALUE`].
//! Scores are oriented toward the local viewer's opponent (the AI side), so
//! a positive score means the AI is ahead no matter whose turn it is.

use crate::board::Board;
use crate::constants::{KING_VALUE, PAWN_VALUE};
use crate::types::Side;

/// Material of one side
pub fn material(board: &Board, side: Side) -> i32 {
    PAWN_VALUE * board.count(side.pawn()) as i32 + KING_VALUE * board.count(side.king()) as i32
}

/// Material balance from the AI side's point of view
pub fn evaluate(board: &Board) -> i32 {
    let ai = board.local_side().opponent();
    material(board, ai) - material(board, ai.opponent())
}

impl Board {
    /// Static score of this position, positive when the AI side is ahead
    pub fn heuristic(&self) -> i32 {
        evaluate(self)
    }
}
