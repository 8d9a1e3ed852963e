//! Move generation
//!
//! Generates ordinary steps and captures for the side to move and applies
//! the forced-capture rule:
//!
//! - if any piece of the side to move can capture, only captures are legal;
//! - during a capture chain only captures by the chaining piece are legal;
//! - a piece that cannot capture while another piece can is frozen for the
//!   turn.
//!
//! Moves come out in a fixed order (row-major over source squares, then the
//! direction tables in [`crate::constants`]), which keeps search results
//! reproducible.

use crate::board::Board;
use crate::constants::{JUMP_DIRECTIONS, STEP_DIRECTIONS};
use crate::types::{Move, Position};

/// Destination free and movement direction allowed for the moving piece
fn is_valid_step(board: &Board, mv: &Move) -> bool {
    if !mv.to.is_on_board() || board.piece_at(mv.to).is_some() {
        return false;
    }
    let Some(piece) = board.piece_at(mv.from) else {
        return false;
    };
    let side = board.side_to_move();
    if piece.side() != side {
        return false;
    }
    if piece.is_king() {
        return true;
    }
    (mv.to.row - mv.from.row).signum() == side.forward()
}

/// A valid step that also jumps an opponent piece
fn is_valid_capture(board: &Board, mv: &Move) -> bool {
    let Some(skip) = mv.skip else {
        return false;
    };
    let opponent = board.side_to_move().opponent();
    is_valid_step(board, mv)
        && board
            .piece_at(skip)
            .is_some_and(|piece| piece.side() == opponent)
}

/// Ordinary one-step moves of the piece on `from`
pub fn ordinary_moves_from(board: &Board, from: Position) -> Vec<Move> {
    STEP_DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .map(|to| Move::new(from, to))
        .filter(|mv| is_valid_step(board, mv))
        .collect()
}

/// Captures available to the piece on `from`
pub fn captures_from(board: &Board, from: Position) -> Vec<Move> {
    JUMP_DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .map(|to| Move::new(from, to))
        .filter(|mv| is_valid_capture(board, mv))
        .collect()
}

/// Squares holding a piece of the side to move
fn own_squares(board: &Board) -> impl Iterator<Item = Position> + '_ {
    let side = board.side_to_move();
    Position::all().filter(move |&pos| board.piece_at(pos).is_some_and(|p| p.side() == side))
}

/// Every capture available to the side to move
pub fn all_captures(board: &Board) -> Vec<Move> {
    own_squares(board)
        .flat_map(|from| captures_from(board, from))
        .collect()
}

/// Whether the side to move has any capture at all
pub fn has_any_capture(board: &Board) -> bool {
    own_squares(board).any(|from| !captures_from(board, from).is_empty())
}

/// Every ordinary move available to the side to move
pub fn all_ordinary_moves(board: &Board) -> Vec<Move> {
    own_squares(board)
        .flat_map(|from| ordinary_moves_from(board, from))
        .collect()
}

/// Legal moves for the side to move
pub fn legal_moves(board: &Board) -> Vec<Move> {
    if let Some(chain) = board.continuation() {
        return captures_from(board, chain);
    }
    let captures = all_captures(board);
    if !captures.is_empty() {
        return captures;
    }
    all_ordinary_moves(board)
}

/// Legal moves for the piece on `from`
pub fn legal_moves_from(board: &Board, from: Position) -> Vec<Move> {
    if !from.is_on_board() {
        return Vec::new();
    }
    match board.continuation() {
        Some(chain) if chain == from => return captures_from(board, from),
        Some(_) => return Vec::new(),
        None => {}
    }
    let captures = captures_from(board, from);
    if !captures.is_empty() {
        return captures;
    }
    if has_any_capture(board) {
        // Another piece must capture; this one is frozen
        return Vec::new();
    }
    ordinary_moves_from(board, from)
}
