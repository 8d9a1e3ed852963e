//! Minimax with alpha-beta pruning
//!
//! Scores are always from the AI side's point of view (see
//! [`crate::evaluation`]). Nodes where the local viewer is to move minimize,
//! all other nodes maximize. A capture chain keeps the side to move, so the
//! same player can own several consecutive plies.

use super::root::SearchStats;
use crate::board::Board;

/// Evaluate `board` searching `depth` plies
///
/// The input board is never mutated; every child is an independent clone.
pub fn minimax(board: &Board, depth: u8, alpha: i32, beta: i32) -> i32 {
    let mut stats = SearchStats::default();
    alphabeta(board, depth, alpha, beta, &mut stats)
}

pub(crate) fn alphabeta(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        return board.heuristic();
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return board.heuristic();
    }

    if board.is_local_turn() {
        let mut min_eval = i32::MAX;
        for mv in moves {
            let mut child = board.clone();
            child.apply_unchecked(mv);
            let eval = alphabeta(&child, depth - 1, alpha, beta, stats);
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        min_eval
    } else {
        let mut max_eval = i32::MIN;
        for mv in moves {
            let mut child = board.clone();
            child.apply_unchecked(mv);
            let eval = alphabeta(&child, depth - 1, alpha, beta, stats);
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }
        max_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, Position, Side};

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    /// Plain minimax without pruning, used as a reference
    fn full_minimax(board: &Board, depth: u8) -> i32 {
        let moves = board.legal_moves();
        if depth == 0 || moves.is_empty() {
            return board.heuristic();
        }
        let evals = moves.into_iter().map(|mv| {
            let mut child = board.clone();
            child.apply_unchecked(mv);
            full_minimax(&child, depth - 1)
        });
        if board.is_local_turn() {
            evals.min().unwrap_or(i32::MAX)
        } else {
            evals.max().unwrap_or(i32::MIN)
        }
    }

    #[test]
    fn test_depth_zero_is_heuristic() {
        let board = Board::new(Side::Dark);
        assert_eq!(minimax(&board, 0, i32::MIN, i32::MAX), board.heuristic());
    }

    #[test]
    fn test_terminal_board_returns_heuristic() {
        let board = Board::with_pieces(Side::Dark, Side::Light, &[(pos(4, 3), Piece::DarkKing)])
            .unwrap();
        assert_eq!(minimax(&board, 5, i32::MIN, i32::MAX), board.heuristic());
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let board = Board::new(Side::Dark);
        for depth in 1..=4 {
            assert_eq!(
                minimax(&board, depth, i32::MIN, i32::MAX),
                full_minimax(&board, depth),
                "Alpha-beta diverged from minimax at depth {}",
                depth
            );
        }
    }

    #[test]
    fn test_pruning_matches_plain_minimax_midgame() {
        let board = Board::with_pieces(
            Side::Light,
            Side::Light,
            &[
                (pos(2, 1), Piece::LightPawn),
                (pos(2, 3), Piece::LightPawn),
                (pos(1, 4), Piece::LightKing),
                (pos(4, 3), Piece::DarkPawn),
                (pos(5, 4), Piece::DarkPawn),
                (pos(6, 1), Piece::DarkKing),
            ],
        )
        .unwrap();
        for depth in 1..=5 {
            assert_eq!(
                minimax(&board, depth, i32::MIN, i32::MAX),
                full_minimax(&board, depth)
            );
        }
    }

    #[test]
    fn test_input_board_untouched() {
        let board = Board::new(Side::Light);
        let before = board.clone();
        let _ = minimax(&board, 4, i32::MIN, i32::MAX);
        assert_eq!(board, before);
    }
}
