//! Root move selection
//!
//! Scores every legal move of the side to move with [`alphabeta`] and keeps
//! the first move with the strictly greatest score, so ties resolve to the
//! earliest move in generation order.

use tracing::debug;

use super::alphabeta::alphabeta;
use crate::board::Board;
use crate::types::Move;

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root
    pub nodes: u64,
    /// Sibling loops cut short by pruning
    pub cutoffs: u64,
}

/// Outcome of a root search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score of `best_move`; `None` when no search was needed
    pub score: Option<i32>,
    pub stats: SearchStats,
}

/// Pick a move for the side to move, searching `depth` plies below each
/// candidate
pub fn search(board: &Board, depth: u8) -> SearchResult {
    let mut stats = SearchStats::default();
    let moves = board.legal_moves();

    if moves.len() <= 1 {
        return SearchResult {
            best_move: moves.first().copied(),
            score: None,
            stats,
        };
    }

    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let mut child = board.clone();
        child.apply_unchecked(mv);
        let eval = alphabeta(&child, depth, i32::MIN, i32::MAX, &mut stats);
        if best.map_or(true, |(_, best_eval)| eval > best_eval) {
            best = Some((mv, eval));
        }
    }

    debug!(
        "search depth {} nodes {} cutoffs {} best {:?}",
        depth, stats.nodes, stats.cutoffs, best
    );

    SearchResult {
        best_move: best.map(|(mv, _)| mv),
        score: best.map(|(_, eval)| eval),
        stats,
    }
}

/// Best move for the side to move, or `None` if it has no legal move
pub fn choose_move(board: &Board, depth: u8) -> Option<Move> {
    search(board, depth).best_move
}
