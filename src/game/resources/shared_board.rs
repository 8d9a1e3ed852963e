//! Live board shared between the turn loop and its readers
//!
//! The turn loop is the only writer. Readers get a cloned snapshot under the
//! read lock, so they never see a move half applied.

use std::sync::Arc;

use checkers_engine::{Board, EngineResult, Move, Side};
use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub struct SharedBoard(Arc<RwLock<Board>>);

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self(Arc::new(RwLock::new(board)))
    }

    /// Copy of the current position
    pub fn snapshot(&self) -> Board {
        self.0.read().clone()
    }

    /// Run `f` against the current position under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.0.read())
    }

    /// Apply a move; returns whether the same side moves again
    pub(crate) fn apply(&self, mv: Move) -> EngineResult<bool> {
        let mut board = self.0.write();
        let side = board.side_to_move();
        board.apply(mv)?;
        Ok(board.side_to_move() == side)
    }

    /// Replace the position with a fresh game
    pub(crate) fn reset(&self, local_side: Side) {
        *self.0.write() = Board::new(local_side);
    }
}
