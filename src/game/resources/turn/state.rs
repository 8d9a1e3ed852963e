//! Turn phase state machine
//!
//! Tracks whose input the turn loop is waiting for. A capture chain keeps
//! the same phase for several consecutive moves.

use checkers_engine::Board;
use tracing::error;

use crate::game::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Waiting for the local player
    ///
    /// Valid transitions: → AwaitingLocalMove (chain), → AwaitingOpponentMove, → Terminal
    AwaitingLocalMove,

    /// Waiting for the AI or the remote player
    ///
    /// Valid transitions: → AwaitingOpponentMove (chain), → AwaitingLocalMove, → Terminal
    AwaitingOpponentMove,

    /// Game has ended
    ///
    /// Terminal state
    Terminal,
}

impl TurnPhase {
    /// Phase matching the board's side to move
    pub fn for_board(board: &Board) -> Self {
        if board.is_terminal() {
            TurnPhase::Terminal
        } else if board.is_local_turn() {
            TurnPhase::AwaitingLocalMove
        } else {
            TurnPhase::AwaitingOpponentMove
        }
    }

    pub fn accepts_local_input(&self) -> bool {
        matches!(self, TurnPhase::AwaitingLocalMove)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Terminal)
    }
}

/// Current phase plus move counter
#[derive(Debug, Clone)]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Moves applied so far, chain steps included
    pub moves_played: u32,
}

impl TurnState {
    pub fn new(phase: TurnPhase) -> Self {
        Self {
            phase,
            moves_played: 0,
        }
    }

    /// Move to the next phase
    ///
    /// # Errors
    /// Leaving `Terminal` is rejected and logged; the phase is unchanged.
    pub fn transition_to(&mut self, next_phase: TurnPhase) -> GameResult<()> {
        let valid = match (self.phase, next_phase) {
            (TurnPhase::Terminal, _) => false,
            (TurnPhase::AwaitingLocalMove, _) => true,
            (TurnPhase::AwaitingOpponentMove, _) => true,
        };

        if !valid {
            error!(
                "[TURN_STATE] Invalid turn state transition: {:?} -> {:?}",
                self.phase, next_phase
            );
            return Err(GameError::InvalidStateTransition {
                message: format!("{:?} -> {:?}", self.phase, next_phase),
            });
        }

        self.phase = next_phase;
        Ok(())
    }

    /// Record an applied move and enter the phase for `board`
    pub fn advance(&mut self, board: &Board) -> GameResult<()> {
        self.moves_played += 1;
        self.transition_to(TurnPhase::for_board(board))
    }
}
