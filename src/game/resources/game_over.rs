//! Game result
//!
//! A game ends in one of two ways:
//!
//! - **Blocked**: the side to move has no legal move (including having no
//!   pieces left) and loses
//! - **Time**: a player's clock reaches zero and that player loses
//!
//! When both happen at once the clock wins: an expired clock overrides
//! whatever the board says. There are no draws.

use checkers_engine::Side;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The loser had no legal move
    Blocked { winner: Side },
    /// The loser's clock ran out
    Time { winner: Side },
}

impl GameOutcome {
    /// Combine the board result with clock expiry
    ///
    /// `expired` is the side whose clock reached zero, if any. Returns `None`
    /// while the game is still going.
    pub fn decide(board_winner: Option<Side>, expired: Option<Side>) -> Option<GameOutcome> {
        match (expired, board_winner) {
            (Some(loser), _) => Some(GameOutcome::Time {
                winner: loser.opponent(),
            }),
            (None, Some(winner)) => Some(GameOutcome::Blocked { winner }),
            (None, None) => None,
        }
    }

    pub fn winner(&self) -> Side {
        match *self {
            GameOutcome::Blocked { winner } | GameOutcome::Time { winner } => winner,
        }
    }

    pub fn loser(&self) -> Side {
        self.winner().opponent()
    }

    pub fn is_on_time(&self) -> bool {
        matches!(self, GameOutcome::Time { .. })
    }

    /// Human-readable result line
    pub fn message(&self) -> String {
        match self {
            GameOutcome::Blocked { winner } => {
                format!("{} wins: {} has no moves left", winner, winner.opponent())
            }
            GameOutcome::Time { winner } => {
                format!("{} wins on time", winner)
            }
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
