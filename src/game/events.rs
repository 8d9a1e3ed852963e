//! Events reported by the turn loop to its collaborators

use checkers_engine::{Move, Side};

use super::resources::GameOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was applied to the live board
    MoveApplied {
        side: Side,
        mv: Move,
        /// Same side moves again (capture chain continues)
        chain_continues: bool,
    },

    /// The game finished normally
    GameOver(GameOutcome),

    /// The game was abandoned; carries the reason
    Aborted { reason: String },
}
