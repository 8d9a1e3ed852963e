//! State owned by the turn loop
//!
//! - [`SharedBoard`] - the live position, written only by the turn loop
//! - [`turn`] - phase state machine and player clocks
//! - [`GameOutcome`] - how the game ended

pub mod game_over;
pub mod shared_board;
pub mod turn;

pub use game_over::GameOutcome;
pub use shared_board::SharedBoard;
pub use turn::{GameClocks, PlayerClock, TurnPhase, TurnState};
