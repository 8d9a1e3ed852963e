//! Turn flow: phase state machine and clocks

pub mod state;
pub mod timer;

pub use state::{TurnPhase, TurnState};
pub use timer::{GameClocks, PlayerClock};
