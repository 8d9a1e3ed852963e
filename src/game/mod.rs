//! Checkers game flow on top of `checkers_engine`
//!
//! The engine knows the rules; this module runs games with them.
//!
//! # Module Organization
//!
//! - `ai` - computer opponent configuration
//! - `resources` - shared board, turn phase, clocks, game result
//! - `systems` - move sources, the turn loop and game setup
//! - `events` - what the turn loop reports to the front-end
//!
//! # Concurrency
//!
//! The turn loop runs as one tokio task and is the only writer of the board.
//! Engine search runs on a blocking worker with a cloned board. Each clock
//! is its own task. Front-ends read the board through snapshots and feed
//! moves through a [`systems::MoveSelector`].

pub mod ai;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;

pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use resources::{GameOutcome, SharedBoard, TurnPhase};
pub use systems::{GameRunner, GameSession, MoveSelector, MoveSource};
