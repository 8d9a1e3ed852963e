//! Computer opponent
//!
//! The opponent itself is [`crate::game::systems::AiOpponent`], which runs
//! the engine search on a blocking worker with a cloned board. This module
//! holds its configuration.

pub mod resource;

pub use resource::{AiDifficulty, AiPlayer, AI_USERNAME};
