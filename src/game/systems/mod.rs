//! Game flow
//!
//! - [`move_source`] - local input, AI and remote move sources
//! - [`game_logic`] - the turn loop ([`GameRunner`])
//! - [`game_init`] - building a runner for each game mode
//!
//! ```text
//! ┌──────────────┐   Move    ┌──────────────┐   apply   ┌─────────────┐
//! │ MoveSource   │ ────────→ │ GameRunner   │ ────────→ │ SharedBoard │
//! │ local/AI/net │           │ clocks+phase │           └─────────────┘
//! └──────────────┘           └──────┬───────┘
//!                                   ↓ GameEvent
//!                              front-end
//! ```

pub mod game_init;
pub mod game_logic;
pub mod move_source;

pub use game_init::{ai_game, host_game, join_game, local_profile, GameSession};
pub use game_logic::GameRunner;
pub use move_source::{AiOpponent, LocalInput, MoveSelector, MoveSource, RemoteOpponent};
