//! AI difficulty and identity
//!
//! Difficulty is the search depth handed to the engine. Each extra ply
//! multiplies the work, so depth 8 can take noticeably longer than depth 4
//! in open middlegames.
//!
//! | Depth | Rating shown |
//! |-------|--------------|
//! | 1     | 300          |
//! | 4     | 1200         |
//! | 8     | 2400         |

use checkers_engine::constants::{MAX_DEPTH, MIN_DEPTH};
use std::fmt;

use crate::networking::Profile;

/// Name the computer opponent plays under
pub const AI_USERNAME: &str = "Pepe the Frog";

/// Rating points per ply of search depth
const RATING_PER_PLY: i32 = 300;

/// Search depth used by the computer opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiDifficulty(u8);

impl AiDifficulty {
    pub const MIN: AiDifficulty = AiDifficulty(MIN_DEPTH);
    pub const MAX: AiDifficulty = AiDifficulty(MAX_DEPTH);

    /// Depth clamped into the supported range
    pub fn new(depth: u8) -> Self {
        Self(depth.clamp(MIN_DEPTH, MAX_DEPTH))
    }

    pub fn depth(self) -> u8 {
        self.0
    }

    /// Rating displayed for this strength
    pub fn rating(self) -> i32 {
        RATING_PER_PLY * i32::from(self.0)
    }
}

impl Default for AiDifficulty {
    fn default() -> Self {
        Self(4)
    }
}

impl fmt::Display for AiDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth {}", self.0)
    }
}

/// Computer opponent configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPlayer {
    pub difficulty: AiDifficulty,
    pub profile: Profile,
}

impl AiPlayer {
    pub fn new(difficulty: AiDifficulty) -> Self {
        Self {
            difficulty,
            profile: Profile::new(AI_USERNAME, difficulty.rating()),
        }
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new(AiDifficulty::default())
    }
}
