//! Player settings
//!
//! Everything a game needs to start: clock length, AI strength, which side
//! the local player takes and the name shown to a remote opponent.

use std::time::Duration;

use checkers_engine::constants::{MAX_DEPTH, MIN_DEPTH};
use checkers_engine::Side;
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};

/// Per-player clock lengths in minutes, indexed by `time_limit_index`
///
/// The index, not the duration, travels in the settings handshake, so both
/// peers must share this table.
pub const TIME_LIMITS_MINUTES: [u64; 6] = [1, 2, 3, 5, 10, 30];

/// Clock length for a time-limit index
pub fn time_limit_for_index(index: u8) -> Option<Duration> {
    TIME_LIMITS_MINUTES
        .get(index as usize)
        .map(|minutes| Duration::from_secs(minutes * 60))
}

/// Settings that can be changed by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Index into [`TIME_LIMITS_MINUTES`]
    pub time_limit_index: u8,

    /// AI search depth, 1 to 8
    pub ai_difficulty: u8,

    /// Local player takes the dark pieces (and moves first)
    pub play_as_dark: bool,

    /// Name sent to a remote opponent
    pub username: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            time_limit_index: 3, // 5 minutes
            ai_difficulty: 4,
            play_as_dark: true,
            username: "Player".to_string(),
        }
    }
}

impl GameSettings {
    /// Check every field against its allowed range
    pub fn validate(&self) -> CoreResult<()> {
        if time_limit_for_index(self.time_limit_index).is_none() {
            return Err(CoreError::InvalidSetting {
                name: "time_limit_index",
                message: format!(
                    "{} is not below {}",
                    self.time_limit_index,
                    TIME_LIMITS_MINUTES.len()
                ),
            });
        }
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.ai_difficulty) {
            return Err(CoreError::InvalidSetting {
                name: "ai_difficulty",
                message: format!(
                    "{} is outside {}..={}",
                    self.ai_difficulty, MIN_DEPTH, MAX_DEPTH
                ),
            });
        }
        if self.username.trim().is_empty() {
            return Err(CoreError::InvalidSetting {
                name: "username",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Clock length per player
    ///
    /// Falls back to the shortest limit for an unvalidated index.
    pub fn time_limit(&self) -> Duration {
        time_limit_for_index(self.time_limit_index)
            .unwrap_or(Duration::from_secs(TIME_LIMITS_MINUTES[0] * 60))
    }

    /// Side of the local player
    pub fn local_side(&self) -> Side {
        if self.play_as_dark {
            Side::Dark
        } else {
            Side::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.time_limit(), Duration::from_secs(300));
        assert_eq!(settings.local_side(), Side::Dark);
    }

    #[test]
    fn test_time_limit_table() {
        assert_eq!(time_limit_for_index(0), Some(Duration::from_secs(60)));
        assert_eq!(time_limit_for_index(5), Some(Duration::from_secs(1800)));
        assert_eq!(time_limit_for_index(6), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_time = GameSettings {
            time_limit_index: 9,
            ..Default::default()
        };
        assert!(matches!(
            bad_time.validate(),
            Err(CoreError::InvalidSetting { name: "time_limit_index", .. })
        ));

        let bad_depth = GameSettings {
            ai_difficulty: 0,
            ..Default::default()
        };
        assert!(bad_depth.validate().is_err());

        let bad_name = GameSettings {
            username: "  ".to_string(),
            ..Default::default()
        };
        assert!(bad_name.validate().is_err());
    }

    #[test]
    fn test_light_side() {
        let settings = GameSettings {
            play_as_dark: false,
            ..Default::default()
        };
        assert_eq!(settings.local_side(), Side::Light);
    }
}
