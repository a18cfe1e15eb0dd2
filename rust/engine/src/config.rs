use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Options a game room is constructed with. Missing fields fall back to
/// the defaults below when deserialized.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    /// Minimum roster size to start (and to keep a game alive)
    pub min_players: usize,
    /// Hand size every player is topped up to at each deal
    pub hand_size: usize,
    /// Point total that ends the game
    pub win_points: u32,
    /// Points awarded for winning a round
    pub round_points: u32,
    /// Seconds players have to play their cards
    pub play_seconds: u64,
    /// Seconds the picker has to choose a winner
    pub pick_seconds: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            min_players: 3,
            hand_size: 7,
            win_points: 40,
            round_points: 7,
            play_seconds: 45,
            pick_seconds: 45,
        }
    }
}

impl GameOptions {
    /// Rejects options a game could never run under. Checked once at
    /// engine construction so nothing surfaces mid-game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, u64, u64); 6] = [
            ("minPlayers", self.min_players as u64, 2),
            ("handSize", self.hand_size as u64, 1),
            ("winPoints", self.win_points as u64, 1),
            ("roundPoints", self.round_points as u64, 1),
            ("playSeconds", self.play_seconds, 1),
            ("pickSeconds", self.pick_seconds, 1),
        ];
        for (field, value, minimum) in checks {
            if value < minimum {
                return Err(ConfigError::OptionTooSmall { field, minimum });
            }
        }
        Ok(())
    }

    /// Half-value score paid out on a timeout failure.
    pub fn consolation_points(&self) -> u32 {
        self.round_points / 2
    }
}
