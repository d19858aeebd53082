//! Game configuration.
//!
//! A `GameConfig` fixes everything about a game before it starts: how
//! many seats, which domino set, how many tiles each hand is dealt, the
//! move cap, and the seed.
//!
//! ```
//! use rust_dominoes::core::GameConfig;
//!
//! let config = GameConfig::new(4).with_seed(7).with_max_moves(200);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.num_dominos(), 28);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{DominoError, Result};
use super::tile::{num_dominos, DEFAULT_MAX_PIP, MAX_SUPPORTED_PIP};

/// Tiles dealt to every hand at the start of a game.
pub const TILES_IN_STARTING_HAND: usize = 7;

/// Safety cap on moves in one game.
pub const DEFAULT_MAX_MOVES: u32 = 100;

/// Smallest and largest supported table.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats.
    pub player_count: usize,

    /// Highest pip value N; the set has `(N+1)(N+2)/2` tiles.
    pub max_pip: u8,

    /// Tiles dealt per hand.
    pub hand_size: usize,

    /// Moves allowed before the play loop gives up.
    pub max_moves: u32,

    /// Seed for pile draws and random strategies.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            max_pip: DEFAULT_MAX_PIP,
            hand_size: TILES_IN_STARTING_HAND,
            max_moves: DEFAULT_MAX_MOVES,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// A standard double-six configuration for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DominoError::InvalidConfig(format!("cannot parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_max_pip(mut self, max_pip: u8) -> Self {
        self.max_pip = max_pip;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Size of the configured domino set.
    #[must_use]
    pub fn num_dominos(&self) -> usize {
        num_dominos(self.max_pip)
    }

    /// Check that the configuration can be dealt and played.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(DominoError::InvalidConfig(format!(
                "player count must be {}-{}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if self.max_pip > MAX_SUPPORTED_PIP {
            return Err(DominoError::InvalidConfig(format!(
                "max pip must be at most {}, got {}",
                MAX_SUPPORTED_PIP, self.max_pip
            )));
        }
        if self.hand_size == 0 {
            return Err(DominoError::InvalidConfig("hand size must be positive".into()));
        }
        let dealt = self.player_count * self.hand_size;
        if dealt > self.num_dominos() {
            return Err(DominoError::InvalidConfig(format!(
                "{} hands of {} need {} tiles, the set has {}",
                self.player_count,
                self.hand_size,
                dealt,
                self.num_dominos()
            )));
        }
        Ok(())
    }
}
