//! Core types: tiles, tile sets, players, moves, RNG, configuration, errors.
//!
//! Everything here is game-state agnostic; the board and the rules build
//! on these.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod tile;
pub mod tile_set;

pub use action::{MoveChoice, MoveKind, MoveRecord, Orientation};
pub use config::{GameConfig, DEFAULT_MAX_MOVES, MAX_PLAYERS, MIN_PLAYERS, TILES_IN_STARTING_HAND};
pub use error::{DominoError, Result};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use tile::{num_dominos, Domino, TileId, TileTable, DEFAULT_MAX_PIP, MAX_SUPPORTED_PIP};
pub use tile_set::TileSet;
