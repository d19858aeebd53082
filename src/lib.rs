//! # rust-dominoes
//!
//! A rule engine for block dominoes with 2 to 8 players.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: every API takes the seat count as context.
//!    Nothing assumes two players.
//!
//! 2. **Every tile in one place**: a tile is in the pile, on the board, or
//!    in exactly one hand. Transitions keep it that way and report a
//!    broken partition as `InvariantViolation`.
//!
//! 3. **Deterministic**: all randomness comes from seeded `GameRng`
//!    streams, so a seed replays a game exactly.
//!
//! ## Modules
//!
//! - `core`: tiles, tile sets, players, moves, RNG, configuration, errors
//! - `board`: the chain and its two open ends
//! - `rules`: game state, the turn state machine, outcomes
//! - `strategy`: pluggable move selection
//! - `game`: dealing, the opening play, and the play loop
//!
//! ```
//! use rust_dominoes::{Game, GameConfig, StrategyKind};
//!
//! let config = GameConfig::new(3).with_seed(42);
//! let mut game = Game::with_strategy(config, StrategyKind::First).unwrap();
//! let summary = game.play_game().unwrap();
//! assert!(summary.moves <= 100);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod strategy;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Domino, DominoError, Result, TileId, TileSet, TileTable,
    Player, PlayerId, PlayerMap,
    GameRng, GameRngState, GameConfig,
    MoveChoice, MoveKind, MoveRecord, Orientation,
};

pub use crate::board::{Board, Placement};

pub use crate::rules::{GameResult, GameState, GameStatus, HandStatus, LegalMoves};

pub use crate::strategy::{FirstLegal, MoveSelector, RandomMove, StrategyKind};

pub use crate::game::{Game, GameSummary};
