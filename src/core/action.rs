//! Moves: what a strategy proposes and what the game records.
//!
//! A `MoveChoice` is the raw output of a move-selection strategy: a kind
//! plus an optional tile and end. Nothing about it is trusted; the game
//! state re-validates every choice before applying it.
//!
//! ```
//! use rust_dominoes::core::{MoveChoice, MoveKind, Orientation, TileId};
//!
//! let play = MoveChoice::play(TileId(9), Orientation::Left);
//! assert_eq!(play.kind, MoveKind::PlayTile);
//!
//! let draw = MoveChoice::draw();
//! assert!(draw.tile.is_none() && draw.orientation.is_none());
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::tile::TileId;

/// Which open end of the chain a placement targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Left, Orientation::Right];
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Left => write!(f, "left"),
            Orientation::Right => write!(f, "right"),
        }
    }
}

/// The three things a player can do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Place a tile on one end of the chain. Ends the turn.
    PlayTile,
    /// Take one tile from the pile. The turn continues.
    DrawTile,
    /// Give up the turn; only legal with nothing to play or draw.
    PassMove,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::PlayTile => write!(f, "play"),
            MoveKind::DrawTile => write!(f, "draw"),
            MoveKind::PassMove => write!(f, "pass"),
        }
    }
}

/// A proposed move, as returned by a move selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveChoice {
    pub kind: MoveKind,
    pub tile: Option<TileId>,
    pub orientation: Option<Orientation>,
}

impl MoveChoice {
    #[must_use]
    pub fn play(tile: TileId, orientation: Orientation) -> Self {
        Self {
            kind: MoveKind::PlayTile,
            tile: Some(tile),
            orientation: Some(orientation),
        }
    }

    #[must_use]
    pub fn draw() -> Self {
        Self {
            kind: MoveKind::DrawTile,
            tile: None,
            orientation: None,
        }
    }

    #[must_use]
    pub fn pass() -> Self {
        Self {
            kind: MoveKind::PassMove,
            tile: None,
            orientation: None,
        }
    }
}

/// An applied move, kept in the game's history.
///
/// For draws `tile` is the tile that came off the pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Position in the game's history; the opening is 0.
    pub sequence: u32,
    pub player: PlayerId,
    pub kind: MoveKind,
    pub tile: Option<TileId>,
    pub orientation: Option<Orientation>,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:3}) {} {}", self.sequence, self.player, self.kind)?;
        if let Some(tile) = self.tile {
            write!(f, " {}", tile)?;
        }
        if let Some(orientation) = self.orientation {
            write!(f, " on the {}", orientation)?;
        }
        Ok(())
    }
}
