//! Point-in-time snapshot of a game for logs and front ends.

use serde::{Deserialize, Serialize};

use crate::board::Placement;
use crate::core::{Domino, PlayerId, TileId};

/// One hand as reported in a `GameStatus`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandStatus {
    pub player: PlayerId,
    pub tiles: Vec<Domino>,
    pub count: usize,
    pub score: u32,
}

/// Board, pile, and hands at one moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub to_go: PlayerId,
    pub pass_count: usize,
    /// `(left, right)` open ends; `None` before the opening tile.
    pub ends: Option<(u8, u8)>,
    pub chain: Vec<Placement>,
    pub pile: Vec<TileId>,
    pub hands: Vec<HandStatus>,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "status with {} to go (passes: {})", self.to_go, self.pass_count)?;

        write!(f, "    board: ")?;
        if self.chain.is_empty() {
            writeln!(f, "(empty)")?;
        } else {
            for p in &self.chain {
                write!(f, "[{}|{}]", p.left, p.right)?;
            }
            writeln!(f)?;
        }
        if let Some((left, right)) = self.ends {
            writeln!(f, "    ends: {}/{}", left, right)?;
        }
        writeln!(f, "    pile: {} tiles", self.pile.len())?;

        for hand in &self.hands {
            write!(f, "    {}: ", hand.player)?;
            for tile in &hand.tiles {
                write!(f, "{}", tile)?;
            }
            writeln!(f, " ({} tiles, {} pips)", hand.count, hand.score)?;
        }
        Ok(())
    }
}
