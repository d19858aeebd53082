//! How a finished game ended.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player emptied their hand.
    Domino(PlayerId),
    /// Every player passed; this player held the lowest pip total.
    Blocked(PlayerId),
    /// Blocked, with these players tied for the lowest pip total.
    Draw(Vec<PlayerId>),
}

impl GameResult {
    /// The single winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Domino(p) | GameResult::Blocked(p) => Some(*p),
            GameResult::Draw(_) => None,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Domino(p) => write!(f, "{} went out", p),
            GameResult::Blocked(p) => write!(f, "blocked, {} holds the fewest pips", p),
            GameResult::Draw(ps) => {
                let names: Vec<_> = ps.iter().map(ToString::to_string).collect();
                write!(f, "blocked, tied between {}", names.join(", "))
            }
        }
    }
}
