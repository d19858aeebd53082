//! Error kinds for the rule engine.
//!
//! All errors are fatal to the call that raised them; the engine never
//! retries internally. `IllegalMove` is the one a move-selection strategy
//! is expected to see; the rest signal bad input or broken bookkeeping.

use thiserror::Error;

use super::tile::TileId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DominoError>;

/// Everything the engine can refuse to do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DominoError {
    /// The id is outside the configured tile table.
    #[error("{id} is not a domino for a double-{max_pip} set")]
    InvalidDomino { id: TileId, max_pip: u8 },

    /// A tile set membership precondition failed.
    #[error("{id} is {} the set", membership(.present))]
    UnexpectedDomino { id: TileId, present: bool },

    /// The proposed move breaks the rules.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A tile was found in two containers at once.
    #[error("invariant violated for {id}: {detail}")]
    InvariantViolation { id: TileId, detail: String },

    /// The game configuration cannot produce a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn membership(present: &bool) -> &'static str {
    if *present {
        "already in"
    } else {
        "not in"
    }
}

impl DominoError {
    /// True for the error kinds that mean bookkeeping is corrupt.
    #[must_use]
    pub fn is_invariant_break(&self) -> bool {
        matches!(
            self,
            DominoError::UnexpectedDomino { .. } | DominoError::InvariantViolation { .. }
        )
    }
}
