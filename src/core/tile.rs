//! Tile identity and the domino lookup table.
//!
//! A domino is identified by a `TileId` in `0..NUM_DOMINOS`. The
//! `TileTable` maps every id to its pip pair and is built once per
//! configuration, then shared read-only (usually behind an `Arc`).
//!
//! ## Id Layout
//!
//! Ids enumerate `high` in `0..=N` and, for each, `low` in `0..=high`:
//!
//! ```
//! use rust_dominoes::core::{Domino, TileId, TileTable};
//!
//! let table = TileTable::standard();
//! assert_eq!(table.len(), 28);
//! assert_eq!(table.get(TileId(0)), Some(Domino::new(0, 0)));
//! assert_eq!(table.get(TileId(1)), Some(Domino::new(1, 0)));
//! assert_eq!(table.get(TileId(2)), Some(Domino::new(1, 1)));
//! ```
//!
//! This ordering fixes which ids are doubles and how they rank: a higher
//! id double is a higher double.

use serde::{Deserialize, Serialize};

use super::error::{DominoError, Result};

/// Highest pip value of a standard set.
pub const DEFAULT_MAX_PIP: u8 = 6;

/// Largest supported pip value (a double-twelve set, 91 tiles).
pub const MAX_SUPPORTED_PIP: u8 = 12;

/// Number of dominoes in a double-`max_pip` set: `(N+1)(N+2)/2`.
#[must_use]
pub const fn num_dominos(max_pip: u8) -> usize {
    let n = max_pip as usize;
    (n + 1) * (n + 2) / 2
}

/// Identifier of a single domino.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Raw index into the lookup table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered pip pair with `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domino {
    pub high: u8,
    pub low: u8,
}

impl Domino {
    /// Create a domino, normalizing the pip order.
    #[must_use]
    pub const fn new(a: u8, b: u8) -> Self {
        if a >= b {
            Self { high: a, low: b }
        } else {
            Self { high: b, low: a }
        }
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        self.high == self.low
    }

    /// Domino score: both pips added.
    #[must_use]
    pub const fn pip_sum(self) -> u32 {
        self.high as u32 + self.low as u32
    }

    /// Does either half show `value`?
    #[must_use]
    pub const fn has(self, value: u8) -> bool {
        self.high == value || self.low == value
    }

    /// The pip on the opposite half from `value`, if `value` is present.
    #[must_use]
    pub const fn other(self, value: u8) -> Option<u8> {
        if self.high == value {
            Some(self.low)
        } else if self.low == value {
            Some(self.high)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Domino {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.high, self.low)
    }
}

/// Immutable id -> pip pair lookup for one domino set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTable {
    max_pip: u8,
    dominoes: Vec<Domino>,
    doubles: Vec<TileId>,
}

impl TileTable {
    /// Build the table for a double-`max_pip` set.
    pub fn new(max_pip: u8) -> Result<Self> {
        if max_pip > MAX_SUPPORTED_PIP {
            return Err(DominoError::InvalidConfig(format!(
                "max pip {} exceeds the supported maximum of {}",
                max_pip, MAX_SUPPORTED_PIP
            )));
        }

        Ok(Self::build(max_pip))
    }

    /// The double-six set.
    #[must_use]
    pub fn standard() -> Self {
        Self::build(DEFAULT_MAX_PIP)
    }

    fn build(max_pip: u8) -> Self {
        let mut dominoes = Vec::with_capacity(num_dominos(max_pip));
        let mut doubles = Vec::with_capacity(max_pip as usize + 1);

        for high in 0..=max_pip {
            for low in 0..=high {
                if high == low {
                    doubles.push(TileId(dominoes.len() as u16));
                }
                dominoes.push(Domino { high, low });
            }
        }

        Self { max_pip, dominoes, doubles }
    }

    #[must_use]
    pub fn max_pip(&self) -> u8 {
        self.max_pip
    }

    /// Number of dominoes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dominoes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dominoes.is_empty()
    }

    #[must_use]
    pub fn is_valid(&self, id: TileId) -> bool {
        id.index() < self.dominoes.len()
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<Domino> {
        self.dominoes.get(id.index()).copied()
    }

    /// Like `get`, but an unknown id is an `InvalidDomino` error.
    pub fn domino(&self, id: TileId) -> Result<Domino> {
        self.get(id).ok_or(DominoError::InvalidDomino { id, max_pip: self.max_pip })
    }

    /// Id of the domino showing `a` and `b`, in either order.
    #[must_use]
    pub fn id_of(&self, a: u8, b: u8) -> Option<TileId> {
        let Domino { high, low } = Domino::new(a, b);
        if high > self.max_pip {
            return None;
        }
        let start = high as u16 * (high as u16 + 1) / 2;
        Some(TileId(start + low as u16))
    }

    /// Double ids, lowest rank first.
    #[must_use]
    pub fn doubles(&self) -> &[TileId] {
        &self.doubles
    }

    /// All ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.dominoes.len() as u16).map(TileId)
    }
}
