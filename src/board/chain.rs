//! Chain linking: validating and applying placements against the open ends.
//!
//! The chain is a single connected line of tiles. The first tile placed
//! sets both ends; after that a tile attaches to one end only if one of
//! its pips matches that end, and the end becomes the tile's other pip.
//!
//! ```
//! use std::sync::Arc;
//! use rust_dominoes::board::Board;
//! use rust_dominoes::core::{Orientation, TileTable};
//!
//! let table = Arc::new(TileTable::standard());
//! let mut board = Board::new(Arc::clone(&table));
//!
//! board.add_tile(table.id_of(3, 3), None).unwrap();
//! board.add_tile(table.id_of(3, 5), Some(Orientation::Left)).unwrap();
//! assert_eq!(board.ends(), Some((5, 3)));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Domino, DominoError, Orientation, Result, TileId, TileSet, TileTable};

/// One tile as laid in the chain, read left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tile: TileId,
    /// Pip facing the left end of the chain.
    pub left: u8,
    /// Pip facing the right end of the chain.
    pub right: u8,
}

/// Open ends plus every tile already placed.
///
/// Invariant: when set, `left` equals `chain.front().left` and `right`
/// equals `chain.back().right`.
#[derive(Clone, Debug)]
pub struct Board {
    left: Option<u8>,
    right: Option<u8>,
    chain: VecDeque<Placement>,
    tiles: TileSet,
}

impl Board {
    /// An empty board over `table`.
    #[must_use]
    pub fn new(table: Arc<TileTable>) -> Self {
        Self {
            left: None,
            right: None,
            chain: VecDeque::new(),
            tiles: TileSet::new(table),
        }
    }

    /// True until the opening tile is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
    }

    #[must_use]
    pub fn left(&self) -> Option<u8> {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> Option<u8> {
        self.right
    }

    /// `(left, right)` once the board has a tile.
    #[must_use]
    pub fn ends(&self) -> Option<(u8, u8)> {
        self.left.zip(self.right)
    }

    /// The chain, leftmost tile first.
    #[must_use]
    pub fn chain(&self) -> &VecDeque<Placement> {
        &self.chain
    }

    /// Tiles already placed.
    #[must_use]
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    fn end(&self, orientation: Orientation) -> Option<u8> {
        match orientation {
            Orientation::Left => self.left,
            Orientation::Right => self.right,
        }
    }

    /// Can `id` attach to the `orientation` end? Any tile fits an empty board.
    ///
    /// Has no side effects.
    #[must_use]
    pub fn is_valid(&self, id: TileId, orientation: Orientation) -> bool {
        let Some(end) = self.end(orientation) else {
            return true;
        };
        self.tiles
            .table()
            .get(id)
            .is_some_and(|domino| domino.has(end))
    }

    /// Place `id` on the `orientation` end.
    ///
    /// `None` for the tile is a no-op. The opening tile sets both ends from
    /// its stored pips and ignores `orientation`; every later tile needs
    /// one.
    pub fn add_tile(&mut self, id: Option<TileId>, orientation: Option<Orientation>) -> Result<()> {
        let Some(id) = id else {
            return Ok(());
        };
        let domino = self.tiles.table().domino(id)?;

        let Some((left, right)) = self.ends() else {
            self.tiles.add(id)?;
            self.left = Some(domino.high);
            self.right = Some(domino.low);
            self.chain.push_back(Placement {
                tile: id,
                left: domino.high,
                right: domino.low,
            });
            return Ok(());
        };

        let orientation = orientation.ok_or_else(|| {
            DominoError::IllegalMove(format!("{} {} needs an end to attach to", id, domino))
        })?;

        match orientation {
            Orientation::Left => {
                let outer = attach(id, domino, left, orientation)?;
                self.tiles.add(id)?;
                self.left = Some(outer);
                self.chain.push_front(Placement { tile: id, left: outer, right: left });
            }
            Orientation::Right => {
                let outer = attach(id, domino, right, orientation)?;
                self.tiles.add(id)?;
                self.right = Some(outer);
                self.chain.push_back(Placement { tile: id, left: right, right: outer });
            }
        }

        Ok(())
    }
}

/// The pip left exposed when `domino` is matched against `end`.
fn attach(id: TileId, domino: Domino, end: u8, orientation: Orientation) -> Result<u8> {
    domino.other(end).ok_or_else(|| {
        DominoError::IllegalMove(format!(
            "{} {} cannot be added to the {} end showing {}",
            id, domino, orientation, end
        ))
    })
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.chain.is_empty() {
            return write!(f, "(empty)");
        }
        for placement in &self.chain {
            write!(f, "[{}|{}]", placement.left, placement.right)?;
        }
        Ok(())
    }
}
