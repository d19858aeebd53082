//! Membership-only collections of dominoes.
//!
//! The pile, the board's placed tiles, and every hand are `TileSet`s over
//! the same shared `TileTable`. A set only guards its own membership;
//! keeping the containers disjoint is the game state's job.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::error::{DominoError, Result};
use super::tile::{Domino, TileId, TileTable};

/// A set of tile ids drawn from one lookup table.
#[derive(Clone, Debug)]
pub struct TileSet {
    table: Arc<TileTable>,
    ids: FxHashSet<TileId>,
}

impl TileSet {
    /// Create an empty set.
    #[must_use]
    pub fn new(table: Arc<TileTable>) -> Self {
        Self {
            table,
            ids: FxHashSet::default(),
        }
    }

    /// Create a set holding every domino in the table (a fresh pile).
    #[must_use]
    pub fn full(table: Arc<TileTable>) -> Self {
        let ids = table.ids().collect();
        Self { table, ids }
    }

    /// Create a set from the given ids.
    ///
    /// Fails on an invalid id or a repeated one.
    pub fn from_ids(table: Arc<TileTable>, ids: impl IntoIterator<Item = TileId>) -> Result<Self> {
        let mut set = Self::new(table);
        for id in ids {
            set.add(id)?;
        }
        Ok(set)
    }

    /// The lookup table this set draws from.
    #[must_use]
    pub fn table(&self) -> &Arc<TileTable> {
        &self.table
    }

    fn check_valid(&self, id: TileId) -> Result<()> {
        if self.table.is_valid(id) {
            Ok(())
        } else {
            Err(DominoError::InvalidDomino { id, max_pip: self.table.max_pip() })
        }
    }

    /// Insert a tile that is not yet a member.
    pub fn add(&mut self, id: TileId) -> Result<()> {
        self.check_valid(id)?;
        if !self.ids.insert(id) {
            return Err(DominoError::UnexpectedDomino { id, present: true });
        }
        Ok(())
    }

    /// Remove a tile that is currently a member.
    pub fn remove(&mut self, id: TileId) -> Result<()> {
        self.check_valid(id)?;
        if !self.ids.remove(&id) {
            return Err(DominoError::UnexpectedDomino { id, present: false });
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Member ids, sorted so callers see a stable order.
    #[must_use]
    pub fn members(&self) -> Vec<TileId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Pip pairs of the members, in `members()` order.
    #[must_use]
    pub fn tiles(&self) -> Vec<Domino> {
        self.members()
            .into_iter()
            .filter_map(|id| self.table.get(id))
            .collect()
    }

    /// Sum of both pips over every member.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.ids
            .iter()
            .filter_map(|&id| self.table.get(id))
            .map(Domino::pip_sum)
            .sum()
    }
}

impl PartialEq for TileSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids && self.table == other.table
    }
}

impl Eq for TileSet {}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Arc<TileTable> {
        Arc::new(TileTable::standard())
    }

    #[test]
    fn test_add_and_remove() {
        let mut set = TileSet::new(table());

        set.add(TileId(4)).unwrap();
        assert!(set.contains(TileId(4)));
        assert_eq!(set.count(), 1);

        set.remove(TileId(4)).unwrap();
        assert!(!set.contains(TileId(4)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_twice_is_unexpected() {
        let mut set = TileSet::new(table());
        set.add(TileId(4)).unwrap();

        assert_eq!(
            set.add(TileId(4)),
            Err(DominoError::UnexpectedDomino { id: TileId(4), present: true })
        );
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_remove_absent_is_unexpected() {
        let mut set = TileSet::new(table());

        assert_eq!(
            set.remove(TileId(4)),
            Err(DominoError::UnexpectedDomino { id: TileId(4), present: false })
        );
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut set = TileSet::new(table());

        assert!(matches!(set.add(TileId(28)), Err(DominoError::InvalidDomino { .. })));
        assert!(matches!(set.remove(TileId(28)), Err(DominoError::InvalidDomino { .. })));
        assert!(matches!(
            TileSet::from_ids(table(), [TileId(1), TileId(100)]),
            Err(DominoError::InvalidDomino { .. })
        ));
    }

    #[test]
    fn test_full_set_and_score() {
        let set = TileSet::full(table());

        assert_eq!(set.count(), 28);
        // Each pip value appears 8 times across a double-six set: 8 * (0+1+...+6).
        assert_eq!(set.score(), 168);
    }

    #[test]
    fn test_members_and_tiles() {
        let set = TileSet::from_ids(table(), [TileId(9), TileId(0), TileId(2)]).unwrap();

        assert_eq!(set.members(), vec![TileId(0), TileId(2), TileId(9)]);
        assert_eq!(
            set.tiles(),
            vec![Domino::new(0, 0), Domino::new(1, 1), Domino::new(3, 3)]
        );
        assert_eq!(set.score(), 8);
    }

    #[test]
    fn test_from_ids_rejects_duplicates() {
        assert_eq!(
            TileSet::from_ids(table(), [TileId(3), TileId(3)]),
            Err(DominoError::UnexpectedDomino { id: TileId(3), present: true })
        );
    }
}
