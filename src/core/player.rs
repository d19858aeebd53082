//! Players, seat identifiers, and per-seat storage.
//!
//! ## PlayerId
//!
//! Seat index, 0-based, fixed for the whole game.
//!
//! ## PlayerMap
//!
//! One entry per seat backed by a `Vec`, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A hand plus the points carried between games.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::tile_set::TileSet;

/// Seat identifier supporting up to 255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    ///
    /// ```
    /// use rust_dominoes::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(2).next(4), PlayerId::new(3));
    /// assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over all seats of a `player_count` game, in table order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-seat data with O(1) access by `PlayerId`.
///
/// ```
/// use rust_dominoes::core::{PlayerId, PlayerMap};
///
/// let mut passes: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// passes[PlayerId::new(2)] += 1;
/// assert_eq!(passes[PlayerId::new(2)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat with `factory`.
    ///
    /// Panics on zero or more than 255 seats.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Wrap existing per-seat values, seat 0 first.
    ///
    /// Panics on zero or more than 255 entries.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Map every entry, keeping seat order.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One seat's hand and cumulative points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    /// Tiles currently held.
    pub hand: TileSet,
    points: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, hand: TileSet) -> Self {
        Self { id, hand, points: 0 }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Points accumulated across decided games.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn add_points(&mut self, points: u32) {
        self.points += points;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} holding {} tiles", self.id, self.hand.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TileId, TileTable};
    use std::sync::Arc;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "P1");
    }

    #[test]
    fn test_player_id_next_cycles() {
        let order: Vec<_> = std::iter::successors(Some(PlayerId::new(0)), |p| Some(p.next(4)))
            .take(5)
            .map(PlayerId::index)
            .collect();

        assert_eq!(order, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_new_and_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(3)], 30);
        map[PlayerId::new(0)] = 7;
        assert_eq!(map[PlayerId::new(0)], 7);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_iter_and_map() {
        let map: PlayerMap<i32> = PlayerMap::from_vec(vec![1, 2, 3]);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[2], (PlayerId::new(2), &3));

        let doubled = map.map(|v| v * 2);
        assert_eq!(doubled.values().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u32> = PlayerMap::new(2, |p| p.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::from_vec(Vec::new());
    }

    #[test]
    fn test_player_points_accumulate() {
        let table = Arc::new(TileTable::standard());
        let hand = TileSet::from_ids(table, [TileId(1), TileId(2)]).unwrap();
        let mut player = Player::new(PlayerId::new(1), hand);

        assert_eq!(player.points(), 0);
        player.add_points(12);
        player.add_points(3);
        assert_eq!(player.points(), 15);
        assert_eq!(player.to_string(), "P1 holding 2 tiles");
    }
}
