//! Game state and the turn state machine.
//!
//! `GameState` owns the pile, the board, and every hand, and is the only
//! thing that moves tiles between them. Each tile lives in exactly one of
//! those containers at any time; the transitions here keep it that way,
//! and a proposed move that would suggest otherwise is reported as an
//! `InvariantViolation` rather than an ordinary illegal move.
//!
//! ## Turn structure
//!
//! The player to go (`to_go`) makes one of three moves:
//!
//! - **play**: place a tile from hand on one end; the turn advances and
//!   the pass count resets
//! - **draw**: take a random tile from the pile; the same player moves again
//! - **pass**: only with nothing to play and nothing to draw; the turn
//!   advances and the pass count grows
//!
//! The game ends once every player has passed in a row or a hand is empty.

use std::sync::Arc;

use im::Vector;
use smallvec::SmallVec;
use tracing::debug;

use crate::board::Board;
use crate::core::{
    DominoError, GameRng, MoveChoice, MoveKind, MoveRecord, Orientation, Player, PlayerId, PlayerMap,
    Result, TileId, TileSet, TileTable, MAX_PLAYERS, MIN_PLAYERS,
};

use super::outcome::GameResult;
use super::status::{GameStatus, HandStatus};

/// Legal placements for one player; most hands have only a few.
pub type LegalMoves = SmallVec<[(TileId, Orientation); 8]>;

/// Pile, board, hands, and whose turn it is.
#[derive(Clone, Debug)]
pub struct GameState {
    table: Arc<TileTable>,
    pile: TileSet,
    board: Board,
    players: PlayerMap<Player>,
    to_go: PlayerId,
    pass_count: usize,
    history: Vector<MoveRecord>,
}

impl GameState {
    /// Every tile in the pile, every hand empty, player 0 to go.
    ///
    /// Fails with `InvalidConfig` unless `player_count` is 2-8.
    pub fn new(table: Arc<TileTable>, player_count: usize) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(DominoError::InvalidConfig(format!(
                "a game needs {}-{} players, got {}",
                MIN_PLAYERS, MAX_PLAYERS, player_count
            )));
        }

        let players = PlayerMap::new(player_count, |id| {
            Player::new(id, TileSet::new(Arc::clone(&table)))
        });

        Ok(Self {
            pile: TileSet::full(Arc::clone(&table)),
            board: Board::new(Arc::clone(&table)),
            players,
            to_go: PlayerId::new(0),
            pass_count: 0,
            history: Vector::new(),
            table,
        })
    }

    /// Build a position directly.
    ///
    /// `board_plays` is replayed onto the board in order (the first entry
    /// opens, so its orientation is ignored), `hands` are dealt seat by
    /// seat, and every other tile stays in the pile. Player 0 is to go.
    pub fn from_layout(
        table: Arc<TileTable>,
        board_plays: &[(TileId, Option<Orientation>)],
        hands: Vec<Vec<TileId>>,
    ) -> Result<Self> {
        let mut state = Self::new(table, hands.len())?;

        for &(tile, orientation) in board_plays {
            state.pile.remove(tile)?;
            state.board.add_tile(Some(tile), orientation)?;
        }

        for (player, tiles) in PlayerId::all(hands.len()).zip(&hands) {
            for &tile in tiles {
                state.pile.remove(tile)?;
                state.players[player].hand.add(tile)?;
            }
        }

        Ok(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn table(&self) -> &Arc<TileTable> {
        &self.table
    }

    #[must_use]
    pub fn pile(&self) -> &TileSet {
        &self.pile
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn to_go(&self) -> PlayerId {
        self.to_go
    }

    /// Consecutive turns that ended without a tile being placed.
    #[must_use]
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Every applied move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Point the turn cursor at `player` without advancing the turn.
    pub(crate) fn set_to_go(&mut self, player: PlayerId) {
        self.to_go = player;
    }

    // === Legality ===

    #[must_use]
    pub fn can_draw(&self) -> bool {
        !self.pile.is_empty()
    }

    /// Check that `player` may place `tile` on the `orientation` end.
    ///
    /// `IllegalMove` for an ordinary rules failure. `InvariantViolation`
    /// when the tile is found somewhere other than the player's hand: in
    /// the pile, on the board, or in another hand.
    pub fn check_tile_move_for(
        &self,
        player: PlayerId,
        tile: Option<TileId>,
        orientation: Option<Orientation>,
    ) -> Result<()> {
        let tile = tile.ok_or_else(|| DominoError::IllegalMove("no tile was named".into()))?;
        let domino = self.table.domino(tile)?;

        if self.pile.contains(tile) {
            return Err(invariant(tile, "offered for play while still in the pile"));
        }
        if self.board.tiles().contains(tile) {
            return Err(invariant(tile, "offered for play but already on the board"));
        }
        if let Some((holder, _)) = self
            .players
            .iter()
            .find(|(id, p)| *id != player && p.hand.contains(tile))
        {
            return Err(invariant(tile, &format!("offered by {} but held by {}", player, holder)));
        }
        if !self.players[player].hand.contains(tile) {
            return Err(invariant(tile, "not in the pile, on the board, or in any hand"));
        }

        if self.board.is_empty() {
            return Ok(());
        }
        let orientation = orientation.ok_or_else(|| {
            DominoError::IllegalMove(format!("{} {} needs an end to attach to", tile, domino))
        })?;
        if !self.board.is_valid(tile, orientation) {
            return Err(DominoError::IllegalMove(format!(
                "{} {} does not match the {} end",
                tile, domino, orientation
            )));
        }
        Ok(())
    }

    /// `check_tile_move_for` for the player to go.
    pub fn check_tile_move(&self, tile: Option<TileId>, orientation: Option<Orientation>) -> Result<()> {
        self.check_tile_move_for(self.to_go, tile, orientation)
    }

    /// Can the player to go place `tile` on the `orientation` end?
    #[must_use]
    pub fn is_legal_tile_move(&self, tile: TileId, orientation: Orientation) -> bool {
        self.check_tile_move(Some(tile), Some(orientation)).is_ok()
    }

    /// Every legal `(tile, end)` placement from `player`'s hand.
    #[must_use]
    pub fn legal_moves_for(&self, player: PlayerId) -> LegalMoves {
        let mut moves = LegalMoves::new();
        for tile in self.players[player].hand.members() {
            for orientation in Orientation::BOTH {
                if self
                    .check_tile_move_for(player, Some(tile), Some(orientation))
                    .is_ok()
                {
                    moves.push((tile, orientation));
                }
            }
        }
        moves
    }

    /// Legal placements for the player to go.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        self.legal_moves_for(self.to_go)
    }

    /// True if `player` has a placement or the pile can supply a draw.
    #[must_use]
    pub fn can_go(&self, player: PlayerId) -> bool {
        self.can_draw() || !self.legal_moves_for(player).is_empty()
    }

    // === Transitions ===

    /// Validate `choice` for the player to go and apply it.
    ///
    /// Nothing changes when the move is refused.
    pub fn apply(&mut self, choice: MoveChoice, rng: &mut GameRng) -> Result<MoveRecord> {
        let player = self.to_go;

        let (tile, orientation) = match choice.kind {
            MoveKind::PlayTile => {
                let tile = choice
                    .tile
                    .ok_or_else(|| DominoError::IllegalMove(format!("{} played without naming a tile", player)))?;
                self.check_tile_move(Some(tile), choice.orientation)?;
                self.place(tile, choice.orientation)?;
                (Some(tile), choice.orientation)
            }
            MoveKind::DrawTile => {
                if !self.can_draw() {
                    return Err(DominoError::IllegalMove(format!(
                        "{} cannot draw from an empty pile",
                        player
                    )));
                }
                (Some(self.draw_tile(rng)?), None)
            }
            MoveKind::PassMove => {
                if self.can_go(player) {
                    return Err(DominoError::IllegalMove(format!(
                        "{} passed with a move available",
                        player
                    )));
                }
                debug!(%player, passes = self.pass_count + 1, "pass");
                self.next_turn(false);
                (None, None)
            }
        };

        Ok(self.record(player, choice.kind, tile, orientation))
    }

    /// Draw a uniformly random pile tile into the hand of the player to go.
    pub fn draw_tile(&mut self, rng: &mut GameRng) -> Result<TileId> {
        let members = self.pile.members();
        let tile = *rng
            .choose(&members)
            .ok_or_else(|| DominoError::IllegalMove("the pile is empty".into()))?;

        self.pile.remove(tile)?;
        self.players[self.to_go].hand.add(tile)?;
        debug!(player = %self.to_go, %tile, pile = self.pile.count(), "drew tile");
        Ok(tile)
    }

    /// Place the opening tile for `player` on an empty board.
    pub fn open_with(&mut self, player: PlayerId, tile: TileId) -> Result<()> {
        if !self.board.is_empty() {
            return Err(DominoError::IllegalMove(format!(
                "{} cannot open: the board already has tiles",
                tile
            )));
        }
        if !self.players[player].hand.contains(tile) {
            return Err(DominoError::UnexpectedDomino { id: tile, present: false });
        }

        self.to_go = player;
        self.place(tile, None)?;
        self.record(player, MoveKind::PlayTile, Some(tile), None);
        Ok(())
    }

    /// Board first, then hand, then advance. Legality is checked by callers.
    fn place(&mut self, tile: TileId, orientation: Option<Orientation>) -> Result<()> {
        let player = self.to_go;
        self.board.add_tile(Some(tile), orientation)?;
        self.players[player].hand.remove(tile)?;
        debug!(%player, %tile, board = %self.board, "placed tile");
        self.next_turn(true);
        Ok(())
    }

    /// Hand the turn to the next seat.
    fn next_turn(&mut self, added_tile: bool) {
        self.to_go = self.to_go.next(self.player_count());
        if added_tile {
            self.pass_count = 0;
        } else {
            self.pass_count += 1;
        }
    }

    fn record(
        &mut self,
        player: PlayerId,
        kind: MoveKind,
        tile: Option<TileId>,
        orientation: Option<Orientation>,
    ) -> MoveRecord {
        let record = MoveRecord {
            sequence: self.history.len() as u32,
            player,
            kind,
            tile,
            orientation,
        };
        self.history.push_back(record.clone());
        record
    }

    // === Termination and reporting ===

    /// False once every player has passed in a row or any hand is empty.
    #[must_use]
    pub fn game_continues(&self) -> bool {
        if self.pass_count >= self.player_count() {
            return false;
        }
        self.players.values().all(|p| !p.hand.is_empty())
    }

    #[must_use]
    pub fn hand_counts(&self) -> PlayerMap<usize> {
        self.players.map(|p| p.hand.count())
    }

    #[must_use]
    pub fn hand_scores(&self) -> PlayerMap<u32> {
        self.players.map(|p| p.hand.score())
    }

    /// How the game ended, or `None` while it continues.
    ///
    /// An empty hand wins outright. A blocked game goes to the lowest hand
    /// score; a tie for lowest is a draw. Nothing has been decided before
    /// the opening tile is down.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if self.board.is_empty() {
            return None;
        }
        if let Some((winner, _)) = self.players.iter().find(|(_, p)| p.hand.is_empty()) {
            return Some(GameResult::Domino(winner));
        }
        if self.game_continues() {
            return None;
        }

        let scores = self.hand_scores();
        let lowest = scores.values().copied().min()?;
        let leaders: Vec<_> = scores
            .iter()
            .filter(|(_, &score)| score == lowest)
            .map(|(id, _)| id)
            .collect();

        Some(match leaders.as_slice() {
            [winner] => GameResult::Blocked(*winner),
            _ => GameResult::Draw(leaders),
        })
    }

    /// Snapshot of the board, pile, and hands for reporting.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        GameStatus {
            to_go: self.to_go,
            pass_count: self.pass_count,
            ends: self.board.ends(),
            chain: self.board.chain().iter().copied().collect(),
            pile: self.pile.members(),
            hands: self
                .players
                .iter()
                .map(|(id, p)| HandStatus {
                    player: id,
                    tiles: p.hand.tiles(),
                    count: p.hand.count(),
                    score: p.hand.score(),
                })
                .collect(),
        }
    }
}

fn invariant(tile: TileId, detail: &str) -> DominoError {
    DominoError::InvariantViolation { id: tile, detail: detail.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Arc<TileTable> {
        Arc::new(TileTable::standard())
    }

    fn ids(table: &TileTable, pips: &[(u8, u8)]) -> Vec<TileId> {
        pips.iter().map(|&(a, b)| table.id_of(a, b).unwrap()).collect()
    }

    /// Double-two set: (2,2) open, P0 holds no 2s, P1 holds the rest, pile empty.
    fn small_position() -> GameState {
        let table = Arc::new(TileTable::new(2).unwrap());
        let opening = table.id_of(2, 2).unwrap();
        let hands = vec![
            ids(&table, &[(0, 0), (1, 0), (1, 1)]),
            ids(&table, &[(2, 0), (2, 1)]),
        ];
        GameState::from_layout(table, &[(opening, None)], hands).unwrap()
    }

    #[test]
    fn test_new_state_has_full_pile() {
        let state = GameState::new(standard(), 3).unwrap();

        assert_eq!(state.pile().count(), 28);
        assert_eq!(state.player_count(), 3);
        assert!(state.board().is_empty());
        assert_eq!(state.to_go(), PlayerId::new(0));
        assert!(state.players().values().all(|p| p.hand.is_empty()));
    }

    #[test]
    fn test_new_state_rejects_bad_player_counts() {
        for count in [0, 1, 9, 300] {
            let err = GameState::new(standard(), count).unwrap_err();
            assert!(matches!(err, DominoError::InvalidConfig(_)), "{} players", count);
        }
        assert!(GameState::new(standard(), 8).is_ok());

        let one_hand = GameState::from_layout(standard(), &[], vec![vec![TileId(0)]]);
        assert!(matches!(one_hand, Err(DominoError::InvalidConfig(_))));
    }

    #[test]
    fn test_undealt_state_has_no_outcome() {
        let state = GameState::new(standard(), 2).unwrap();

        assert!(state.players().values().all(|p| p.hand.is_empty()));
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_from_layout_partitions_tiles() {
        let state = small_position();

        assert_eq!(state.board().tiles().count(), 1);
        assert_eq!(state.hand_counts().values().copied().collect::<Vec<_>>(), vec![3, 2]);
        assert!(state.pile().is_empty());
    }

    #[test]
    fn test_from_layout_rejects_duplicates() {
        let table = standard();
        let tile = table.id_of(4, 4).unwrap();

        let err = GameState::from_layout(table, &[(tile, None)], vec![vec![tile], vec![]]).unwrap_err();
        assert_eq!(err, DominoError::UnexpectedDomino { id: tile, present: false });
    }

    #[test]
    fn test_pass_then_play_resets_pass_count() {
        let mut state = small_position();
        let mut rng = GameRng::new(0);
        let table = Arc::clone(state.table());

        state.apply(MoveChoice::pass(), &mut rng).unwrap();
        assert_eq!(state.pass_count(), 1);
        assert_eq!(state.to_go(), PlayerId::new(1));

        let tile = table.id_of(2, 0).unwrap();
        state.apply(MoveChoice::play(tile, Orientation::Left), &mut rng).unwrap();
        assert_eq!(state.pass_count(), 0);
        assert_eq!(state.to_go(), PlayerId::new(0));
        assert_eq!(state.board().ends(), Some((0, 2)));

        // P0 can now follow on the 0 end.
        assert!(state.is_legal_tile_move(table.id_of(0, 0).unwrap(), Orientation::Left));
        assert!(!state.is_legal_tile_move(table.id_of(1, 1).unwrap(), Orientation::Left));
    }

    #[test]
    fn test_refused_move_changes_nothing() {
        let mut state = small_position();
        let mut rng = GameRng::new(0);
        let table = Arc::clone(state.table());

        state.apply(MoveChoice::pass(), &mut rng).unwrap();
        state
            .apply(MoveChoice::play(table.id_of(2, 0).unwrap(), Orientation::Left), &mut rng)
            .unwrap();

        let before = state.status();
        let err = state
            .apply(MoveChoice::play(table.id_of(1, 1).unwrap(), Orientation::Right), &mut rng)
            .unwrap_err();

        assert!(matches!(err, DominoError::IllegalMove(_)));
        assert_eq!(state.status(), before);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_tile_in_other_containers_is_invariant_violation() {
        let state = small_position();
        let table = Arc::clone(state.table());

        let opponents = state.check_tile_move(table.id_of(2, 1), Some(Orientation::Left));
        assert!(matches!(opponents, Err(DominoError::InvariantViolation { .. })));

        let on_board = state.check_tile_move(table.id_of(2, 2), Some(Orientation::Left));
        assert!(matches!(on_board, Err(DominoError::InvariantViolation { .. })));

        let pile_state = GameState::from_layout(standard(), &[(TileId(27), None)], vec![vec![], vec![]]).unwrap();
        let in_pile = pile_state.check_tile_move(Some(TileId(26)), Some(Orientation::Left));
        assert!(in_pile.unwrap_err().is_invariant_break());
    }

    #[test]
    fn test_missing_tile_or_end_is_illegal() {
        let state = small_position();
        let table = Arc::clone(state.table());

        assert!(matches!(
            state.check_tile_move(None, Some(Orientation::Left)),
            Err(DominoError::IllegalMove(_))
        ));
        assert!(matches!(
            state.check_tile_move(table.id_of(0, 0), None),
            Err(DominoError::IllegalMove(_))
        ));
        assert!(matches!(
            state.check_tile_move(Some(TileId(50)), Some(Orientation::Left)),
            Err(DominoError::InvalidDomino { .. })
        ));
    }

    #[test]
    fn test_draw_keeps_the_turn() {
        let table = standard();
        let hands = vec![ids(&table, &[(0, 0)]), ids(&table, &[(1, 1)])];
        let mut state = GameState::from_layout(Arc::clone(&table), &[(TileId(27), None)], hands).unwrap();
        let mut rng = GameRng::new(1);

        let record = state.apply(MoveChoice::draw(), &mut rng).unwrap();

        assert_eq!(record.kind, MoveKind::DrawTile);
        let drawn = record.tile.unwrap();
        assert!(state.player(PlayerId::new(0)).hand.contains(drawn));
        assert!(!state.pile().contains(drawn));
        assert_eq!(state.pile().count(), 24);
        assert_eq!(state.to_go(), PlayerId::new(0));
        assert_eq!(state.pass_count(), 0);
    }

    #[test]
    fn test_draw_from_empty_pile_is_illegal() {
        let mut state = small_position();
        let err = state.apply(MoveChoice::draw(), &mut GameRng::new(0)).unwrap_err();
        assert!(matches!(err, DominoError::IllegalMove(_)));
    }

    #[test]
    fn test_pass_with_moves_is_illegal() {
        let table = standard();
        let hands = vec![ids(&table, &[(0, 0)]), ids(&table, &[(1, 1)])];
        let mut state = GameState::from_layout(table, &[(TileId(27), None)], hands).unwrap();

        // Nothing matches 6, but the pile can still supply a draw.
        assert!(state.legal_moves().is_empty());
        assert!(state.can_go(PlayerId::new(0)));
        let err = state.apply(MoveChoice::pass(), &mut GameRng::new(0)).unwrap_err();
        assert!(matches!(err, DominoError::IllegalMove(_)));
    }

    #[test]
    fn test_empty_hand_ends_game() {
        let table = standard();
        let hands = vec![ids(&table, &[(6, 5)]), ids(&table, &[(1, 1), (2, 2)])];
        let mut state = GameState::from_layout(Arc::clone(&table), &[(TileId(27), None)], hands).unwrap();

        assert!(state.game_continues());
        state
            .apply(MoveChoice::play(table.id_of(6, 5).unwrap(), Orientation::Right), &mut GameRng::new(0))
            .unwrap();

        assert!(!state.game_continues());
        assert_eq!(state.outcome(), Some(GameResult::Domino(PlayerId::new(0))));
    }

    #[test]
    fn test_empty_board_allows_either_end() {
        let table = standard();
        let state = GameState::from_layout(table, &[], vec![vec![TileId(3)], vec![TileId(4)]]).unwrap();

        let moves = state.legal_moves();
        assert_eq!(moves.as_slice(), &[(TileId(3), Orientation::Left), (TileId(3), Orientation::Right)]);
    }

    #[test]
    fn test_status_snapshot() {
        let state = small_position();
        let status = state.status();

        assert_eq!(status.ends, Some((2, 2)));
        assert_eq!(status.hands.len(), 2);
        assert_eq!(status.hands[1].score, 5);

        let text = status.to_string();
        assert!(text.contains("board: [2|2]"));
        assert!(text.contains("P1: [2|0][2|1] (2 tiles, 5 pips)"));
    }

    #[test]
    fn test_history_records_every_move() {
        let mut state = small_position();
        let mut rng = GameRng::new(0);

        state.apply(MoveChoice::pass(), &mut rng).unwrap();
        let play = MoveChoice::play(state.table().id_of(2, 1).unwrap(), Orientation::Right);
        state.apply(play, &mut rng).unwrap();

        let kinds: Vec<_> = state.history().iter().map(|r| (r.sequence, r.kind)).collect();
        assert_eq!(kinds, vec![(0, MoveKind::PassMove), (1, MoveKind::PlayTile)]);
    }
}
