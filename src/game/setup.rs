//! Dealing and the opening play.

use tracing::{debug, info};

use crate::core::{DominoError, PlayerId, Result, TileId};

use super::driver::Game;

impl Game {
    /// Deal `hand_size` tiles to every seat, one at a time round the table.
    ///
    /// Only an undealt game (empty board, empty hands) can be dealt.
    pub fn set_up_hands(&mut self) -> Result<()> {
        let dealt = !self.state.board().is_empty()
            || self.state.players().values().any(|p| !p.hand.is_empty());
        if dealt {
            return Err(DominoError::IllegalMove("the game has already been dealt".into()));
        }

        let player_count = self.state.player_count();
        for _ in 0..self.config().hand_size {
            for player in PlayerId::all(player_count) {
                self.state.set_to_go(player);
                self.state.draw_tile(&mut self.pile_rng)?;
            }
        }
        debug!(pile = self.state.pile().count(), "hands dealt");
        Ok(())
    }

    /// Find and play the opening tile.
    ///
    /// The highest double held opens, searching seats in order for each
    /// double. While nobody holds one, every player draws a tile (as long
    /// as the pile lasts) and the search repeats. The search runs again
    /// after the final draw, so once the pile is empty every double is in
    /// some hand and one is always found; failing that, a tile has gone
    /// missing.
    pub fn zeroth_move(&mut self) -> Result<TileId> {
        let player_count = self.state.player_count();

        loop {
            if let Some((player, tile)) = self.highest_double() {
                self.state.open_with(player, tile)?;
                info!(%player, %tile, "opened with double");
                return Ok(tile);
            }
            if !self.state.can_draw() {
                break;
            }
            debug!("no double held, everyone draws");
            for player in PlayerId::all(player_count) {
                if !self.state.can_draw() {
                    break;
                }
                self.state.set_to_go(player);
                self.state.draw_tile(&mut self.pile_rng)?;
            }
        }

        let lowest = self.state.table().doubles()[0];
        Err(DominoError::InvariantViolation {
            id: lowest,
            detail: "pile is empty but no hand holds a double".into(),
        })
    }

    fn highest_double(&self) -> Option<(PlayerId, TileId)> {
        let state = &self.state;
        state.table().doubles().iter().rev().find_map(|&double| {
            state
                .players()
                .iter()
                .find(|(_, p)| p.hand.contains(double))
                .map(|(id, _)| (id, double))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::core::{GameConfig, TileTable};
    use crate::rules::GameState;
    use crate::strategy::{FirstLegal, MoveSelector, StrategyKind};

    use super::*;

    fn selectors(n: usize) -> Vec<Box<dyn MoveSelector>> {
        (0..n).map(|_| Box::new(FirstLegal) as Box<dyn MoveSelector>).collect()
    }

    #[test]
    fn test_deal_two_players() {
        let mut game = Game::with_strategy(GameConfig::new(2).with_seed(3), StrategyKind::First).unwrap();
        game.set_up_hands().unwrap();

        let state = game.state();
        assert_eq!(state.pile().count(), 14);
        assert_eq!(state.hand_counts().values().copied().collect::<Vec<_>>(), vec![7, 7]);
    }

    #[test]
    fn test_deal_is_deterministic_per_seed() {
        let deal = |seed| {
            let mut game = Game::with_strategy(GameConfig::new(3).with_seed(seed), StrategyKind::First).unwrap();
            game.set_up_hands().unwrap();
            game.state().player(PlayerId::new(2)).hand.members()
        };

        assert_eq!(deal(9), deal(9));
        assert_ne!(deal(9), deal(10));
    }

    #[test]
    fn test_deal_refused_once_dealt() {
        let mut game = Game::with_strategy(GameConfig::new(2).with_seed(3), StrategyKind::First).unwrap();
        game.set_up_hands().unwrap();

        let err = game.set_up_hands().unwrap_err();
        assert!(matches!(err, DominoError::IllegalMove(_)));
        assert_eq!(game.state().pile().count(), 14);
    }

    #[test]
    fn test_highest_double_opens() {
        let table = Arc::new(TileTable::standard());
        let id = |a, b| table.id_of(a, b).unwrap();
        let hands = vec![
            vec![id(2, 2), id(4, 1)],
            vec![id(5, 5), id(3, 3)],
            vec![id(6, 0)],
        ];
        let state = GameState::from_layout(Arc::clone(&table), &[], hands).unwrap();
        let mut game = Game::from_state(GameConfig::new(3), state, selectors(3)).unwrap();

        let opening = game.zeroth_move().unwrap();

        assert_eq!(opening, id(5, 5));
        assert_eq!(game.state().board().ends(), Some((5, 5)));
        assert!(!game.state().player(PlayerId::new(1)).hand.contains(opening));
        // The turn passes to the seat after the opener.
        assert_eq!(game.state().to_go(), PlayerId::new(2));
        assert_eq!(game.state().pass_count(), 0);
    }

    #[test]
    fn test_no_double_means_everyone_draws() {
        let table = Arc::new(TileTable::standard());
        let id = |a, b| table.id_of(a, b).unwrap();
        let hands = vec![vec![id(6, 0)], vec![id(5, 1)]];
        let state = GameState::from_layout(Arc::clone(&table), &[], hands).unwrap();
        let mut game = Game::from_state(GameConfig::new(2).with_seed(21), state, selectors(2)).unwrap();

        let opening = game.zeroth_move().unwrap();

        assert!(table.get(opening).unwrap().is_double());
        let state = game.state();
        let held: usize = state.hand_counts().values().sum();
        // Draws happened, one tile is on the board, nothing was lost.
        assert!(held >= 2);
        assert_eq!(held + state.pile().count() + state.board().tiles().count(), 28);
    }

    #[test]
    fn test_double_drawn_last_still_opens() {
        // Double-one set: [0|0], [1|0], [1|1]. Both doubles start in the pile
        // and the round of draws empties it.
        let table = Arc::new(TileTable::new(1).unwrap());
        let hands = vec![vec![table.id_of(1, 0).unwrap()], vec![]];
        let state = GameState::from_layout(Arc::clone(&table), &[], hands).unwrap();
        let config = GameConfig::new(2).with_max_pip(1).with_hand_size(1);
        let mut game = Game::from_state(config, state, selectors(2)).unwrap();

        let opening = game.zeroth_move().unwrap();

        assert_eq!(opening, table.id_of(1, 1).unwrap());
        assert!(game.state().pile().is_empty());
        assert_eq!(game.state().board().tiles().count(), 1);
    }
}
