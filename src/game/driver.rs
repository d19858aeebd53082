//! The game driver: seats, selectors, RNG streams, and the play loop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::core::{
    DominoError, GameConfig, GameRng, GameRngState, MoveRecord, PlayerId, PlayerMap, Result, TileId,
    TileTable,
};
use crate::rules::{GameResult, GameState};
use crate::strategy::{MoveSelector, StrategyKind};

/// What happened in one call to `Game::play_game`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Tile that opened the board.
    pub opening: TileId,
    /// Moves made after the opening, draws included.
    pub moves: u32,
    /// `None` when the move cap stopped a game still in progress.
    pub result: Option<GameResult>,
    /// Pip totals left in each hand, seat order.
    pub hand_scores: Vec<u32>,
    /// Cumulative points per seat after this game.
    pub points: Vec<u32>,
}

/// A single game: rule state plus one move selector per seat.
pub struct Game {
    config: GameConfig,
    pub(super) state: GameState,
    selectors: PlayerMap<Box<dyn MoveSelector>>,
    pub(super) pile_rng: GameRng,
    strategy_rng: GameRng,
    moves_made: u32,
}

impl Game {
    /// A fresh, undealt game with one selector per seat.
    pub fn new(config: GameConfig, selectors: Vec<Box<dyn MoveSelector>>) -> Result<Self> {
        config.validate()?;
        let table = Arc::new(TileTable::new(config.max_pip)?);
        let state = GameState::new(table, config.player_count)?;
        Self::from_state(config, state, selectors)
    }

    /// Every seat uses the same named strategy.
    pub fn with_strategy(config: GameConfig, kind: StrategyKind) -> Result<Self> {
        let selectors = (0..config.player_count).map(|_| kind.selector()).collect();
        Self::new(config, selectors)
    }

    /// Continue from an existing position.
    pub fn from_state(
        config: GameConfig,
        state: GameState,
        selectors: Vec<Box<dyn MoveSelector>>,
    ) -> Result<Self> {
        config.validate()?;
        if state.player_count() != config.player_count || selectors.len() != config.player_count {
            return Err(DominoError::InvalidConfig(format!(
                "{} seats configured, state has {} and {} selectors were given",
                config.player_count,
                state.player_count(),
                selectors.len()
            )));
        }
        if state.table().max_pip() != config.max_pip {
            return Err(DominoError::InvalidConfig(format!(
                "config uses a double-{} set, state a double-{}",
                config.max_pip,
                state.table().max_pip()
            )));
        }

        let root = GameRng::new(config.seed);
        Ok(Self {
            pile_rng: root.for_context("pile"),
            strategy_rng: root.for_context("strategy"),
            selectors: PlayerMap::from_vec(selectors),
            state,
            config,
            moves_made: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Moves made by the play loop so far.
    #[must_use]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Position of the pile stream, for checkpointing.
    #[must_use]
    pub fn pile_rng_state(&self) -> GameRngState {
        self.pile_rng.state()
    }

    /// Resume the pile stream from a checkpoint taken with `pile_rng_state`.
    ///
    /// Paired with a cloned `GameState`, the resumed game draws the same
    /// tiles the original would have.
    #[must_use]
    pub fn with_pile_rng(mut self, checkpoint: &GameRngState) -> Self {
        self.pile_rng = GameRng::from_state(checkpoint);
        self
    }

    /// True while nobody has gone out and not everyone has passed in a row.
    #[must_use]
    pub fn game_continues(&self) -> bool {
        self.state.game_continues()
    }

    /// Ask the player to go for a move and apply it.
    ///
    /// The selector's choice is re-validated; a bad one is returned as an
    /// error and leaves the game untouched.
    pub fn next_move(&mut self) -> Result<MoveRecord> {
        let player = self.state.to_go();
        let selector = &self.selectors[player];
        let choice = selector.select_move(&self.state, &mut self.strategy_rng);

        self.state.apply(choice, &mut self.pile_rng).inspect_err(|e| {
            warn!(%player, strategy = selector.name(), error = %e, "move refused");
        })
    }

    /// Deal, open, and play until the game ends or the move cap is hit.
    ///
    /// A `Game` plays once; calling this on a dealt game is an
    /// `IllegalMove` and changes nothing.
    pub fn play_game(&mut self) -> Result<GameSummary> {
        self.set_up_hands()?;
        let opening = self.zeroth_move()?;

        while self.game_continues() && self.moves_made < self.config.max_moves {
            let record = self.next_move()?;
            self.moves_made += 1;
            debug!(%record, "move");
            trace!(status = %self.state.status(), "after move");
        }

        let result = self.state.outcome();
        match &result {
            Some(outcome) => {
                if let Some(winner) = outcome.winner() {
                    self.award_points(winner);
                }
                info!(%outcome, moves = self.moves_made, "game over");
            }
            None => warn!(moves = self.moves_made, cap = self.config.max_moves, "move cap reached"),
        }

        Ok(GameSummary {
            opening,
            moves: self.moves_made,
            result,
            hand_scores: self.state.hand_scores().values().copied().collect(),
            points: self.state.players().values().map(|p| p.points()).collect(),
        })
    }

    /// The winner scores the pips left in every other hand.
    fn award_points(&mut self, winner: PlayerId) {
        let points: u32 = self
            .state
            .hand_scores()
            .iter()
            .filter(|(id, _)| *id != winner)
            .map(|(_, score)| *score)
            .sum();
        self.state.player_mut(winner).add_points(points);
        debug!(%winner, points, "awarded points");
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let selectors: Vec<_> = self.selectors.values().map(|s| s.name()).collect();
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("selectors", &selectors)
            .field("moves_made", &self.moves_made)
            .finish()
    }
}
