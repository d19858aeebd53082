//! Move selectors.
//!
//! - `FirstLegal`: first legal placement, else draw, else pass
//! - `RandomMove`: uniform over legal placements plus drawing

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MoveChoice};
use crate::rules::GameState;

/// Chooses a move for the player to go.
pub trait MoveSelector: Send + Sync {
    /// Propose a move for `state.to_go()`.
    ///
    /// `rng` is a stream reserved for strategies.
    fn select_move(&self, state: &GameState, rng: &mut GameRng) -> MoveChoice;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Plays the first legal tile; otherwise draws; otherwise passes.
#[derive(Clone, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn select_move(&self, state: &GameState, _rng: &mut GameRng) -> MoveChoice {
        if let Some(&(tile, orientation)) = state.legal_moves().first() {
            return MoveChoice::play(tile, orientation);
        }
        if state.can_draw() {
            return MoveChoice::draw();
        }
        MoveChoice::pass()
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

/// Picks uniformly among the legal placements and, when the pile has
/// tiles, drawing. Passes only when neither is possible.
#[derive(Clone, Debug, Default)]
pub struct RandomMove;

impl MoveSelector for RandomMove {
    fn select_move(&self, state: &GameState, rng: &mut GameRng) -> MoveChoice {
        let mut options: Vec<MoveChoice> = state
            .legal_moves()
            .into_iter()
            .map(|(tile, orientation)| MoveChoice::play(tile, orientation))
            .collect();
        if state.can_draw() {
            options.push(MoveChoice::draw());
        }

        rng.choose(&options).copied().unwrap_or_else(MoveChoice::pass)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Named strategies, selectable from the command line or a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    First,
    Random,
}

impl StrategyKind {
    #[must_use]
    pub fn selector(self) -> Box<dyn MoveSelector> {
        match self {
            StrategyKind::First => Box::new(FirstLegal),
            StrategyKind::Random => Box::new(RandomMove),
        }
    }
}
