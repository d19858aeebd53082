//! Move selection: the pluggable capability that picks a player's move.
//!
//! Selectors only propose; `GameState::apply` re-validates every choice,
//! so a buggy selector surfaces as an error, never as a corrupt game.

pub mod policy;

pub use policy::{FirstLegal, MoveSelector, RandomMove, StrategyKind};
