//! Running a game: dealing, the opening, and the play loop.

pub mod driver;
mod setup;

pub use driver::{Game, GameSummary};
