//! The rule engine: game state, turn transitions, and outcomes.
//!
//! `GameState` is the state machine. It validates every proposed move
//! against the board and the tile bookkeeping before applying it, and
//! decides when the game is over.

pub mod outcome;
pub mod state;
pub mod status;

pub use outcome::GameResult;
pub use state::{GameState, LegalMoves};
pub use status::{GameStatus, HandStatus};
