//! The board: the open domino chain and its two ends.
//!
//! ## Key Types
//!
//! - `Board`: open ends, the ordered chain, and the set of placed tiles
//! - `Placement`: one tile in the chain, with the pips it shows left and right

pub mod chain;

pub use chain::{Board, Placement};
