//! Deterministic, seedable randomness.
//!
//! Every random decision in a game (pile draws, random strategies) goes
//! through a `GameRng`, so a seed fully determines a game.
//!
//! ## Context streams
//!
//! ```
//! use rust_dominoes::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut pile = root.for_context("pile");
//! let mut strategy = root.for_context("strategy");
//!
//! // Same root seed and context, same stream.
//! let mut pile_again = GameRng::new(42).for_context("pile");
//! let items = [1, 2, 3, 4, 5, 6, 7, 8];
//! assert_eq!(pile.choose(&items), pile_again.choose(&items));
//! let _ = strategy.choose(&items);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 RNG with independent per-context streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a named purpose.
    ///
    /// The same context always yields the same stream for the same seed,
    /// regardless of how far this RNG has advanced.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random index in `0..len`. Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform choice from a slice; `None` when empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream captured with `state`.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position: the seed plus the ChaCha8 word counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
