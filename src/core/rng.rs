//! Randomness for tile spawning.
//!
//! The engine never reaches for a global RNG. It draws through the
//! [`TileSource`] trait, so hosts and tests decide where randomness comes
//! from:
//!
//! - **`GameRng`**: seeded ChaCha8, the default source. Same seed, same game.
//! - **Custom sources**: anything implementing `TileSource`, e.g. a scripted
//!   sequence in tests.
//!
//! ```
//! use slide_engine::core::{GameRng, TileSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! assert_eq!(a.pick_index(16), b.pick_index(16));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of the two random decisions a spawn needs.
pub trait TileSource {
    /// Pick an index uniformly in `0..upper`.
    ///
    /// The engine never calls this with `upper == 0`.
    fn pick_index(&mut self, upper: usize) -> usize;

    /// Return `true` with the given probability (in `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;

    /// Capture the source's position so saved games can replay spawns.
    ///
    /// Sources without a checkpoint return `None`.
    fn checkpoint(&self) -> Option<GameRngState> {
        None
    }

    /// Jump to a position captured by [`TileSource::checkpoint`].
    fn resume(&mut self, _state: &GameRngState) {}
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn pick_index(&mut self, upper: usize) -> usize {
        (**self).pick_index(upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn checkpoint(&self) -> Option<GameRngState> {
        (**self).checkpoint()
    }

    fn resume(&mut self, state: &GameRngState) {
        (**self).resume(state);
    }
}

impl<T: TileSource + ?Sized> TileSource for Box<T> {
    fn pick_index(&mut self, upper: usize) -> usize {
        (**self).pick_index(upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn checkpoint(&self) -> Option<GameRngState> {
        (**self).checkpoint()
    }

    fn resume(&mut self, state: &GameRngState) {
        (**self).resume(state);
    }
}

/// Deterministic, seedable RNG.
///
/// Uses ChaCha8 for speed; the word position makes its state cheap to
/// capture and restore.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG with a seed drawn from the thread RNG.
    ///
    /// The chosen seed is still available through [`GameRng::seed`], so a
    /// session can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume from a checkpoint.
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

impl TileSource for GameRng {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    fn checkpoint(&self) -> Option<GameRngState> {
        Some(self.state())
    }

    fn resume(&mut self, state: &GameRngState) {
        *self = Self::from_state(state);
    }
}

/// Serializable RNG checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the RNG was created with
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
