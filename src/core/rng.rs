//! Deterministic random number generation for trigger evaluation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Serializable**: O(1) state capture and restore for host checkpoints
//! - **Percentage rolls**: One uniform draw in 1..=100 per failure check
//!
//! ## Usage
//!
//! ```
//! use sim_trigger::core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let roll = rng.roll_percent();
//! assert!((1..=100).contains(&roll));
//!
//! // Same seed, same sequence
//! let mut rng2 = SimRng::new(42);
//! assert_eq!(rng2.roll_percent(), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG for probabilistic trigger suppression.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
/// State can be captured and restored in O(1) regardless of how many
/// draws have been consumed.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw one uniform percentage roll in 1..=100.
    pub fn roll_percent(&mut self) -> i32 {
        self.inner.gen_range(1..=100)
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> SimRngState {
        SimRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &SimRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
