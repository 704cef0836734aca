//! Randomness source for rarity draws.
//!
//! The handler never touches a global generator. It holds a `RandomSource`
//! handed to it at construction, so tests can swap in a fixed sequence and
//! production shares one `StdRng` for the life of the process.

use std::ops::Range;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces uniform integers in a half-open range.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `[range.start, range.end)`. The range must be non-empty.
    fn uniform(&self, range: Range<usize>) -> usize;
}

/// A single generator shared across all requests.
///
/// Created once at startup. Draws are serialized through a mutex which is
/// held only for the duration of one `gen_range` call.
pub struct SharedRng {
    rng: Mutex<StdRng>,
}

impl SharedRng {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixed seed, for reproducible draw sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SharedRng {
    fn uniform(&self, range: Range<usize>) -> usize {
        // StdRng has no invariant a panic could break; poison is ignored
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(range)
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}
