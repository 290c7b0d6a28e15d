//! Injectable randomness for recommendations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random indices
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`; `upper` of zero yields zero
    fn next_index(&self, upper: usize) -> usize;
}

/// Production random source backed by `StdRng`
#[derive(Debug)]
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn next_index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..upper)
    }
}

/// Replays a fixed script of values, wrapping around at the end
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&self, upper: usize) -> usize {
        if upper == 0 || self.values.is_empty() {
            return 0;
        }
        let position = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[position] % upper
    }
}
