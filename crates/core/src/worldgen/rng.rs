//! Explicitly threaded pseudo-random stream for world generation.
//! One handle is seeded per world and consumed in a fixed call order, so a
//! generated world is reproducible from its seed alone.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub struct GenRng {
    stream: ChaCha8Rng,
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self { stream: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw from the half-open range `[lo, hi)`.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        assert!(lo < hi, "empty range [{lo}, {hi})");
        lo + (self.stream.next_u64() % (hi - lo) as u64) as i32
    }

    /// Uniform draw from `[0, bound)`.
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be positive");
        (self.stream.next_u64() % bound as u64) as usize
    }

    pub fn coin_flip(&mut self) -> bool {
        self.stream.next_u64() & 1 == 0
    }
}
