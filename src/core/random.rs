//! Seeded random source used for uniform picks

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Picks an index uniformly in `0..len`
///
/// Callers guarantee `len > 0`.
pub trait SeededRandom {
    fn next_index(&mut self, len: usize) -> usize;
}

impl SeededRandom for ChaCha8Rng {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}
