/*!
 * Size Sources
 * Streams of allocation sizes feeding the batch loop
 */

use crate::core::types::Size;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Stream of requested allocation sizes
pub trait SizeSource {
    /// Next requested size in bytes
    fn next_size(&mut self) -> Size;
}

/// Uniform sizes in `[1, max_block_size]`
pub struct UniformSizes {
    rng: StdRng,
    dist: Uniform<Size>,
}

impl UniformSizes {
    /// Entropy-seeded stream; `max_block_size` must be positive
    pub fn new(max_block_size: Size) -> Self {
        Self::from_rng(StdRng::from_entropy(), max_block_size)
    }

    /// Reproducible stream for a fixed seed
    pub fn seeded(max_block_size: Size, seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), max_block_size)
    }

    fn from_rng(rng: StdRng, max_block_size: Size) -> Self {
        Self {
            rng,
            dist: Uniform::new_inclusive(1, max_block_size),
        }
    }
}

impl SizeSource for UniformSizes {
    fn next_size(&mut self) -> Size {
        self.dist.sample(&mut self.rng)
    }
}

/// Replays a fixed sequence, cycling when exhausted
pub struct ReplaySizes {
    sizes: Vec<Size>,
    cursor: usize,
}

impl ReplaySizes {
    pub fn new(sizes: Vec<Size>) -> Self {
        assert!(!sizes.is_empty(), "replay sequence must not be empty");
        Self { sizes, cursor: 0 }
    }
}

impl SizeSource for ReplaySizes {
    fn next_size(&mut self) -> Size {
        let size = self.sizes[self.cursor % self.sizes.len()];
        self.cursor += 1;
        size
    }
}
