//! Production index source seeded from OS entropy.

use crate::IndexSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Index source backed by OS entropy.
///
/// This is the "real" source used for exploratory runs where
/// reproducibility is not needed.
#[derive(Debug)]
pub struct EntropyIndexSource {
    rng: StdRng,
}

impl EntropyIndexSource {
    /// Creates a new source seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for EntropyIndexSource {
    fn next_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_source_in_range() {
        let mut source = EntropyIndexSource::new();

        for _ in 0..1000 {
            assert!(source.next_index(13) < 13);
        }
    }

    #[test]
    fn test_entropy_source_seed() {
        // Production is not seeded
        let source = EntropyIndexSource::default();
        assert_eq!(source.seed(), 0);
    }
}
