//! Core randomness trait for the handout simulator.

/// The central interface for recipient selection.
///
/// This trait abstracts the random number generator so that the handout
/// rule can run against both reproducible (seeded) and production
/// (entropy-backed) sources.
///
/// # Implementations
///
/// - **Simulation**: `SeededIndexSource` - wraps `ChaCha8Rng(seed)`
/// - **Production**: `EntropyIndexSource` - wraps `StdRng` from OS entropy
/// - **Testing**: `ScriptedIndexSource` - replays a fixed list of indices
///
/// # Contract
///
/// Every call is an independent draw from the discrete uniform
/// distribution over `[0, n)`. Callers never pass `n == 0`.
pub trait IndexSource {
    /// Draws an index in `[0, n)`.
    fn next_index(&mut self, n: usize) -> usize;

    /// Returns the source's seed (for logging/debugging).
    ///
    /// Unseeded sources return 0.
    fn seed(&self) -> u64 {
        0
    }
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

impl<S: IndexSource + ?Sized> IndexSource for Box<S> {
    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}
