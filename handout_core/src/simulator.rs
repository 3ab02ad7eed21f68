//! The Wealth Simulator: handout rule and snapshot stream.

use crate::config::SimulationConfig;
use crate::distribution::WealthDistribution;
use crate::error::Result;
use handout_env::{EntropyIndexSource, IndexSource, SeededIndexSource};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Applies one tick of the random handout rule.
///
/// Every agent loses one unit, floored at zero. Then every agent whose
/// wealth in `prev` was positive draws a recipient uniformly from
/// `[0, N)` and that recipient gains one unit. Self-giving is allowed
/// and handled like any other draw, so the total is conserved.
///
/// Givers are visited in increasing index order. Increments commute, so
/// any visiting order with the same draws gives the same result.
pub fn handout_step<S: IndexSource + ?Sized>(prev: &[u64], source: &mut S) -> Vec<u64> {
    let n = prev.len();
    let mut next: Vec<u64> = prev.iter().map(|w| w.saturating_sub(1)).collect();

    for &wealth in prev {
        if wealth > 0 {
            let recipient = source.next_index(n);
            next[recipient] += 1;
        }
    }

    next
}

/// Owns a wealth distribution and advances it one tick at a time.
///
/// The simulator owns its index source, so independent simulators never
/// share randomness. `advance` takes `&mut self`; a simulator cannot be
/// stepped from two places at once.
///
/// # Example
///
/// ```
/// use handout_core::{SimulationConfig, WealthSimulator};
///
/// let mut sim = WealthSimulator::seeded(SimulationConfig::new(10, 5), 42).unwrap();
/// let last = sim.stream().take(100).last().unwrap();
/// assert_eq!(last.total(), 50);
/// assert_eq!(sim.tick(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct WealthSimulator<S = SeededIndexSource> {
    /// Population configuration
    config: SimulationConfig,

    /// Distribution at tick 0
    initial: WealthDistribution,

    /// Distribution after the latest tick
    current: WealthDistribution,

    /// Recipient draws
    source: S,

    /// Number of ticks applied so far
    tick: u64,
}

impl WealthSimulator<SeededIndexSource> {
    /// Creates a simulator whose draws come from a ChaCha8 stream seeded with `seed`.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::new(config, SeededIndexSource::new(seed))
    }
}

impl WealthSimulator<EntropyIndexSource> {
    /// Creates a simulator seeded from OS entropy (not reproducible).
    pub fn from_entropy(config: SimulationConfig) -> Result<Self> {
        Self::new(config, EntropyIndexSource::new())
    }
}

impl<S: IndexSource> WealthSimulator<S> {
    /// Creates a simulator with every agent holding `config.initial_wealth`.
    ///
    /// Fails with `InvalidConfiguration` if the population is empty.
    pub fn new(config: SimulationConfig, source: S) -> Result<Self> {
        config.validate()?;

        let initial = WealthDistribution::uniform(config.num_agents, config.initial_wealth);
        debug!(
            "Initialized handout simulator: agents={} wealth={} seed={}",
            config.num_agents,
            config.initial_wealth,
            source.seed()
        );

        Ok(Self {
            config,
            current: initial.clone(),
            initial,
            source,
            tick: 0,
        })
    }

    /// Advances one tick and returns the new distribution.
    pub fn advance(&mut self) -> WealthDistribution {
        let next = handout_step(self.current.as_slice(), &mut self.source);
        self.current = WealthDistribution::from(next);
        self.tick += 1;

        trace!("tick={} distribution={}", self.tick, self.current);
        self.current.clone()
    }

    /// Returns a lazy, infinite stream of snapshots.
    ///
    /// The first element is the result of the next `advance`; the initial
    /// distribution is not repeated. Each pull advances the simulator
    /// exactly once and nothing happens between pulls.
    pub fn stream(&mut self) -> Snapshots<'_, S> {
        Snapshots { sim: self }
    }

    /// Owning variant of [`stream`](Self::stream).
    pub fn into_stream(self) -> IntoSnapshots<S> {
        IntoSnapshots { sim: self }
    }

    /// Distribution at tick 0.
    pub fn initial(&self) -> &WealthDistribution {
        &self.initial
    }

    /// Distribution after the latest tick.
    pub fn current(&self) -> &WealthDistribution {
        &self.current
    }

    /// Number of ticks applied so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the index source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the index source mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

/// Borrowing snapshot stream returned by [`WealthSimulator::stream`].
#[derive(Debug)]
pub struct Snapshots<'a, S> {
    sim: &'a mut WealthSimulator<S>,
}

impl<S: IndexSource> Iterator for Snapshots<'_, S> {
    type Item = WealthDistribution;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sim.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: IndexSource> FusedIterator for Snapshots<'_, S> {}

/// Owning snapshot stream returned by [`WealthSimulator::into_stream`].
#[derive(Debug)]
pub struct IntoSnapshots<S> {
    sim: WealthSimulator<S>,
}

impl<S> IntoSnapshots<S> {
    /// Returns the simulator driving this stream.
    pub fn simulator(&self) -> &WealthSimulator<S> {
        &self.sim
    }

    /// Stops streaming and hands the simulator back.
    pub fn into_inner(self) -> WealthSimulator<S> {
        self.sim
    }
}

impl<S: IndexSource> Iterator for IntoSnapshots<S> {
    type Item = WealthDistribution;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sim.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: IndexSource> FusedIterator for IntoSnapshots<S> {}
