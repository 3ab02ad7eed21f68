//! Wealth distribution snapshots.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Wealth held by each agent, indexed by agent id.
///
/// Values are `u64`, so the non-negativity invariant holds by
/// construction. Serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WealthDistribution(Vec<u64>);

impl WealthDistribution {
    /// Creates a distribution of `num_agents` agents each holding `wealth`.
    pub fn uniform(num_agents: usize, wealth: u64) -> Self {
        Self(vec![wealth; num_agents])
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no agents.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wealth of agent `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.0.get(index).copied()
    }

    /// Returns the underlying wealth values.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Iterates over agent wealth in index order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Sum of all wealth.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Number of agents with positive wealth (the agents that give next tick).
    pub fn givers(&self) -> usize {
        self.0.iter().filter(|&&w| w > 0).count()
    }

    /// Returns an ascending copy, the order used for display.
    pub fn sorted(&self) -> Vec<u64> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Consumes the distribution, returning the raw values.
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for WealthDistribution {
    fn from(values: Vec<u64>) -> Self {
        Self(values)
    }
}

impl Index<usize> for WealthDistribution {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.0[index]
    }
}

impl AsRef<[u64]> for WealthDistribution {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl std::fmt::Display for WealthDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
