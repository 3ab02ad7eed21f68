//! Inequality statistics over a wealth distribution.
//!
//! These are read-only summaries used by drivers to report how unequal a
//! snapshot has become:
//! - **Variance**: population variance of agent wealth
//! - **Gini**: 0 for perfect equality, approaching 1 as wealth concentrates
//! - **Top decile share**: fraction of all wealth held by the richest 10%

use crate::distribution::WealthDistribution;
use serde::{Deserialize, Serialize};

/// Summary statistics for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionStats {
    /// Number of agents
    pub agents: usize,

    /// Sum of all wealth
    pub total: u64,

    /// Mean wealth per agent
    pub mean: f64,

    /// Population variance of wealth
    pub variance: f64,

    /// Poorest agent's wealth
    pub min: u64,

    /// Richest agent's wealth
    pub max: u64,

    /// Agents holding nothing
    pub zero_count: usize,

    /// Gini coefficient in [0, 1)
    pub gini: f64,

    /// Share of total wealth held by the richest ceil(N/10) agents
    pub top_decile_share: f64,
}

impl DistributionStats {
    /// Computes statistics for `dist`. An empty distribution yields all zeros.
    pub fn compute(dist: &WealthDistribution) -> Self {
        let agents = dist.len();
        if agents == 0 {
            return Self::default();
        }

        let sorted = dist.sorted();
        let total: u64 = sorted.iter().sum();
        let n = agents as f64;
        let mean = total as f64 / n;

        let variance = sorted
            .iter()
            .map(|&w| {
                let d = w as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            agents,
            total,
            mean,
            variance,
            min: sorted[0],
            max: sorted[agents - 1],
            zero_count: sorted.iter().take_while(|&&w| w == 0).count(),
            gini: gini_sorted(&sorted, total),
            top_decile_share: top_share_sorted(&sorted, total, agents.div_ceil(10)),
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Gini coefficient of an ascending slice.
///
/// `G = 2 * sum(i * x_i) / (n * sum(x)) - (n + 1) / n`, with 1-based `i`.
fn gini_sorted(sorted: &[u64], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = sorted.len() as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &w)| (i as f64 + 1.0) * w as f64)
        .sum();

    (2.0 * weighted / (n * total as f64) - (n + 1.0) / n).max(0.0)
}

fn top_share_sorted(sorted: &[u64], total: u64, k: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let top: u64 = sorted.iter().rev().take(k).sum();
    top as f64 / total as f64
}
