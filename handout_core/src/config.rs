//! Simulation configuration.

use crate::error::{HandoutError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a handout simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of agents in the population (N)
    pub num_agents: usize,

    /// Wealth every agent starts with (W)
    pub initial_wealth: u64,
}

impl SimulationConfig {
    /// Creates a configuration for `num_agents` agents holding `initial_wealth` each.
    pub fn new(num_agents: usize, initial_wealth: u64) -> Self {
        Self {
            num_agents,
            initial_wealth,
        }
    }

    /// Checks that the configuration describes a population.
    pub fn validate(&self) -> Result<()> {
        if self.num_agents < 1 {
            return Err(HandoutError::invalid(format!(
                "num_agents must be at least 1, got {}",
                self.num_agents
            )));
        }
        // Total wealth is conserved, so bounding it bounds every agent too
        if (self.num_agents as u64).checked_mul(self.initial_wealth).is_none() {
            return Err(HandoutError::invalid(format!(
                "total wealth {} x {} overflows u64",
                self.num_agents, self.initial_wealth
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_agents: 100,
            initial_wealth: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();

        assert_eq!(config.num_agents, 100);
        assert_eq!(config.initial_wealth, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_agents_rejected() {
        let err = SimulationConfig::new(0, 10).validate().unwrap_err();

        assert!(matches!(err, HandoutError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("num_agents"));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let err = SimulationConfig::new(2, u64::MAX).validate().unwrap_err();
        assert!(matches!(err, HandoutError::InvalidConfiguration(_)));

        // The largest representable total is still accepted
        assert!(SimulationConfig::new(1, u64::MAX).validate().is_ok());
        assert!(SimulationConfig::new(2, u64::MAX / 2).validate().is_ok());
    }

    #[test]
    fn test_zero_wealth_allowed() {
        assert!(SimulationConfig::new(3, 0).validate().is_ok());
    }
}
