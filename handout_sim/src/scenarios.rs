//! Named handout scenarios.

use crate::error::SimError;
use handout_core::SimulationConfig;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// HP-001: one agent hands its unit back to itself forever
    SingleAgent,

    /// HP-002: nobody has anything to give
    Bankrupt,

    /// HP-003: every draw names agent 0
    ForcedRecipient,

    /// HP-004: 100 agents x 100 units, inequality emerges
    Baseline,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::SingleAgent,
            ScenarioId::Bankrupt,
            ScenarioId::ForcedRecipient,
            ScenarioId::Baseline,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::SingleAgent => "single_agent",
            ScenarioId::Bankrupt => "bankrupt",
            ScenarioId::ForcedRecipient => "forced_recipient",
            ScenarioId::Baseline => "baseline",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::SingleAgent => "N=1, W=5: the lone agent always receives its own unit",
            ScenarioId::Bankrupt => "N=3, W=0: no agent can give, distribution frozen at zero",
            ScenarioId::ForcedRecipient => "N=2, W=1, every draw names agent 0: [2, 0] after one tick",
            ScenarioId::Baseline => "N=100, W=100: total conserved while the Gini coefficient climbs",
        }
    }

    /// Population this scenario runs with.
    ///
    /// Only the baseline honours an override; the others pin their
    /// population because their pass condition depends on it.
    pub fn config(&self, baseline: SimulationConfig) -> SimulationConfig {
        match self {
            ScenarioId::SingleAgent => SimulationConfig::new(1, 5),
            ScenarioId::Bankrupt => SimulationConfig::new(3, 0),
            ScenarioId::ForcedRecipient => SimulationConfig::new(2, 1),
            ScenarioId::Baseline => baseline,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_agent" | "singleagent" | "hp-001" => Ok(ScenarioId::SingleAgent),
            "bankrupt" | "broke" | "hp-002" => Ok(ScenarioId::Bankrupt),
            "forced_recipient" | "forcedrecipient" | "hp-003" => Ok(ScenarioId::ForcedRecipient),
            "baseline" | "hp-004" => Ok(ScenarioId::Baseline),
            _ => Err(SimError::UnknownScenario(s.to_string())),
        }
    }
}
