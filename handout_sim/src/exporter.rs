//! JSON exporter for external visualization.
//!
//! Exports wealth snapshots as JSON for a plotting/animation pipeline that
//! renders each frame as a bar chart and assembles the frames.

use crate::error::SimError;
use handout_core::{DistributionStats, SimulationConfig, WealthDistribution};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A single exported snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimFrame {
    /// Tick this snapshot was taken after (0 = initial distribution)
    pub tick: u64,

    /// Wealth by agent index
    pub distribution: WealthDistribution,

    /// Wealth sorted ascending, for display
    pub sorted: Vec<u64>,

    /// Inequality summary
    pub stats: DistributionStats,
}

impl SimFrame {
    /// Builds a frame from a snapshot.
    pub fn new(tick: u64, distribution: &WealthDistribution) -> Self {
        Self {
            tick,
            sorted: distribution.sorted(),
            stats: DistributionStats::compute(distribution),
            distribution: distribution.clone(),
        }
    }
}

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Population
    pub config: SimulationConfig,

    /// All frames
    pub frames: Vec<SimFrame>,

    /// Final results
    pub passed: bool,

    /// Gini coefficient of the last frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_gini: Option<f64>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, seed: u64, config: SimulationConfig) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            config,
            frames: Vec::new(),
            passed: false,
            final_gini: None,
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: SimFrame) {
        self.frames.push(frame);
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, passed: bool) {
        self.passed = passed;
        self.final_gini = self.frames.last().map(|f| f.stats.gini);
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_sorted_copy() {
        let dist = WealthDistribution::from(vec![3, 0, 2]);
        let frame = SimFrame::new(7, &dist);

        assert_eq!(frame.tick, 7);
        assert_eq!(frame.sorted, vec![0, 2, 3]);
        assert_eq!(frame.distribution, dist);
        assert_eq!(frame.stats.total, 5);
    }

    #[test]
    fn test_finalize_takes_last_gini() {
        let mut export = SimExport::new("baseline", 42, SimulationConfig::new(2, 1));
        assert!(export.final_gini.is_none());

        export.add_frame(SimFrame::new(0, &WealthDistribution::uniform(2, 1)));
        export.add_frame(SimFrame::new(1, &WealthDistribution::from(vec![2, 0])));
        export.finalize(true);

        assert!(export.passed);
        assert_eq!(export.final_gini, Some(0.5));
    }

    #[test]
    fn test_write_and_read_back() {
        let mut export = SimExport::new("forced_recipient", 1, SimulationConfig::new(2, 1));
        export.add_frame(SimFrame::new(1, &WealthDistribution::from(vec![2, 0])));
        export.finalize(true);

        let path = std::env::temp_dir().join(format!("handout_export_{}.json", std::process::id()));
        export.write_to_file(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let parsed: SimExport = serde_json::from_str(&json).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(parsed.scenario, "forced_recipient");
        assert_eq!(parsed.frames[0].distribution.as_slice(), &[2, 0]);
        assert_eq!(parsed.config, SimulationConfig::new(2, 1));
    }
}
