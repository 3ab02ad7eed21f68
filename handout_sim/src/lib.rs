//! Random Handout Scenario Harness
//!
//! Drives [`handout_core::WealthSimulator`] through named scenarios,
//! checks the handout invariants on every snapshot and exports frames for
//! an external plotting pipeline.
//!
//! # Core Principle
//!
//! All randomness is derived from a single 64-bit seed, so any failing run
//! can be replayed exactly from its seed number.
//!
//! # Usage
//!
//! ```
//! use handout_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let runner = ScenarioRunner::new(42).with_ticks(200);
//! let result = runner.run(ScenarioId::Baseline).unwrap();
//! assert!(result.passed);
//! assert_eq!(result.final_stats.total, 10_000);
//! ```

mod error;
mod exporter;
mod runner;
pub mod scenarios;

pub use error::SimError;
pub use exporter::{SimExport, SimFrame};
pub use runner::{
    collect_history, sibling_seeds, ScenarioMetrics, ScenarioResult, ScenarioRunner,
};
