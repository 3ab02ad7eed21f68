//! Random Handout Wealth Simulator
//!
//! N agents each start with W units of wealth. Every tick, each agent with
//! positive wealth gives one unit to an agent chosen uniformly at random
//! (possibly itself). Wealth never goes negative and the total never
//! changes, yet the distribution drifts steadily away from equality.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               WealthSimulator                │
//! │  ┌────────────────┐     ┌─────────────────┐  │
//! │  │ current:       │     │ source:         │  │
//! │  │ Distribution   │◄────│ IndexSource     │  │
//! │  └───────┬────────┘     └─────────────────┘  │
//! │          │ handout_step()                    │
//! └──────────┼───────────────────────────────────┘
//!            ▼
//!   Snapshots (lazy, infinite, pull-based)
//! ```
//!
//! This crate performs no I/O. Drivers (see `handout_sim`) pull
//! snapshots, check invariants and export them for visualization.
//!
//! # Usage
//!
//! ```
//! use handout_core::{SimulationConfig, WealthSimulator, DistributionStats};
//!
//! let config = SimulationConfig::new(100, 100);
//! let mut sim = WealthSimulator::seeded(config, 42)?;
//!
//! for snapshot in sim.stream().take(10) {
//!     assert_eq!(snapshot.total(), 10_000);
//! }
//! let stats = DistributionStats::compute(sim.current());
//! assert!(stats.gini > 0.0);
//! # Ok::<(), handout_core::HandoutError>(())
//! ```

mod config;
mod distribution;
mod error;
mod simulator;
pub mod stats;

pub use config::SimulationConfig;
pub use distribution::WealthDistribution;
pub use error::{HandoutError, Result};
pub use simulator::{handout_step, IntoSnapshots, Snapshots, WealthSimulator};
pub use stats::DistributionStats;

// Re-exported so callers can pick a source without depending on handout_env
pub use handout_env::{EntropyIndexSource, IndexSource, ScriptedIndexSource, SeededIndexSource};
