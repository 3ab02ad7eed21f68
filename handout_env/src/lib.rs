//! Handout Environment Abstraction Layer
//!
//! This crate isolates the only source of non-determinism in the random
//! handout simulator: the choice of recipient for every unit handed out.
//!
//! # Core Concept
//!
//! The simulator never touches a global RNG. It owns an [`IndexSource`]
//! and asks it for one uniform index per giving agent:
//! - **Simulation**: [`SeededIndexSource`] - ChaCha8 seeded from a `u64`
//! - **Production**: [`EntropyIndexSource`] - seeded from OS entropy
//! - **Testing**: [`ScriptedIndexSource`] - replays fixed recipients
//!
//! By deriving all entropy from a single 64-bit seed, any run becomes
//! reproducible via its seed number.
//!
//! # Example
//!
//! ```
//! use handout_env::{IndexSource, SeededIndexSource};
//!
//! let mut source = SeededIndexSource::new(42);
//! let recipient = source.next_index(10);
//! assert!(recipient < 10);
//! ```

mod source;
mod seeded;
mod entropy;
mod scripted;

pub use source::IndexSource;
pub use seeded::SeededIndexSource;
pub use entropy::EntropyIndexSource;
pub use scripted::ScriptedIndexSource;
