//! SprintSim Core - Sprint Delivery Simulation Engine
//!
//! A seeded, day-by-day simulation of a software team working through a
//! backlog over a series of fixed-length sprints. Random events, impediments
//! and stochastic story progress move a small set of project metrics.
//!
//! # Architecture
//!
//! - **Components**: Plain data (team members, work items, sprints, metrics)
//! - **Generation**: Builds the team, backlog and sprint windows from a config
//! - **Systems**: Logic that plans, advances and closes sprints
//! - **Engine**: Owns one run and drives the systems in a fixed order
//!
//! A run draws every random number from a single [`rng::SimRng`] stream, so
//! the same config and seed always reproduce the same final state.
//!
//! # Example
//!
//! ```rust,no_run
//! use sprintsim_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(SimulationConfig::default(), Some(42));
//! let state = engine.run_simulation();
//!
//! println!("{} stories done", state.metrics.total_stories_completed);
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod report;
pub mod rng;
pub mod state;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{validate_config, SimulationConfig};
    pub use crate::engine::{run, run_from, SimulationEngine};
    pub use crate::rng::{RandomSource, SimRng};
    pub use crate::state::SimulationState;
}
