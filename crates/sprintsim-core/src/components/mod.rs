//! Data types for the simulated project.
//!
//! These are plain data structs. Behavior that advances a run lives in
//! `systems`; creation lives in `generation`.

mod decision;
mod metrics;
mod sprint;
mod story;
mod team;

pub use decision::*;
pub use metrics::*;
pub use sprint::*;
pub use story::*;
pub use team::*;
