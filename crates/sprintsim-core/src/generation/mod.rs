//! Generation - synthetic team, backlog and sprint scaffolding for a run.

mod backlog;
mod names;
mod sprints;
mod team;

pub use backlog::*;
pub use names::*;
pub use sprints::*;
pub use team::*;
