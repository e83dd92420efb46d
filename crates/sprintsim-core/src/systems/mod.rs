//! Systems - logic that advances a run

mod events;
mod impediments;
mod metrics;
mod planning;
mod review;
mod work;

pub use events::*;
pub use impediments::*;
pub use metrics::*;
pub use planning::*;
pub use review::*;
pub use work::*;
