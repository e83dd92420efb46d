//! Decision log entries recorded during guided runs.
//!
//! Decisions are stored for later review only. They do not feed back into
//! any simulated outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::systems::EventImpact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub scenario_id: String,
    pub decision_point_id: String,
    pub selected_option: String,
    pub timestamp: DateTime<Utc>,
    pub impact: EventImpact,
}
