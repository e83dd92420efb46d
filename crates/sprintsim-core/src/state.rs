//! Aggregate root of a single simulation run.

use serde::{Deserialize, Serialize};

use crate::components::{Decision, SimulationMetrics, Sprint, StoryStatus, TeamMember, WorkItem};
use crate::config::SimulationConfig;
use crate::systems::SimulationEvent;

/// Everything a run produced. Owned by exactly one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub config: SimulationConfig,
    pub team: Vec<TeamMember>,
    /// The full generated backlog.
    pub stories: Vec<WorkItem>,
    pub sprints: Vec<Sprint>,
    /// Append-only event log.
    pub events: Vec<SimulationEvent>,
    /// Index of the sprint being (or last) executed.
    pub current_sprint: u32,
    /// Zero-based working day within the current sprint.
    pub current_day: u32,
    pub metrics: SimulationMetrics,
    pub decisions: Vec<Decision>,
}

impl SimulationState {
    /// Number of impediments raised so far across all sprints.
    pub fn impediment_count(&self) -> usize {
        self.sprints.iter().map(|s| s.impediments.len()).sum()
    }

    pub fn completed_sprints(&self) -> usize {
        self.sprints.iter().filter(|s| s.is_completed()).count()
    }

    /// Backlog items currently in `status`.
    pub fn stories_with_status(&self, status: StoryStatus) -> impl Iterator<Item = &WorkItem> {
        self.stories.iter().filter(move |s| s.status == status)
    }
}
