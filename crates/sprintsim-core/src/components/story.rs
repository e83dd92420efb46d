//! Backlog work items (stories).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ranking weight used by sprint planning.
    pub fn weight(&self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Nominal size in story points before variation.
    pub fn base_points(&self) -> f64 {
        match self {
            Complexity::Simple => 2.0,
            Complexity::Medium => 5.0,
            Complexity::Complex => 8.0,
        }
    }

    /// Multiplier on the daily completion chance.
    pub fn completion_factor(&self) -> f64 {
        match self {
            Complexity::Simple => 1.2,
            Complexity::Medium => 1.0,
            Complexity::Complex => 0.8,
        }
    }
}

/// Lifecycle of a work item.
///
/// `Backlog → SprintBacklog → InProgress → Done`. `Blocked` exists for
/// imported data; the simulation never moves an item into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoryStatus {
    Backlog,
    SprintBacklog,
    InProgress,
    Done,
    Blocked,
}

impl StoryStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [StoryStatus; 5] = [
        StoryStatus::Backlog,
        StoryStatus::SprintBacklog,
        StoryStatus::InProgress,
        StoryStatus::Done,
        StoryStatus::Blocked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StoryStatus::Backlog => "Backlog",
            StoryStatus::SprintBacklog => "Sprint Backlog",
            StoryStatus::InProgress => "In Progress",
            StoryStatus::Done => "Done",
            StoryStatus::Blocked => "Blocked",
        }
    }
}

/// A unit of prioritized work. Only `status` changes during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Size in story points, always ≥ 1.
    pub story_points: u32,
    pub complexity: Complexity,
    /// IDs of items this one depends on.
    pub dependencies: Vec<String>,
    /// Technical debt contributed by this item (0 to the configured level).
    pub technical_debt: f64,
    /// Business value, 1–10.
    pub business_value: u32,
    pub status: StoryStatus,
}

impl WorkItem {
    /// Planning rank: priority weight plus business value.
    pub fn planning_score(&self) -> u32 {
        self.priority.weight() + self.business_value
    }

    pub fn is_done(&self) -> bool {
        self.status == StoryStatus::Done
    }
}

/// Sum of story points over a set of items.
pub fn total_points<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> u32 {
    items.into_iter().map(|s| s.story_points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_score() {
        let item = WorkItem {
            id: "story-0".into(),
            title: "t".into(),
            description: "d".into(),
            priority: Priority::High,
            story_points: 3,
            complexity: Complexity::Simple,
            dependencies: vec![],
            technical_debt: 0.0,
            business_value: 7,
            status: StoryStatus::Backlog,
        };
        assert_eq!(item.planning_score(), 10);
        assert!(!item.is_done());
    }

    #[test]
    fn test_complexity_tables() {
        assert_eq!(Complexity::Simple.base_points(), 2.0);
        assert_eq!(Complexity::Complex.base_points(), 8.0);
        assert_eq!(Complexity::Medium.completion_factor(), 1.0);
        assert_eq!(Priority::Low.weight(), 1);
    }

    #[test]
    fn test_status_order() {
        assert!(StoryStatus::Backlog < StoryStatus::Done);
        assert_eq!(StoryStatus::ALL.len(), 5);
        assert_eq!(StoryStatus::SprintBacklog.label(), "Sprint Backlog");
    }
}
