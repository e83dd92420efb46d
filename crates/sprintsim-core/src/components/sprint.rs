//! Sprint containers, burndown samples and impediments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::story::{total_points, StoryStatus, WorkItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    Planning,
    Active,
    Completed,
    Cancelled,
}

/// One remaining-work sample, appended once per simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    pub remaining_points: u32,
    pub remaining_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpedimentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpedimentSeverity {
    /// Relative change applied to the running average velocity.
    pub fn velocity_penalty(&self) -> f64 {
        match self {
            ImpedimentSeverity::Low => -0.05,
            ImpedimentSeverity::Medium => -0.10,
            ImpedimentSeverity::High => -0.20,
            ImpedimentSeverity::Critical => -0.30,
        }
    }
}

/// Impediments are created `Open` and the engine never moves them on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpedimentStatus {
    Open,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impediment {
    pub id: String,
    pub description: String,
    pub severity: ImpedimentSeverity,
    pub status: ImpedimentStatus,
    pub created_at: NaiveDate,
}

/// A fixed-length iteration. Owns its own copies of the planned items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Length in weeks.
    pub duration: u32,
    /// Velocity budget used when the sprint was planned.
    pub velocity: f64,
    /// Team capacity in member-hours.
    pub capacity: f64,
    pub stories: Vec<WorkItem>,
    pub status: SprintStatus,
    pub burndown_data: Vec<BurndownPoint>,
    pub impediments: Vec<Impediment>,
}

impl Sprint {
    /// Date of the `day`-th simulated day (calendar offset from the start).
    pub fn day_date(&self, day: u32) -> NaiveDate {
        self.start_date + chrono::Duration::days(day as i64)
    }

    pub fn planned_points(&self) -> u32 {
        total_points(&self.stories)
    }

    /// Story points of items that are not yet done.
    pub fn remaining_points(&self) -> u32 {
        total_points(self.stories.iter().filter(|s| !s.is_done()))
    }

    /// Story points actually delivered.
    pub fn completed_points(&self) -> u32 {
        total_points(self.stories.iter().filter(|s| s.is_done()))
    }

    pub fn count_with_status(&self, status: StoryStatus) -> usize {
        self.stories.iter().filter(|s| s.status == status).count()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SprintStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Complexity, Priority};

    fn item(points: u32, status: StoryStatus) -> WorkItem {
        WorkItem {
            id: "story".into(),
            title: "t".into(),
            description: "d".into(),
            priority: Priority::Medium,
            story_points: points,
            complexity: Complexity::Medium,
            dependencies: vec![],
            technical_debt: 0.0,
            business_value: 5,
            status,
        }
    }

    fn sprint() -> Sprint {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Sprint {
            id: "sprint-0".into(),
            name: "Sprint 1".into(),
            start_date: start,
            end_date: start + chrono::Duration::days(13),
            duration: 2,
            velocity: 20.0,
            capacity: 0.0,
            stories: vec![
                item(3, StoryStatus::Done),
                item(5, StoryStatus::InProgress),
                item(2, StoryStatus::SprintBacklog),
            ],
            status: SprintStatus::Active,
            burndown_data: vec![],
            impediments: vec![],
        }
    }

    #[test]
    fn test_point_sums() {
        let s = sprint();
        assert_eq!(s.planned_points(), 10);
        assert_eq!(s.completed_points(), 3);
        assert_eq!(s.remaining_points(), 7);
        assert_eq!(s.count_with_status(StoryStatus::InProgress), 1);
    }

    #[test]
    fn test_day_date() {
        let s = sprint();
        assert_eq!(s.day_date(0), s.start_date);
        assert_eq!(s.day_date(3), NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    }

    #[test]
    fn test_severity_penalties() {
        assert_eq!(ImpedimentSeverity::Low.velocity_penalty(), -0.05);
        assert_eq!(ImpedimentSeverity::Critical.velocity_penalty(), -0.30);
        assert!(ImpedimentSeverity::High > ImpedimentSeverity::Medium);
    }
}
