//! Sprint close - review and retrospective bookkeeping

use serde::{Deserialize, Serialize};

use crate::components::{SimulationMetrics, Sprint, SprintStatus, WorkItem};

/// Morale gained when a sprint meets its planned velocity.
pub const MORALE_REWARD: f64 = 0.2;
/// Morale lost when a sprint falls short.
pub const MORALE_PENALTY: f64 = 0.3;

/// Result of closing one sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintOutcome {
    pub sprint_id: String,
    pub planned_velocity: f64,
    /// Story points of done items.
    pub actual_velocity: u32,
    pub done: usize,
    pub total: usize,
    /// `done / total * 100`; 0 for a sprint with nothing planned.
    pub success_rate: f64,
    pub met_commitment: bool,
}

/// Close `sprint` and fold its result into the running metrics.
///
/// The running average velocity becomes the mean of itself and the delivered
/// points; morale moves up when delivery met the planned velocity and down
/// otherwise. Unfinished items stay attached to the closed sprint.
pub fn close_sprint(sprint: &mut Sprint, metrics: &mut SimulationMetrics) -> SprintOutcome {
    let actual_velocity = sprint.completed_points();
    let done = sprint.stories.iter().filter(|s| s.is_done()).count();
    let total = sprint.stories.len();
    let success_rate = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    };

    metrics.average_velocity = (metrics.average_velocity + actual_velocity as f64) / 2.0;
    metrics.sprint_success_rate = success_rate;

    let met_commitment = actual_velocity as f64 >= sprint.velocity;
    if met_commitment {
        metrics.adjust_morale(MORALE_REWARD);
    } else {
        metrics.adjust_morale(-MORALE_PENALTY);
    }

    sprint.status = SprintStatus::Completed;

    log::info!(
        "{} closed: {}/{} items, {} of {:.1} points, velocity now {:.2}, morale {:.2}",
        sprint.name,
        done,
        total,
        actual_velocity,
        sprint.velocity,
        metrics.average_velocity,
        metrics.team_morale
    );

    SprintOutcome {
        sprint_id: sprint.id.clone(),
        planned_velocity: sprint.velocity,
        actual_velocity,
        done,
        total,
        success_rate,
        met_commitment,
    }
}

/// Copy the final status of each sprint item back onto its backlog entry.
pub fn sync_backlog_status(backlog: &mut [WorkItem], sprint: &Sprint) {
    for planned in &sprint.stories {
        if let Some(entry) = backlog.iter_mut().find(|item| item.id == planned.id) {
            entry.status = planned.status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Complexity, Priority, StoryStatus};
    use chrono::NaiveDate;

    fn item(id: &str, points: u32, status: StoryStatus) -> WorkItem {
        WorkItem {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            priority: Priority::Medium,
            story_points: points,
            complexity: Complexity::Medium,
            dependencies: vec![],
            technical_debt: 0.0,
            business_value: 5,
            status,
        }
    }

    fn sprint(velocity: f64, stories: Vec<WorkItem>) -> Sprint {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Sprint {
            id: "sprint-0".into(),
            name: "Sprint 1".into(),
            start_date: start,
            end_date: start,
            duration: 1,
            velocity,
            capacity: 0.0,
            stories,
            status: SprintStatus::Active,
            burndown_data: vec![],
            impediments: vec![],
        }
    }

    fn metrics() -> SimulationMetrics {
        SimulationMetrics {
            total_stories_completed: 0,
            average_velocity: 20.0,
            sprint_success_rate: 0.0,
            technical_debt_score: 5.0,
            team_morale: 7.0,
            stakeholder_satisfaction: 5.0,
            timeline_accuracy: 100.0,
            quality_score: 6.5,
        }
    }

    #[test]
    fn test_close_short_sprint() {
        let mut s = sprint(
            20.0,
            vec![
                item("a", 5, StoryStatus::Done),
                item("b", 8, StoryStatus::InProgress),
                item("c", 3, StoryStatus::Done),
                item("d", 2, StoryStatus::SprintBacklog),
            ],
        );
        let mut m = metrics();

        let outcome = close_sprint(&mut s, &mut m);

        assert_eq!(outcome.actual_velocity, 8);
        assert_eq!(outcome.success_rate, 50.0);
        assert!(!outcome.met_commitment);
        assert_eq!(m.average_velocity, 14.0);
        assert_eq!(m.sprint_success_rate, 50.0);
        assert!((m.team_morale - 6.7).abs() < 1e-9);
        assert_eq!(s.status, SprintStatus::Completed);
        // Unfinished work stays where it was
        assert_eq!(s.stories[1].status, StoryStatus::InProgress);
    }

    #[test]
    fn test_close_successful_sprint() {
        let mut s = sprint(7.5, vec![item("a", 8, StoryStatus::Done)]);
        let mut m = metrics();
        let outcome = close_sprint(&mut s, &mut m);
        assert!(outcome.met_commitment);
        assert!((m.team_morale - 7.2).abs() < 1e-9);
        assert_eq!(m.sprint_success_rate, 100.0);
    }

    #[test]
    fn test_close_empty_sprint() {
        let mut s = sprint(0.0, vec![]);
        let mut m = metrics();
        let outcome = close_sprint(&mut s, &mut m);
        assert_eq!(outcome.success_rate, 0.0);
        assert_eq!(m.average_velocity, 10.0);
        // 0 delivered against 0 planned meets the commitment
        assert!(outcome.met_commitment);
    }

    #[test]
    fn test_sync_backlog_status() {
        let mut backlog = vec![
            item("a", 5, StoryStatus::SprintBacklog),
            item("b", 8, StoryStatus::Backlog),
        ];
        let s = sprint(10.0, vec![item("a", 5, StoryStatus::Done)]);
        sync_backlog_status(&mut backlog, &s);
        assert_eq!(backlog[0].status, StoryStatus::Done);
        assert_eq!(backlog[1].status, StoryStatus::Backlog);
    }
}
