//! Sprint planning - capacity-bounded selection from the backlog

use serde::{Deserialize, Serialize};

use crate::components::{team_capacity, Sprint, StoryStatus, TeamMember, WorkItem};

/// What a planning pass committed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintPlan {
    /// IDs of the admitted items, in admission order.
    pub selected: Vec<String>,
    /// Story points committed.
    pub committed_points: u32,
    /// Velocity budget the selection was made against.
    pub budget: f64,
    /// Member-hours available to the sprint.
    pub capacity: f64,
}

/// Indices of `Backlog` items, best first.
///
/// Ranked by priority weight plus business value, descending. The sort is
/// stable, so ties keep backlog order.
pub fn rank_backlog(backlog: &[WorkItem]) -> Vec<usize> {
    let mut ranked: Vec<usize> = backlog
        .iter()
        .enumerate()
        .filter(|(_, item)| item.status == StoryStatus::Backlog)
        .map(|(idx, _)| idx)
        .collect();
    ranked.sort_by(|&a, &b| backlog[b].planning_score().cmp(&backlog[a].planning_score()));
    ranked
}

/// Plan `sprint` against a velocity `budget`.
///
/// Items are admitted greedily in rank order while they fit in what is left
/// of the budget; an item that does not fit stays in the backlog for a later
/// sprint and smaller items behind it may still be admitted. Admitted items
/// move to `SprintBacklog` in the backlog and are copied into the sprint.
pub fn plan_sprint(
    sprint: &mut Sprint,
    backlog: &mut [WorkItem],
    team: &[TeamMember],
    budget: f64,
) -> SprintPlan {
    let mut remaining = budget;
    let mut selected = Vec::new();
    let mut committed_points = 0;

    for idx in rank_backlog(backlog) {
        let item = &mut backlog[idx];
        if remaining >= item.story_points as f64 {
            item.status = StoryStatus::SprintBacklog;
            remaining -= item.story_points as f64;
            committed_points += item.story_points;
            selected.push(item.id.clone());
            sprint.stories.push(item.clone());
        }
    }

    let capacity = team_capacity(team, sprint.duration);
    sprint.capacity = capacity;
    sprint.velocity = budget;

    log::debug!(
        "{}: planned {} items / {} points against budget {:.2} ({:.1} member-hours)",
        sprint.name,
        selected.len(),
        committed_points,
        budget,
        capacity
    );

    SprintPlan {
        selected,
        committed_points,
        budget,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Complexity, Priority, Role, SprintStatus};
    use chrono::NaiveDate;

    fn item(id: &str, points: u32, priority: Priority, value: u32) -> WorkItem {
        WorkItem {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            priority,
            story_points: points,
            complexity: Complexity::Medium,
            dependencies: vec![],
            technical_debt: 0.0,
            business_value: value,
            status: StoryStatus::Backlog,
        }
    }

    fn sprint() -> Sprint {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Sprint {
            id: "sprint-0".into(),
            name: "Sprint 1".into(),
            start_date: start,
            end_date: start,
            duration: 2,
            velocity: 0.0,
            capacity: 0.0,
            stories: vec![],
            status: SprintStatus::Planning,
            burndown_data: vec![],
            impediments: vec![],
        }
    }

    fn member(availability: f64) -> TeamMember {
        TeamMember {
            id: "member-0".into(),
            name: "Team Member 1".into(),
            role: Role::Developer,
            experience: 3.0,
            availability,
            skills: vec![],
        }
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let backlog = vec![
            item("a", 1, Priority::Low, 5),    // 6
            item("b", 1, Priority::High, 5),   // 8
            item("c", 1, Priority::Medium, 4), // 6
            item("d", 1, Priority::High, 9),   // 12
        ];
        assert_eq!(rank_backlog(&backlog), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_rank_skips_planned_items() {
        let mut backlog = vec![item("a", 1, Priority::Low, 5), item("b", 1, Priority::High, 5)];
        backlog[1].status = StoryStatus::SprintBacklog;
        assert_eq!(rank_backlog(&backlog), vec![0]);
    }

    #[test]
    fn test_greedy_selection_within_budget() {
        let mut backlog = vec![
            item("big", 8, Priority::High, 10),  // 13, fits (10 left → 2)
            item("mid", 5, Priority::High, 9),   // 12, doesn't fit
            item("small", 2, Priority::Low, 1),  // 2, fits (→ 0)
            item("tiny", 1, Priority::Low, 1),   // 2, doesn't fit
        ];
        let mut s = sprint();
        let team = vec![member(0.8), member(0.7)];

        let plan = plan_sprint(&mut s, &mut backlog, &team, 10.0);

        assert_eq!(plan.selected, vec!["big".to_string(), "small".to_string()]);
        assert_eq!(plan.committed_points, 10);
        assert_eq!(s.stories.len(), 2);
        assert!(s.stories.iter().all(|i| i.status == StoryStatus::SprintBacklog));
        assert_eq!(backlog[1].status, StoryStatus::Backlog);
        assert_eq!(backlog[3].status, StoryStatus::Backlog);
        assert_eq!(s.velocity, 10.0);
        // (0.8 + 0.7) * 40 * 2
        assert!((s.capacity - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_budget() {
        let mut backlog = vec![item("a", 3, Priority::High, 5), item("b", 3, Priority::High, 5)];
        let mut s = sprint();
        let plan = plan_sprint(&mut s, &mut backlog, &[], 5.99);
        assert_eq!(plan.committed_points, 3);
        assert_eq!(s.capacity, 0.0);
    }
}
