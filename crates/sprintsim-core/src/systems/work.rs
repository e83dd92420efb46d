//! Work progress and burndown - the per-day story lifecycle
//!
//! In-progress items finish with a chance driven by complexity and morale.
//! Pending sprint items are then pulled in under a work-in-progress cap
//! derived from team size.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::components::{BurndownPoint, SimulationMetrics, Sprint, StoryStatus, WorkItem};
use crate::config::HOURS_PER_POINT;
use crate::rng::RandomSource;

use super::events::{record_event, EventImpact, EventType, SimulationEvent};

/// Base daily completion chance of an in-progress item.
pub const BASE_COMPLETION_CHANCE: f64 = 0.3;
/// Daily chance that a pending item is started when under the cap.
pub const START_CHANCE: f64 = 0.3;
/// In-progress items allowed per team member.
pub const WIP_PER_MEMBER: f64 = 1.5;

/// Impact recorded for every completed item.
pub const COMPLETION_IMPACT: EventImpact = EventImpact {
    velocity: Some(0.1),
    morale: Some(0.05),
    quality: None,
    timeline: None,
};

/// Counts from one day of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkProgress {
    pub completed: u32,
    pub started: u32,
}

/// Chance that `item` is finished today at the given morale.
pub fn completion_chance(item: &WorkItem, team_morale: f64) -> f64 {
    BASE_COMPLETION_CHANCE * item.complexity.completion_factor() * (team_morale / 10.0)
}

/// Maximum number of items in progress at once: `ceil(team_size * 1.5)`.
pub fn wip_limit(team_size: usize) -> usize {
    (team_size as f64 * WIP_PER_MEMBER).ceil() as usize
}

/// Advance every item of the sprint by one working day.
///
/// Completions are rolled first, one draw per in-progress item in sprint
/// order; each completion is logged as a `StoryCompleted` event whose impact
/// applies immediately. Starts follow: a pending item is only rolled while
/// the in-progress count (after today's completions, plus today's starts) is
/// below the cap, so the cap is never exceeded.
pub fn progress_work(
    sprint: &mut Sprint,
    team_size: usize,
    date: NaiveDate,
    events: &mut Vec<SimulationEvent>,
    metrics: &mut SimulationMetrics,
    rng: &mut impl RandomSource,
) -> WorkProgress {
    let mut progress = WorkProgress::default();

    for item in sprint.stories.iter_mut() {
        if item.status != StoryStatus::InProgress {
            continue;
        }
        if rng.chance(completion_chance(item, metrics.team_morale)) {
            item.status = StoryStatus::Done;
            metrics.total_stories_completed += 1;
            progress.completed += 1;
            record_event(
                events,
                metrics,
                EventType::StoryCompleted,
                date,
                format!("Story \"{}\" completed", item.title),
                COMPLETION_IMPACT,
            );
        }
    }

    let limit = wip_limit(team_size);
    let mut active = sprint.count_with_status(StoryStatus::InProgress);

    for item in sprint.stories.iter_mut() {
        if item.status != StoryStatus::SprintBacklog {
            continue;
        }
        if active < limit && rng.chance(START_CHANCE) {
            item.status = StoryStatus::InProgress;
            active += 1;
            progress.started += 1;
        }
    }

    progress
}

/// Append today's remaining-work sample to the sprint.
pub fn record_burndown(sprint: &mut Sprint, date: NaiveDate) -> BurndownPoint {
    let remaining_points = sprint.remaining_points();
    let point = BurndownPoint {
        date,
        remaining_points,
        remaining_hours: remaining_points as f64 * HOURS_PER_POINT,
    };
    sprint.burndown_data.push(point.clone());
    point
}
