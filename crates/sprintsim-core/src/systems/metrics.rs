//! Metrics aggregation - initial values and run finalization

use crate::components::{average_experience, clamp_score, SimulationMetrics, Sprint, TeamMember};
use crate::config::SimulationConfig;

/// Timeline accuracy lost per sprint of deviation from the plan.
pub const TIMELINE_PENALTY_PER_SPRINT: f64 = 20.0;

/// Metrics at the start of a run.
///
/// More experience means higher starting morale; more technical debt means a
/// lower debt score and lower starting quality.
pub fn initial_metrics(config: &SimulationConfig, team: &[TeamMember]) -> SimulationMetrics {
    let avg_experience = average_experience(team);

    SimulationMetrics {
        total_stories_completed: 0,
        average_velocity: config.initial_velocity,
        sprint_success_rate: 0.0,
        technical_debt_score: (10.0 - config.technical_debt_level).clamp(0.0, 10.0),
        team_morale: clamp_score(7.0 + (avg_experience - 3.0) * 0.5),
        stakeholder_satisfaction: 5.0,
        timeline_accuracy: 100.0,
        quality_score: clamp_score(8.0 - config.technical_debt_level * 0.3),
    }
}

/// `max(0, 100 - |planned - completed| * 20)`.
pub fn timeline_accuracy(planned_sprints: u32, completed_sprints: u32) -> f64 {
    let deviation = (planned_sprints as f64 - completed_sprints as f64).abs();
    (100.0 - deviation * TIMELINE_PENALTY_PER_SPRINT).max(0.0)
}

/// Final quality: base adjusted down for debt and up for experience, 1–10.
pub fn quality_score(base_quality: f64, technical_debt_level: f64, avg_experience: f64) -> f64 {
    clamp_score(base_quality - technical_debt_level * 0.1 + avg_experience * 0.1)
}

/// Mean of the velocity, quality and timeline ratios, scaled to 1–10.
pub fn stakeholder_satisfaction(
    average_velocity: f64,
    initial_velocity: f64,
    quality: f64,
    timeline_accuracy: f64,
) -> f64 {
    let velocity_factor = if initial_velocity > 0.0 {
        average_velocity / initial_velocity
    } else {
        0.0
    };
    let quality_factor = quality / 10.0;
    let timeline_factor = timeline_accuracy / 100.0;

    clamp_score((velocity_factor + quality_factor + timeline_factor) / 3.0 * 10.0)
}

/// Compute the derived end-of-run metrics from the complete history.
pub fn finalize_metrics(
    config: &SimulationConfig,
    team: &[TeamMember],
    sprints: &[Sprint],
    metrics: &mut SimulationMetrics,
) {
    let completed = sprints.iter().filter(|s| s.is_completed()).count() as u32;

    metrics.timeline_accuracy = timeline_accuracy(config.sprint_count, completed);
    metrics.quality_score = quality_score(
        metrics.quality_score,
        config.technical_debt_level,
        average_experience(team),
    );
    metrics.stakeholder_satisfaction = stakeholder_satisfaction(
        metrics.average_velocity,
        config.initial_velocity,
        metrics.quality_score,
        metrics.timeline_accuracy,
    );
}
