//! Results analysis for a finished run.
//!
//! Turns a [`SimulationState`] into the figures a results screen shows:
//! planned vs. delivered velocity per sprint, backlog status distribution,
//! rated scorecards, recommendations and a short list of lessons. Also folds
//! several independent runs into min/mean/max statistics.

use serde::{Deserialize, Serialize};

use crate::components::{ImpedimentSeverity, SimulationMetrics, StoryStatus};
use crate::state::SimulationState;
use crate::systems::EventType;

/// Success threshold for the sprint success rate (%).
pub const SUCCESS_RATE_TARGET: f64 = 80.0;
/// Success threshold for stakeholder satisfaction (1–10).
pub const SATISFACTION_TARGET: f64 = 7.0;

/// Planned vs. delivered figures for one sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityRecord {
    pub sprint: String,
    pub planned_velocity: f64,
    pub actual_velocity: u32,
    pub completed_stories: usize,
    pub total_stories: usize,
}

pub fn velocity_comparison(state: &SimulationState) -> Vec<VelocityRecord> {
    state
        .sprints
        .iter()
        .map(|sprint| VelocityRecord {
            sprint: sprint.name.clone(),
            planned_velocity: sprint.velocity,
            actual_velocity: sprint.completed_points(),
            completed_stories: sprint.count_with_status(StoryStatus::Done),
            total_stories: sprint.stories.len(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: StoryStatus,
    pub count: usize,
}

/// Backlog items per status, in lifecycle order. Empty statuses are omitted.
pub fn story_status_distribution(state: &SimulationState) -> Vec<StatusCount> {
    StoryStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: state.stories_with_status(status).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricRating {
    Good,
    Fair,
    Poor,
}

/// Good from 80 % of `max`, Fair from 60 %, Poor below.
pub fn rate_metric(value: f64, max: f64) -> MetricRating {
    let percentage = if max > 0.0 { value / max * 100.0 } else { 0.0 };
    if percentage >= 80.0 {
        MetricRating::Good
    } else if percentage >= 60.0 {
        MetricRating::Fair
    } else {
        MetricRating::Poor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: f64,
    pub max: f64,
    pub rating: MetricRating,
}

/// Rated scorecard of the bounded metrics.
pub fn scorecard(metrics: &SimulationMetrics) -> Vec<MetricCard> {
    [
        ("Technical Debt Score", metrics.technical_debt_score, 10.0),
        ("Stakeholder Satisfaction", metrics.stakeholder_satisfaction, 10.0),
        ("Timeline Accuracy", metrics.timeline_accuracy, 100.0),
        ("Quality Score", metrics.quality_score, 10.0),
        ("Team Morale", metrics.team_morale, 10.0),
    ]
    .into_iter()
    .map(|(label, value, max)| MetricCard {
        label: label.to_string(),
        value,
        max,
        rating: rate_metric(value, max),
    })
    .collect()
}

/// Advice triggered by weak metrics. The last entry is always present.
pub fn recommendations(metrics: &SimulationMetrics) -> Vec<String> {
    let mut advice = Vec::new();

    if metrics.technical_debt_score < 6.0 {
        advice.push(
            "Consider dedicating more time to technical debt reduction to improve long-term velocity."
                .to_string(),
        );
    }
    if metrics.team_morale < 7.0 {
        advice.push(
            "Focus on team building and addressing impediments to improve morale.".to_string(),
        );
    }
    if metrics.sprint_success_rate < SUCCESS_RATE_TARGET {
        advice.push(
            "Review sprint planning process and consider reducing sprint commitments.".to_string(),
        );
    }
    if metrics.stakeholder_satisfaction < SATISFACTION_TARGET {
        advice.push(
            "Improve communication with stakeholders and manage expectations better.".to_string(),
        );
    }
    advice.push(
        "Continue monitoring velocity trends and adjust capacity planning accordingly."
            .to_string(),
    );

    advice
}

/// Observations drawn from the recorded history.
pub fn lessons(state: &SimulationState) -> Vec<String> {
    let mut lessons = Vec::new();

    let impediments: Vec<ImpedimentSeverity> = state
        .sprints
        .iter()
        .flat_map(|s| s.impediments.iter().map(|i| i.severity))
        .collect();
    if let Some(worst) = impediments.iter().max() {
        lessons.push(format!(
            "{} impediment(s) were raised; the most severe was {:?}.",
            impediments.len(),
            worst
        ));
    }

    let missed = velocity_comparison(state)
        .iter()
        .filter(|r| (r.actual_velocity as f64) < r.planned_velocity)
        .count();
    if missed > 0 {
        lessons.push(format!(
            "{} of {} sprint(s) delivered less than planned.",
            missed,
            state.sprints.len()
        ));
    }

    let scope_changes = state
        .events
        .iter()
        .filter(|e| e.event_type == EventType::ScopeChange)
        .count();
    if scope_changes > 0 {
        lessons.push(format!("Scope changed {} time(s) during the project.", scope_changes));
    }

    let unfinished = state.stories.iter().filter(|s| !s.is_done()).count();
    if unfinished > 0 {
        lessons.push(format!(
            "{} of {} backlog item(s) were not finished.",
            unfinished,
            state.stories.len()
        ));
    }

    lessons
}

/// Condensed outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub success: bool,
    pub metrics: SimulationMetrics,
    /// Completed sprints relative to the configured count.
    pub timeline: f64,
    pub lessons: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn build_result(state: &SimulationState) -> SimulationResult {
    let metrics = state.metrics.clone();
    let success = metrics.sprint_success_rate >= SUCCESS_RATE_TARGET
        && metrics.stakeholder_satisfaction >= SATISFACTION_TARGET;
    let timeline = if state.config.sprint_count == 0 {
        0.0
    } else {
        state.completed_sprints() as f64 / state.config.sprint_count as f64
    };

    SimulationResult {
        success,
        timeline,
        lessons: lessons(state),
        recommendations: recommendations(&metrics),
        metrics,
    }
}

/// Min, mean and max of one scalar over several runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl ScalarStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| ScalarStats {
            min,
            mean: sum / count as f64,
            max,
        })
    }
}

/// Statistics of each metric over independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsAggregate {
    pub runs: usize,
    pub total_stories_completed: ScalarStats,
    pub average_velocity: ScalarStats,
    pub sprint_success_rate: ScalarStats,
    pub technical_debt_score: ScalarStats,
    pub team_morale: ScalarStats,
    pub stakeholder_satisfaction: ScalarStats,
    pub timeline_accuracy: ScalarStats,
    pub quality_score: ScalarStats,
}

impl MetricsAggregate {
    /// Aggregate a set of runs; `None` when there are no runs.
    pub fn from_runs(runs: &[SimulationMetrics]) -> Option<Self> {
        let stat = |f: fn(&SimulationMetrics) -> f64| ScalarStats::from_values(runs.iter().map(f));

        Some(Self {
            runs: runs.len(),
            total_stories_completed: stat(|m| m.total_stories_completed as f64)?,
            average_velocity: stat(|m| m.average_velocity)?,
            sprint_success_rate: stat(|m| m.sprint_success_rate)?,
            technical_debt_score: stat(|m| m.technical_debt_score)?,
            team_morale: stat(|m| m.team_morale)?,
            stakeholder_satisfaction: stat(|m| m.stakeholder_satisfaction)?,
            timeline_accuracy: stat(|m| m.timeline_accuracy)?,
            quality_score: stat(|m| m.quality_score)?,
        })
    }
}
