//! Events system - narrated occurrences that nudge the running metrics
//!
//! Every event is appended to the run's log and its impact is applied to the
//! metrics at the moment it is recorded. The log is append-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::components::SimulationMetrics;
use crate::rng::RandomSource;

/// Chance per working day that a random event occurs.
pub const DAILY_EVENT_CHANCE: f64 = 0.10;

/// Categories that the daily roll picks from, uniformly.
pub static RANDOM_EVENT_TYPES: &[EventType] = &[
    EventType::ImpedimentCreated,
    EventType::VelocityChange,
    EventType::ScopeChange,
];

/// Kinds of events recorded during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    StoryCompleted,
    ImpedimentCreated,
    VelocityChange,
    ScopeChange,
    TeamChange,
    TechnicalDebtImpact,
}

impl EventType {
    /// Canned narration for randomly rolled events.
    pub fn description(&self) -> &'static str {
        match self {
            EventType::ImpedimentCreated => "A new impediment has been identified",
            EventType::VelocityChange => "Team velocity has changed due to various factors",
            EventType::ScopeChange => "Project scope has been modified",
            _ => "An event occurred",
        }
    }
}

/// Deltas an event carries. Velocity is relative, morale is absolute.
///
/// Absent deltas are always serialized (as `None`); the binary snapshot is positional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub morale: Option<f64>,
    #[serde(default)]
    pub quality: Option<f64>,
    #[serde(default)]
    pub timeline: Option<f64>,
}

impl EventImpact {
    pub fn is_empty(&self) -> bool {
        self.velocity.is_none()
            && self.morale.is_none()
            && self.quality.is_none()
            && self.timeline.is_none()
    }
}

/// An entry in the run's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    pub id: String,
    pub event_type: EventType,
    pub timestamp: NaiveDate,
    pub description: String,
    pub impact: EventImpact,
}

/// Apply an impact to the running metrics.
///
/// Velocity scales the running average by `1 + delta`; morale is added and
/// clamped to 1–10. Quality and timeline deltas are informational.
pub fn apply_impact(metrics: &mut SimulationMetrics, impact: &EventImpact) {
    if let Some(velocity) = impact.velocity {
        metrics.scale_velocity(velocity);
    }
    if let Some(morale) = impact.morale {
        metrics.adjust_morale(morale);
    }
}

/// Append an event to the log and apply its impact immediately.
pub fn record_event(
    events: &mut Vec<SimulationEvent>,
    metrics: &mut SimulationMetrics,
    event_type: EventType,
    timestamp: NaiveDate,
    description: String,
    impact: EventImpact,
) {
    let id = format!("event-{}", events.len());
    apply_impact(metrics, &impact);
    log::debug!("{} {:?} on {}: {}", id, event_type, timestamp, description);

    events.push(SimulationEvent {
        id,
        event_type,
        timestamp,
        description,
        impact,
    });
}

/// Impact of a randomly rolled event.
///
/// Both the velocity swing and the timeline swing are drawn on every call,
/// whichever category was rolled, so the stream advances by two.
pub fn random_event_impact(event_type: EventType, rng: &mut impl RandomSource) -> EventImpact {
    let velocity_swing = rng.jitter(0.2);
    let timeline_swing = rng.jitter(0.3);

    match event_type {
        EventType::ImpedimentCreated => EventImpact {
            velocity: Some(-0.1),
            morale: Some(-0.05),
            ..Default::default()
        },
        EventType::VelocityChange => EventImpact {
            velocity: Some(velocity_swing),
            ..Default::default()
        },
        EventType::ScopeChange => EventImpact {
            timeline: Some(timeline_swing),
            ..Default::default()
        },
        _ => EventImpact::default(),
    }
}

/// Daily event roll. Returns the category when an event fired.
pub fn roll_daily_event(
    events: &mut Vec<SimulationEvent>,
    metrics: &mut SimulationMetrics,
    date: NaiveDate,
    rng: &mut impl RandomSource,
) -> Option<EventType> {
    if !rng.chance(DAILY_EVENT_CHANCE) {
        return None;
    }

    let event_type = *rng.pick(RANDOM_EVENT_TYPES);
    let impact = random_event_impact(event_type, rng);
    record_event(
        events,
        metrics,
        event_type,
        date,
        event_type.description().to_string(),
        impact,
    );

    Some(event_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

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

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_no_event_above_threshold() {
        let mut events = Vec::new();
        let mut m = metrics();
        let mut rng = ScriptedRng::new([0.5], 1);

        assert_eq!(roll_daily_event(&mut events, &mut m, date(), &mut rng), None);
        assert!(events.is_empty());
        assert_eq!(m, metrics());
    }

    #[test]
    fn test_impediment_event_applies_impact() {
        let mut events = Vec::new();
        let mut m = metrics();
        // fire, category 0 (ImpedimentCreated), two swing draws
        let mut rng = ScriptedRng::new([0.05, 0.1, 0.5, 0.5], 1);

        let fired = roll_daily_event(&mut events, &mut m, date(), &mut rng);
        assert_eq!(fired, Some(EventType::ImpedimentCreated));
        assert_eq!(rng.remaining(), 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "event-0");
        assert!((m.average_velocity - 18.0).abs() < 1e-9);
        assert!((m.team_morale - 6.95).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_change_uses_swing() {
        let mut events = Vec::new();
        let mut m = metrics();
        // category 1 (VelocityChange), velocity swing (1.0 - 0.5) * 0.2 = +0.1
        let mut rng = ScriptedRng::new([0.0, 0.5, 1.0, 0.0], 1);

        roll_daily_event(&mut events, &mut m, date(), &mut rng);
        assert_eq!(events[0].event_type, EventType::VelocityChange);
        assert!((m.average_velocity - 22.0).abs() < 1e-9);
        assert_eq!(m.team_morale, 7.0);
    }

    #[test]
    fn test_scope_change_leaves_metrics() {
        let mut events = Vec::new();
        let mut m = metrics();
        let mut rng = ScriptedRng::new([0.0, 0.9, 0.5, 1.0], 1);

        roll_daily_event(&mut events, &mut m, date(), &mut rng);
        let event = &events[0];
        assert_eq!(event.event_type, EventType::ScopeChange);
        assert!((event.impact.timeline.unwrap() - 0.15).abs() < 1e-9);
        assert_eq!(m, metrics());
    }

    #[test]
    fn test_record_event_sequential_ids() {
        let mut events = Vec::new();
        let mut m = metrics();
        for _ in 0..3 {
            record_event(
                &mut events,
                &mut m,
                EventType::TeamChange,
                date(),
                "x".into(),
                EventImpact::default(),
            );
        }
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["event-0", "event-1", "event-2"]);
        assert!(events[0].impact.is_empty());
    }
}
