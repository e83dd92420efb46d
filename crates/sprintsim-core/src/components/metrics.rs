//! Running run-level metrics.

use serde::{Deserialize, Serialize};

/// Lower bound of every 1–10 score.
pub const SCORE_MIN: f64 = 1.0;
/// Upper bound of every 1–10 score.
pub const SCORE_MAX: f64 = 10.0;

/// Scalars updated throughout a run and finalized at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub total_stories_completed: u32,
    /// Running average velocity in points per sprint.
    pub average_velocity: f64,
    /// Share of the last closed sprint's items that were done (%).
    pub sprint_success_rate: f64,
    /// 0–10, higher is healthier.
    pub technical_debt_score: f64,
    /// 1–10.
    pub team_morale: f64,
    /// 1–10.
    pub stakeholder_satisfaction: f64,
    /// 0–100 (%).
    pub timeline_accuracy: f64,
    /// 1–10.
    pub quality_score: f64,
}

impl SimulationMetrics {
    /// Add `delta` to morale, keeping it within 1–10.
    pub fn adjust_morale(&mut self, delta: f64) {
        self.team_morale = clamp_score(self.team_morale + delta);
    }

    /// Scale the running average velocity by `1 + factor`.
    pub fn scale_velocity(&mut self, factor: f64) {
        self.average_velocity *= 1.0 + factor;
    }
}

/// Clamp a value onto the 1–10 score scale.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SimulationMetrics {
        SimulationMetrics {
            total_stories_completed: 0,
            average_velocity: 20.0,
            sprint_success_rate: 0.0,
            technical_debt_score: 5.0,
            team_morale: 9.98,
            stakeholder_satisfaction: 5.0,
            timeline_accuracy: 100.0,
            quality_score: 6.5,
        }
    }

    #[test]
    fn test_morale_clamped() {
        let mut m = metrics();
        m.adjust_morale(0.05);
        assert_eq!(m.team_morale, 10.0);
        m.adjust_morale(-20.0);
        assert_eq!(m.team_morale, 1.0);
    }

    #[test]
    fn test_scale_velocity() {
        let mut m = metrics();
        m.scale_velocity(-0.3);
        assert!((m.average_velocity - 14.0).abs() < 1e-9);
    }
}
