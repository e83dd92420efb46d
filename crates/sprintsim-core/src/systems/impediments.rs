//! Impediment roll - obstacles that cut the running velocity

use chrono::NaiveDate;

use crate::components::{
    Impediment, ImpedimentSeverity, ImpedimentStatus, SimulationMetrics, Sprint,
};
use crate::generation::IMPEDIMENT_DESCRIPTIONS;
use crate::rng::RandomSource;

/// Chance per working day that an impediment appears.
pub const DAILY_IMPEDIMENT_CHANCE: f64 = 0.05;

/// Low 50%, Medium 30%, High 15%, Critical 5%.
pub fn random_severity(rng: &mut impl RandomSource) -> ImpedimentSeverity {
    let roll = rng.next_f64();
    if roll < 0.5 {
        ImpedimentSeverity::Low
    } else if roll < 0.8 {
        ImpedimentSeverity::Medium
    } else if roll < 0.95 {
        ImpedimentSeverity::High
    } else {
        ImpedimentSeverity::Critical
    }
}

/// Daily impediment roll.
///
/// On a hit, opens an impediment on the sprint and scales the running average
/// velocity by `1 + penalty`. `sequence` is the run-wide impediment number
/// used for the id. Returns the severity when one was created.
pub fn roll_impediment(
    sprint: &mut Sprint,
    metrics: &mut SimulationMetrics,
    date: NaiveDate,
    sequence: usize,
    rng: &mut impl RandomSource,
) -> Option<ImpedimentSeverity> {
    if !rng.chance(DAILY_IMPEDIMENT_CHANCE) {
        return None;
    }

    let description = rng.pick(IMPEDIMENT_DESCRIPTIONS).to_string();
    let severity = random_severity(rng);

    let before = metrics.average_velocity;
    metrics.scale_velocity(severity.velocity_penalty());
    log::debug!(
        "{}: {:?} impediment '{}' - velocity {:.2} -> {:.2}",
        sprint.name,
        severity,
        description,
        before,
        metrics.average_velocity
    );

    sprint.impediments.push(Impediment {
        id: format!("impediment-{}", sequence),
        description,
        severity,
        status: ImpedimentStatus::Open,
        created_at: date,
    });

    Some(severity)
}
