//! Sprint scaffolding

use chrono::{Duration, NaiveDate};

use crate::components::{Sprint, SprintStatus};

/// Build `count` empty, contiguous sprint windows starting at `start`.
///
/// Each window covers `duration * 7` calendar days. Velocity and capacity
/// stay zero until the sprint is planned.
pub fn generate_sprints(count: u32, duration: u32, start: NaiveDate) -> Vec<Sprint> {
    let span = duration as i64 * 7;

    (0..count)
        .map(|i| {
            let start_date = start + Duration::days(i as i64 * span);
            let end_date = start_date + Duration::days(span - 1);
            Sprint {
                id: format!("sprint-{}", i),
                name: format!("Sprint {}", i + 1),
                start_date,
                end_date,
                duration,
                velocity: 0.0,
                capacity: 0.0,
                stories: Vec::new(),
                status: SprintStatus::Planning,
                burndown_data: Vec::new(),
                impediments: Vec::new(),
            }
        })
        .collect()
}
