//! Backlog generation

use crate::components::{Complexity, Priority, StoryStatus, WorkItem};
use crate::rng::RandomSource;

use super::names::story_title;

/// Generate `count` backlog items.
///
/// Per item, in draw order: complexity, size variation, technical debt,
/// business value, priority.
pub fn generate_backlog(
    count: u32,
    technical_debt_level: f64,
    rng: &mut impl RandomSource,
) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(count as usize);

    for i in 0..count as usize {
        let complexity = random_complexity(rng);
        let story_points = story_points_for(complexity, rng);
        let technical_debt = technical_debt_level * rng.next_f64();
        let business_value = 1 + (rng.next_f64() * 10.0).floor() as u32;
        let priority = random_priority(rng);
        let title = story_title(i);

        items.push(WorkItem {
            id: format!("story-{}", i),
            title: title.to_string(),
            description: format!("Detailed description for {}", title),
            priority,
            story_points,
            complexity,
            dependencies: Vec::new(),
            technical_debt,
            business_value,
            status: StoryStatus::Backlog,
        });
    }

    items
}

/// Simple 40%, Medium 40%, Complex 20%.
fn random_complexity(rng: &mut impl RandomSource) -> Complexity {
    let roll = rng.next_f64();
    if roll < 0.4 {
        Complexity::Simple
    } else if roll < 0.8 {
        Complexity::Medium
    } else {
        Complexity::Complex
    }
}

/// Base points for the complexity ±1, rounded, never below 1.
fn story_points_for(complexity: Complexity, rng: &mut impl RandomSource) -> u32 {
    let points = (complexity.base_points() + rng.jitter(2.0)).round();
    points.max(1.0) as u32
}

/// High 30%, Medium 40%, Low 30%.
fn random_priority(rng: &mut impl RandomSource) -> Priority {
    let roll = rng.next_f64();
    if roll < 0.3 {
        Priority::High
    } else if roll < 0.7 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
