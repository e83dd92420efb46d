//! Team roster types.

use serde::{Deserialize, Serialize};

/// Role a team member plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Developer,
    ScrumMaster,
    ProductOwner,
    QAEngineer,
    DevOpsEngineer,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::ScrumMaster => "Scrum Master",
            Role::ProductOwner => "Product Owner",
            Role::QAEngineer => "QA Engineer",
            Role::DevOpsEngineer => "DevOps Engineer",
        }
    }
}

/// A generated team member. Immutable once the run has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Years of experience, never below 0.5.
    pub experience: f64,
    /// Fraction of working time available to the sprint (roughly 0.7–0.9).
    pub availability: f64,
    pub skills: Vec<String>,
}

impl TeamMember {
    /// Hours this member contributes over `weeks` working weeks.
    pub fn capacity_hours(&self, weeks: u32) -> f64 {
        self.availability * crate::config::HOURS_PER_WEEK * weeks as f64
    }
}

/// Mean experience of a roster; 0 for an empty roster.
pub fn average_experience(team: &[TeamMember]) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    team.iter().map(|m| m.experience).sum::<f64>() / team.len() as f64
}

/// Total member-hours a roster contributes to a sprint of `weeks` weeks.
pub fn team_capacity(team: &[TeamMember], weeks: u32) -> f64 {
    team.iter().map(|m| m.capacity_hours(weeks)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(experience: f64, availability: f64) -> TeamMember {
        TeamMember {
            id: "member-0".into(),
            name: "Team Member 1".into(),
            role: Role::Developer,
            experience,
            availability,
            skills: vec![],
        }
    }

    #[test]
    fn test_average_experience() {
        assert_eq!(average_experience(&[]), 0.0);
        let team = vec![member(2.0, 0.8), member(4.0, 0.8)];
        assert!((average_experience(&team) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_team_capacity() {
        let team = vec![member(2.0, 0.5), member(4.0, 0.75)];
        // (0.5 + 0.75) * 40 * 2
        assert!((team_capacity(&team, 2) - 100.0).abs() < 1e-9);
        assert_eq!(team_capacity(&[], 2), 0.0);
    }
}
