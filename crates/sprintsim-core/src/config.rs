//! Simulation configuration, validation and a pre-run summary.
//!
//! The engine trusts its configuration: counts are assumed ≥ 1 and the 0–10
//! scales are assumed in range. Callers check a configuration with
//! [`validate_config`] before running it.
//!
//! ```
//! use sprintsim_core::config::{validate_config, SimulationConfig};
//!
//! let mut config = SimulationConfig::default();
//! config.team_size = 8;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Working hours per team member per week.
pub const HOURS_PER_WEEK: f64 = 40.0;
/// Working days per sprint week.
pub const WORKING_DAYS_PER_WEEK: u32 = 5;
/// Estimated effort per story point, in hours.
pub const HOURS_PER_POINT: f64 = 8.0;

/// Input parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of team members.
    pub team_size: u32,
    /// Number of sprints to run.
    pub sprint_count: u32,
    /// Sprint length in weeks.
    pub sprint_duration: u32,
    /// Starting velocity in story points per sprint.
    pub initial_velocity: f64,
    /// Number of backlog items to generate.
    pub story_count: u32,
    /// Technical debt level (0–10).
    pub technical_debt_level: f64,
    /// Average team experience in years.
    pub team_experience: f64,
    /// Market pressure (0–10).
    pub market_pressure: f64,
    /// Stakeholder engagement (0–10).
    pub stakeholder_engagement: f64,
    /// Tooling quality (0–10).
    pub tooling_quality: f64,
    /// Process maturity (0–10).
    pub process_maturity: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            team_size: 6,
            sprint_count: 4,
            sprint_duration: 2,
            initial_velocity: 25.0,
            story_count: 20,
            technical_debt_level: 5.0,
            team_experience: 4.0,
            market_pressure: 6.0,
            stakeholder_engagement: 7.0,
            tooling_quality: 7.0,
            process_maturity: 6.0,
        }
    }
}

impl SimulationConfig {
    /// Working days in one sprint.
    pub fn working_days_per_sprint(&self) -> u32 {
        self.sprint_duration * WORKING_DAYS_PER_WEEK
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Team must have at least one member.
    EmptyTeam,
    /// At least one sprint is required.
    NoSprints,
    /// Sprints must last at least one week.
    ZeroSprintDuration,
    /// At least one backlog item is required.
    EmptyBacklog,
    /// Initial velocity must be positive.
    NonPositiveVelocity(f64),
    /// Experience cannot be negative.
    NegativeExperience(f64),
    /// A 0–10 scale is out of range.
    ScaleOutOfRange { field: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyTeam => write!(f, "team size must be at least 1"),
            ConfigError::NoSprints => write!(f, "sprint count must be at least 1"),
            ConfigError::ZeroSprintDuration => write!(f, "sprint duration must be at least 1 week"),
            ConfigError::EmptyBacklog => write!(f, "story count must be at least 1"),
            ConfigError::NonPositiveVelocity(v) => {
                write!(f, "initial velocity must be positive, got {}", v)
            }
            ConfigError::NegativeExperience(v) => {
                write!(f, "team experience cannot be negative, got {}", v)
            }
            ConfigError::ScaleOutOfRange { field, value } => {
                write!(f, "{} must be within 0-10, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimulationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.team_size == 0 {
        errors.push(ConfigError::EmptyTeam);
    }
    if config.sprint_count == 0 {
        errors.push(ConfigError::NoSprints);
    }
    if config.sprint_duration == 0 {
        errors.push(ConfigError::ZeroSprintDuration);
    }
    if config.story_count == 0 {
        errors.push(ConfigError::EmptyBacklog);
    }
    if !(config.initial_velocity > 0.0) {
        errors.push(ConfigError::NonPositiveVelocity(config.initial_velocity));
    }
    if !(config.team_experience >= 0.0) {
        errors.push(ConfigError::NegativeExperience(config.team_experience));
    }

    let scales = [
        ("technical_debt_level", config.technical_debt_level),
        ("market_pressure", config.market_pressure),
        ("stakeholder_engagement", config.stakeholder_engagement),
        ("tooling_quality", config.tooling_quality),
        ("process_maturity", config.process_maturity),
    ];
    for (field, value) in scales {
        if !(0.0..=10.0).contains(&value) {
            errors.push(ConfigError::ScaleOutOfRange { field, value });
        }
    }

    errors
}

/// Coarse reading of the technical debt level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

/// Derived figures shown before a run is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Total project length in weeks.
    pub total_weeks: u32,
    /// Expected velocity in points per sprint.
    pub expected_velocity: f64,
    /// Nominal team capacity per sprint in hours (full availability).
    pub capacity_hours_per_sprint: f64,
    /// Complexity implied by the technical debt level.
    pub complexity: ComplexityLevel,
}

/// Estimate the headline numbers of a configuration without running it.
pub fn estimate_summary(config: &SimulationConfig) -> ConfigSummary {
    let complexity = if config.technical_debt_level > 7.0 {
        ComplexityLevel::High
    } else if config.technical_debt_level > 4.0 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::Low
    };

    ConfigSummary {
        total_weeks: config.sprint_count * config.sprint_duration,
        expected_velocity: config.initial_velocity,
        capacity_hours_per_sprint: config.team_size as f64
            * HOURS_PER_WEEK
            * config.sprint_duration as f64,
        complexity,
    }
}
