//! Simulation engine - main entry point for running a simulation
//!
//! The engine generates the team, backlog and sprint windows when it is
//! constructed, then executes sprint after sprint:
//!
//! 1. plan the sprint against the running average velocity
//! 2. run one [`SimulationEngine::execute_day`] per working day
//! 3. close the sprint and fold its result into the metrics
//!
//! and finally derives the end-of-run scores. All randomness comes from the
//! engine's single [`RandomSource`], in a fixed call order.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{BurndownPoint, Decision, ImpedimentSeverity, SprintStatus};
use crate::config::{SimulationConfig, WORKING_DAYS_PER_WEEK};
use crate::generation::{generate_backlog, generate_sprints, generate_team};
use crate::rng::{random_seed, RandomSource, SimRng};
use crate::state::SimulationState;
use crate::systems::*;

/// What happened on one simulated working day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub date: NaiveDate,
    /// Category of the random event, if one fired.
    pub event: Option<EventType>,
    pub progress: WorkProgress,
    pub burndown: BurndownPoint,
    /// Severity of the impediment raised today, if any.
    pub impediment: Option<ImpedimentSeverity>,
}

/// Main simulation engine. Owns one run's state and its random stream.
pub struct SimulationEngine<R: RandomSource = SimRng> {
    state: SimulationState,
    rng: R,
    /// Seed the stream was created from, when the engine made it.
    seed: Option<u64>,
    finalized: bool,
}

impl SimulationEngine<SimRng> {
    /// Build a run starting today. Without a seed, one is picked at random.
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        Self::with_start_date(config, seed, Utc::now().date_naive())
    }

    /// Build a run whose first sprint starts on `start_date`.
    pub fn with_start_date(
        config: SimulationConfig,
        seed: Option<u64>,
        start_date: NaiveDate,
    ) -> Self {
        let seed = seed.unwrap_or_else(random_seed);
        let mut engine = Self::with_rng(config, SimRng::new(seed), start_date);
        engine.seed = Some(seed);
        engine
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    /// Build a run on a caller-supplied random source.
    ///
    /// Generation draws the team first, then the backlog.
    pub fn with_rng(config: SimulationConfig, mut rng: R, start_date: NaiveDate) -> Self {
        let team = generate_team(config.team_size, config.team_experience, &mut rng);
        let stories = generate_backlog(config.story_count, config.technical_debt_level, &mut rng);
        let sprints = generate_sprints(config.sprint_count, config.sprint_duration, start_date);
        let metrics = initial_metrics(&config, &team);

        log::info!(
            "Generated run: {} members, {} stories, {} sprints of {} weeks from {}",
            team.len(),
            stories.len(),
            sprints.len(),
            config.sprint_duration,
            start_date
        );

        Self {
            state: SimulationState {
                config,
                team,
                stories,
                sprints,
                events: Vec::new(),
                current_sprint: 0,
                current_day: 0,
                metrics,
                decisions: Vec::new(),
            },
            rng,
            seed: None,
            finalized: false,
        }
    }

    /// Resume from an existing state on a caller-supplied random source.
    ///
    /// A state whose sprints are all completed is treated as finalized. An
    /// `Active` sprint continues from its next unsampled day without being
    /// planned again. The trace only matches an uninterrupted run when `rng`
    /// is the stream as it stood when the state was captured.
    pub fn from_state(state: SimulationState, rng: R) -> Self {
        Self::resume(state, rng, None)
    }

    /// Like [`from_state`](Self::from_state), keeping the seed the run was started from.
    pub fn resume(state: SimulationState, rng: R, seed: Option<u64>) -> Self {
        let finalized = !state.sprints.is_empty() && state.sprints.iter().all(|s| s.is_completed());
        Self {
            state,
            rng,
            seed,
            finalized,
        }
    }

    /// Run every remaining sprint and finalize the metrics.
    ///
    /// Calling this again on a finished run does nothing.
    pub fn run_simulation(&mut self) -> &SimulationState {
        if self.finalized {
            return &self.state;
        }

        for index in 0..self.state.sprints.len() {
            self.run_sprint(index);
        }
        self.finalize();

        &self.state
    }

    /// Plan, execute and close one sprint.
    ///
    /// An `Active` sprint is not re-planned; its remaining days run from the
    /// number of burndown samples already taken. Closed sprints return `None`.
    pub fn run_sprint(&mut self, index: usize) -> Option<SprintOutcome> {
        let status = self.state.sprints.get(index)?.status;
        match status {
            SprintStatus::Planning => {
                self.start_sprint(index)?;
            }
            SprintStatus::Active => {}
            SprintStatus::Completed | SprintStatus::Cancelled => return None,
        }

        let sprint = &self.state.sprints[index];
        let days = sprint.duration * WORKING_DAYS_PER_WEEK;
        let first_day = sprint.burndown_data.len() as u32;
        if first_day > 0 {
            log::info!("{} resumed at day {} of {}", sprint.name, first_day + 1, days);
        }
        for day in first_day..days {
            self.execute_day(index, day);
        }

        self.finish_sprint(index)
    }

    /// Activate a sprint and plan it against the current average velocity.
    pub fn start_sprint(&mut self, index: usize) -> Option<SprintPlan> {
        let state = &mut self.state;
        let budget = state.metrics.average_velocity;
        let sprint = state.sprints.get_mut(index)?;

        state.current_sprint = index as u32;
        sprint.status = SprintStatus::Active;
        Some(plan_sprint(sprint, &mut state.stories, &state.team, budget))
    }

    /// Advance sprint `index` by one working day.
    ///
    /// Fixed order: event roll, work progress, burndown sample, impediment roll.
    pub fn execute_day(&mut self, index: usize, day: u32) -> Option<DayReport> {
        let team_size = self.state.team.len();
        let impediment_sequence = self.state.impediment_count();
        let state = &mut self.state;
        let sprint = state.sprints.get_mut(index)?;

        state.current_sprint = index as u32;
        state.current_day = day;
        let date = sprint.day_date(day);

        let event = roll_daily_event(&mut state.events, &mut state.metrics, date, &mut self.rng);
        let progress = progress_work(
            sprint,
            team_size,
            date,
            &mut state.events,
            &mut state.metrics,
            &mut self.rng,
        );
        let burndown = record_burndown(sprint, date);
        let impediment = roll_impediment(
            sprint,
            &mut state.metrics,
            date,
            impediment_sequence,
            &mut self.rng,
        );

        Some(DayReport {
            date,
            event,
            progress,
            burndown,
            impediment,
        })
    }

    /// Close sprint `index` and update the running metrics.
    pub fn finish_sprint(&mut self, index: usize) -> Option<SprintOutcome> {
        let state = &mut self.state;
        let sprint = state.sprints.get_mut(index)?;

        let outcome = close_sprint(sprint, &mut state.metrics);
        sync_backlog_status(&mut state.stories, sprint);
        Some(outcome)
    }

    /// Derive the end-of-run scores. Only the first call has an effect.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let state = &mut self.state;
        finalize_metrics(&state.config, &state.team, &state.sprints, &mut state.metrics);
        self.finalized = true;

        log::info!(
            "Run finished: {} stories done, velocity {:.2}, quality {:.2}, satisfaction {:.2}",
            state.metrics.total_stories_completed,
            state.metrics.average_velocity,
            state.metrics.quality_score,
            state.metrics.stakeholder_satisfaction
        );
    }

    /// Record a decision taken at a decision point.
    ///
    /// Decisions are logged only; they never change simulated outcomes.
    pub fn make_decision(&mut self, decision_point_id: &str, option_id: &str) -> &Decision {
        let decisions = &mut self.state.decisions;
        decisions.push(Decision {
            id: format!("decision-{}", decisions.len()),
            scenario_id: "current".to_string(),
            decision_point_id: decision_point_id.to_string(),
            selected_option: option_id.to_string(),
            timestamp: Utc::now(),
            impact: EventImpact::default(),
        });
        &decisions[decisions.len() - 1]
    }

    /// The random stream in its current position.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    /// Seed of the stream, when the engine created it.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// Run a complete simulation starting today (UTC) and return its final state.
///
/// Sprint windows and every event, burndown and impediment date follow the
/// start date, so two same-seed runs on different days differ in their dates.
/// Use [`run_from`] for a byte-identical trace.
pub fn run(config: SimulationConfig, seed: Option<u64>) -> SimulationState {
    run_from(config, seed, Utc::now().date_naive())
}

/// Run a complete simulation whose first sprint starts on `start_date`.
pub fn run_from(
    config: SimulationConfig,
    seed: Option<u64>,
    start_date: NaiveDate,
) -> SimulationState {
    let mut engine = SimulationEngine::with_start_date(config, seed, start_date);
    engine.run_simulation();
    engine.into_state()
}
