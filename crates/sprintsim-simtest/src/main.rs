//! SprintSim Headless Simulation Harness
//!
//! Runs complete simulations in-process and validates the engine's
//! invariants: determinism, planning budget, metric bounds, burndown shape,
//! reference scenarios, reporting and persistence.
//!
//! Usage:
//!   cargo run -p sprintsim-simtest
//!   cargo run -p sprintsim-simtest -- --verbose --runs 50
//!   cargo run -p sprintsim-simtest -- --seed 7 --team 8 --sprints 6 --json

use chrono::NaiveDate;
use clap::{Args, Parser};
use serde::Serialize;
use sprintsim_core::components::{ImpedimentSeverity, StoryStatus, SCORE_MAX, SCORE_MIN};
use sprintsim_core::config::{
    estimate_summary, validate_config, ConfigError, SimulationConfig, WORKING_DAYS_PER_WEEK,
};
use sprintsim_core::engine::SimulationEngine;
use sprintsim_core::persistence::{export_json, import_json, load_state, save_state};
use sprintsim_core::report::{
    build_result, recommendations, story_status_distribution, velocity_comparison,
    MetricsAggregate, SimulationResult,
};
use sprintsim_core::rng::{ScriptedRng, SimRng};
use sprintsim_core::state::SimulationState;
use tracing_subscriber::EnvFilter;

// ── Command line ────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sprintsim-simtest")]
#[command(about = "Headless sprint simulation harness")]
struct Options {
    /// Print every check and the engine's debug log
    #[arg(short, long)]
    verbose: bool,

    /// Print the results report as JSON
    #[arg(long)]
    json: bool,

    /// Seed of the reference run
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of seeds in the metric-bounds sweep
    #[arg(long, default_value_t = 20)]
    runs: u64,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[arg(skip)]
    config: SimulationConfig,
}

/// Overrides applied on top of the default configuration.
#[derive(Args)]
struct ConfigOverrides {
    /// Team size
    #[arg(long)]
    team: Option<u32>,
    /// Number of sprints
    #[arg(long)]
    sprints: Option<u32>,
    /// Sprint length in weeks
    #[arg(long)]
    duration: Option<u32>,
    /// Initial velocity in points per sprint
    #[arg(long)]
    velocity: Option<f64>,
    /// Backlog size
    #[arg(long)]
    stories: Option<u32>,
    /// Technical debt level (0-10)
    #[arg(long)]
    debt: Option<f64>,
    /// Average team experience in years
    #[arg(long)]
    experience: Option<f64>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(v) = self.team {
            config.team_size = v;
        }
        if let Some(v) = self.sprints {
            config.sprint_count = v;
        }
        if let Some(v) = self.duration {
            config.sprint_duration = v;
        }
        if let Some(v) = self.velocity {
            config.initial_velocity = v;
        }
        if let Some(v) = self.stories {
            config.story_count = v;
        }
        if let Some(v) = self.debt {
            config.technical_debt_level = v;
        }
        if let Some(v) = self.experience {
            config.team_experience = v;
        }
        config
    }
}

impl Options {
    fn from_args() -> Self {
        Self::parse().resolved()
    }

    fn resolved(mut self) -> Self {
        self.config = self.overrides.apply(SimulationConfig::default());
        self
    }
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)));
    // stderr keeps --json output clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Next seed after `seed` whose random stream differs from it.
fn next_distinct_seed(seed: u64) -> u64 {
    let mut next = seed.wrapping_add(1);
    while SimRng::new(next) == SimRng::new(seed) {
        next = next.wrapping_add(1);
    }
    next
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn run_seeded(config: &SimulationConfig, seed: u64) -> SimulationState {
    let mut engine = SimulationEngine::with_start_date(config.clone(), Some(seed), start_date());
    engine.run_simulation();
    engine.into_state()
}

/// Printed with `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a SimulationConfig,
    seed: u64,
    result: SimulationResult,
    aggregate: Option<MetricsAggregate>,
}

fn main() {
    let opts = Options::from_args();
    init_logging(opts.verbose);

    println!("=== SprintSim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration checks
    results.extend(validate_configuration(&opts));

    // 2. Determinism
    results.extend(validate_determinism(&opts));

    // 3. Planning budget
    results.extend(validate_planning(&opts));

    // 4. Metric bounds sweep
    let (bound_results, sweep) = validate_metric_bounds(&opts);
    results.extend(bound_results);

    // 5. Burndown shape
    results.extend(validate_burndown(&opts));

    // 6. Reference scenarios
    results.extend(validate_scenarios(&opts));

    // 7. Reporting
    results.extend(validate_reporting(&opts));

    // 8. Persistence round trips
    results.extend(validate_persistence(&opts));

    if opts.json {
        let state = run_seeded(&opts.config, opts.seed);
        let report = JsonReport {
            config: &opts.config,
            seed: opts.seed,
            result: build_result(&state),
            aggregate: MetricsAggregate::from_runs(&sweep),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => results.push(check("json_report", false, format!("{}", e))),
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(opts: &Options) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = validate_config(&opts.config);
    results.push(check(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            "configuration accepted".into()
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));

    let summary = estimate_summary(&opts.config);
    results.push(check(
        "summary_total_weeks",
        summary.total_weeks == opts.config.sprint_count * opts.config.sprint_duration,
        format!(
            "{} weeks, {:.0} h/sprint, {:?} complexity",
            summary.total_weeks, summary.capacity_hours_per_sprint, summary.complexity
        ),
    ));

    let broken = SimulationConfig {
        team_size: 0,
        sprint_duration: 0,
        ..opts.config.clone()
    };
    let broken_errors = validate_config(&broken);
    results.push(check(
        "config_rejects_empty_team",
        broken_errors.contains(&ConfigError::EmptyTeam)
            && broken_errors.contains(&ConfigError::ZeroSprintDuration),
        format!("{} errors reported", broken_errors.len()),
    ));

    results
}

// ── 2. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(opts: &Options) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let a = run_seeded(&opts.config, opts.seed);
    let b = run_seeded(&opts.config, opts.seed);
    results.push(check(
        "same_seed_same_state",
        a == b,
        format!("{} events, {} impediments", a.events.len(), a.impediment_count()),
    ));

    let events_a = serde_json::to_string(&a.events).unwrap_or_default();
    let events_b = serde_json::to_string(&b.events).unwrap_or_default();
    results.push(check(
        "same_seed_identical_event_log",
        !events_a.is_empty() && events_a == events_b,
        format!("{} bytes of event log", events_a.len()),
    ));

    let c = run_seeded(&opts.config, next_distinct_seed(opts.seed));
    results.push(check(
        "different_seed_diverges",
        a.team.is_empty() || a.team != c.team,
        "team generation depends on the seed".into(),
    ));

    results
}

// ── 3. Planning ─────────────────────────────────────────────────────────

fn validate_planning(opts: &Options) -> Vec<TestResult> {
    println!("--- Planning ---");
    let mut results = Vec::new();

    let mut engine =
        SimulationEngine::with_start_date(opts.config.clone(), Some(opts.seed), start_date());
    let mut over_budget = Vec::new();
    let mut committed = 0;

    for index in 0..engine.state().sprints.len() {
        let budget = engine.state().metrics.average_velocity;
        if let Some(plan) = engine.start_sprint(index) {
            committed += plan.committed_points;
            if plan.committed_points as f64 > budget {
                over_budget.push(format!(
                    "sprint {}: {} > {:.2}",
                    index, plan.committed_points, budget
                ));
            }
        }
        let days = engine.state().sprints[index].duration * WORKING_DAYS_PER_WEEK;
        for day in 0..days {
            engine.execute_day(index, day);
        }
        engine.finish_sprint(index);
    }

    results.push(check(
        "planning_within_velocity",
        over_budget.is_empty(),
        if over_budget.is_empty() {
            format!("{} points committed across all sprints", committed)
        } else {
            over_budget.join(", ")
        },
    ));

    let state = engine.state();
    let mut ids: Vec<&str> = state
        .sprints
        .iter()
        .flat_map(|s| s.stories.iter().map(|i| i.id.as_str()))
        .collect();
    let planned = ids.len();
    ids.sort_unstable();
    ids.dedup();
    results.push(check(
        "items_planned_once",
        ids.len() == planned,
        format!("{} items planned", planned),
    ));

    results
}

// ── 4. Metric bounds ────────────────────────────────────────────────────

fn validate_metric_bounds(
    opts: &Options,
) -> (Vec<TestResult>, Vec<sprintsim_core::components::SimulationMetrics>) {
    println!("--- Metric Bounds ({} runs) ---", opts.runs);
    let mut results = Vec::new();
    let mut sweep = Vec::new();
    let mut violations = Vec::new();

    for offset in 0..opts.runs {
        let seed = opts.seed.wrapping_add(offset);
        let state = run_seeded(&opts.config, seed);
        let m = &state.metrics;

        let scores = [
            ("morale", m.team_morale),
            ("quality", m.quality_score),
            ("satisfaction", m.stakeholder_satisfaction),
        ];
        for (name, value) in scores {
            if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
                violations.push(format!("seed {} {} = {:.3}", seed, name, value));
            }
        }
        if !(0.0..=10.0).contains(&m.technical_debt_score) {
            violations.push(format!("seed {} debt = {:.3}", seed, m.technical_debt_score));
        }
        if !(0.0..=100.0).contains(&m.timeline_accuracy) {
            violations.push(format!("seed {} timeline = {:.3}", seed, m.timeline_accuracy));
        }
        if m.total_stories_completed as usize > state.stories.len() {
            violations.push(format!("seed {} completed more than the backlog", seed));
        }

        sweep.push(state.metrics.clone());
    }

    results.push(check(
        "metrics_within_bounds",
        violations.is_empty(),
        if violations.is_empty() {
            format!("{} runs checked", opts.runs)
        } else {
            violations.join(", ")
        },
    ));

    if let Some(agg) = MetricsAggregate::from_runs(&sweep) {
        results.push(check(
            "aggregate_velocity",
            agg.average_velocity.min <= agg.average_velocity.mean
                && agg.average_velocity.mean <= agg.average_velocity.max,
            format!(
                "velocity {:.2} / {:.2} / {:.2} (min/mean/max)",
                agg.average_velocity.min, agg.average_velocity.mean, agg.average_velocity.max
            ),
        ));
    }

    (results, sweep)
}

// ── 5. Burndown ─────────────────────────────────────────────────────────

fn validate_burndown(opts: &Options) -> Vec<TestResult> {
    println!("--- Burndown ---");
    let mut results = Vec::new();
    let state = run_seeded(&opts.config, opts.seed);

    let bad_counts: Vec<_> = state
        .sprints
        .iter()
        .filter(|s| s.burndown_data.len() as u32 != s.duration * WORKING_DAYS_PER_WEEK)
        .map(|s| s.name.as_str())
        .collect();
    results.push(check(
        "burndown_one_point_per_day",
        bad_counts.is_empty(),
        if bad_counts.is_empty() {
            format!("{} sprints sampled", state.sprints.len())
        } else {
            format!("wrong sample count: {}", bad_counts.join(", "))
        },
    ));

    let rising: Vec<_> = state
        .sprints
        .iter()
        .filter(|s| {
            s.burndown_data
                .windows(2)
                .any(|w| w[1].remaining_points > w[0].remaining_points)
        })
        .map(|s| s.name.as_str())
        .collect();
    results.push(check(
        "burndown_never_rises",
        rising.is_empty(),
        if rising.is_empty() {
            "remaining work never grows mid-sprint".into()
        } else {
            format!("rising burndown: {}", rising.join(", "))
        },
    ));

    results
}

// ── 6. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(_opts: &Options) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    let single = SimulationConfig {
        team_size: 5,
        sprint_count: 1,
        sprint_duration: 1,
        initial_velocity: 20.0,
        story_count: 5,
        technical_debt_level: 0.0,
        team_experience: 3.0,
        ..Default::default()
    };
    let state = run_seeded(&single, 1);
    results.push(check(
        "single_sprint_scenario",
        state.sprints.len() == 1
            && state.sprints[0].burndown_data.len() == 5
            && state.metrics.total_stories_completed <= 5,
        format!(
            "{} stories done, velocity {:.2}",
            state.metrics.total_stories_completed, state.metrics.average_velocity
        ),
    ));

    let empty = SimulationConfig {
        team_size: 0,
        ..single.clone()
    };
    let state = run_seeded(&empty, 1);
    results.push(check(
        "empty_team_scenario",
        state.team.is_empty()
            && state.metrics.total_stories_completed == 0
            && state.metrics.stakeholder_satisfaction.is_finite(),
        format!("capacity {:.1}", state.sprints[0].capacity),
    ));

    // Critical impediment forced on the first day of the first sprint
    let mut engine = SimulationEngine::with_start_date(single, Some(1), start_date());
    engine.start_sprint(0);
    let state = engine.into_state();
    let pending = state.sprints[0].count_with_status(StoryStatus::SprintBacklog);
    let before = state.metrics.average_velocity;

    let mut script = vec![0.99];
    script.extend(std::iter::repeat(0.99).take(pending));
    script.extend([0.0, 0.0, 0.999]);
    let mut engine = SimulationEngine::from_state(state, ScriptedRng::new(script, 1));
    let report = engine.execute_day(0, 0);
    let after = engine.state().metrics.average_velocity;

    results.push(check(
        "critical_impediment_scenario",
        report.and_then(|r| r.impediment) == Some(ImpedimentSeverity::Critical)
            && (after - before * 0.7).abs() < 1e-9,
        format!("velocity {:.2} -> {:.2}", before, after),
    ));

    results
}

// ── 7. Reporting ────────────────────────────────────────────────────────

fn validate_reporting(opts: &Options) -> Vec<TestResult> {
    println!("--- Reporting ---");
    let mut results = Vec::new();
    let state = run_seeded(&opts.config, opts.seed);

    let comparison = velocity_comparison(&state);
    if opts.verbose {
        for record in &comparison {
            println!(
                "    {}: planned {:.1}, delivered {} ({}/{} items)",
                record.sprint,
                record.planned_velocity,
                record.actual_velocity,
                record.completed_stories,
                record.total_stories
            );
        }
    }
    results.push(check(
        "velocity_comparison_per_sprint",
        comparison.len() == state.sprints.len(),
        format!("{} sprints compared", comparison.len()),
    ));

    let distribution = story_status_distribution(&state);
    let counted: usize = distribution.iter().map(|c| c.count).sum();
    results.push(check(
        "status_distribution_covers_backlog",
        counted == state.stories.len(),
        distribution
            .iter()
            .map(|c| format!("{} {}", c.count, c.status.label()))
            .collect::<Vec<_>>()
            .join(", "),
    ));

    let result = build_result(&state);
    let advice = recommendations(&state.metrics);
    results.push(check(
        "recommendations_present",
        !advice.is_empty() && result.recommendations == advice,
        format!(
            "success={}, {} recommendations, {} lessons",
            result.success,
            advice.len(),
            result.lessons.len()
        ),
    ));

    results
}

// ── 8. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(opts: &Options) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();
    let state = run_seeded(&opts.config, opts.seed);

    let mut snapshot = Vec::new();
    let binary = save_state(&mut snapshot, &state, Some(opts.seed))
        .and_then(|_| load_state(&snapshot[..]));
    results.push(match binary {
        Ok(loaded) => check(
            "snapshot_roundtrip",
            loaded.state == state && loaded.seed == Some(opts.seed),
            format!("{} bytes", snapshot.len()),
        ),
        Err(e) => check("snapshot_roundtrip", false, e.to_string()),
    });

    let mut json = Vec::new();
    let text = export_json(&mut json, &state).and_then(|_| import_json(&json[..]));
    results.push(match text {
        Ok(imported) => check(
            "json_roundtrip",
            imported == state,
            format!("{} bytes", json.len()),
        ),
        Err(e) => check("json_roundtrip", false, e.to_string()),
    });

    results
}
