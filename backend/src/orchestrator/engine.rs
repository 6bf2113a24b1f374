//! Trial runner - main simulation loop
//!
//! For every scenario, in listed order, runs a fixed number of independent
//! trials. Each trial samples a queue vector, times departure under both
//! boarding policies and streams the comparison to a [`TrialSink`].
//!
//! # Determinism
//!
//! One [`RngManager`] is seeded when the [`Simulator`] is built and is the
//! only source of randomness. Trials run sequentially in (scenario, run)
//! order, so the draw order, and therefore the output, is fixed by the seed.
//!
//! # Example
//!
//! ```
//! use train_boarding_sim_core::{CsvSink, SimulationConfig, Simulator};
//!
//! let config = SimulationConfig {
//!     runs: 3,
//!     ..SimulationConfig::default()
//! };
//! let mut simulator = Simulator::new(config).unwrap();
//! let mut sink = CsvSink::new(Vec::new());
//! let summary = simulator.run(&mut sink).unwrap();
//!
//! assert_eq!(summary.scenarios.len(), 3);
//! assert_eq!(sink.rows_written(), 9);
//! ```

use crate::arrivals::generate_queue_lengths;
use crate::boarding::{time_with_balancing, time_without_balancing, Improvement};
use crate::models::{ScenarioConfig, TrialResult};
use crate::orchestrator::summary::{compute_config_hash, RunSummary, ScenarioTally};
use crate::output::TrialSink;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

// ============================================================================
// Configuration
// ============================================================================

/// Complete simulation configuration
///
/// # Fields
///
/// * `cars` - Number of cars in the train
/// * `board_secs` - Seconds needed to board one passenger
/// * `runs` - Trials per scenario
/// * `rng_seed` - Seed for the single shared RNG
/// * `scenarios` - Traffic scenarios, processed in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub cars: u32,
    pub board_secs: u64,
    pub runs: u32,
    pub rng_seed: u64,
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cars: 6,
            board_secs: 10,
            runs: 500,
            rng_seed: 42,
            scenarios: ScenarioConfig::default_day(),
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidConfig(format!("Malformed config JSON: {}", e)))
    }

    /// Reject configs that would produce degenerate output.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.cars == 0 {
            return Err(SimulationError::InvalidConfig(
                "cars must be > 0".to_string(),
            ));
        }

        if self.board_secs == 0 {
            return Err(SimulationError::InvalidConfig(
                "board_secs must be > 0".to_string(),
            ));
        }

        if self.runs == 0 {
            return Err(SimulationError::InvalidConfig(
                "runs must be > 0".to_string(),
            ));
        }

        if self.scenarios.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "Must have at least one scenario".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            if scenario.name.trim().is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "Scenario name must not be empty".to_string(),
                ));
            }

            if !names.insert(scenario.name.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate scenario name: {}",
                    scenario.name
                )));
            }

            if !scenario.mean.is_finite() {
                return Err(SimulationError::InvalidConfig(format!(
                    "Scenario {}: mean must be finite, got {}",
                    scenario.name, scenario.mean
                )));
            }

            if !scenario.stddev.is_finite() || scenario.stddev < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "Scenario {}: stddev must be finite and >= 0, got {}",
                    scenario.name, scenario.stddev
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Output sink could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Summary or config could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Simulator
// ============================================================================

/// Runs every scenario and streams trial results.
pub struct Simulator {
    config: SimulationConfig,
    rng: RngManager,
}

impl Simulator {
    /// Validate `config` and seed the RNG.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let rng = RngManager::new(config.rng_seed);

        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current RNG state
    pub fn rng_state(&self) -> u64 {
        self.rng.get_state()
    }

    /// Run all scenarios, writing a header and one row per trial to `sink`.
    ///
    /// Rows come out in scenario order, then ascending run index. The RNG
    /// stream is not reset, so a second call continues where the first
    /// stopped; build a fresh `Simulator` to reproduce a run.
    ///
    /// Any sink error aborts the run and is returned as-is.
    pub fn run<S: TrialSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<RunSummary, SimulationError> {
        let config_hash = compute_config_hash(&self.config)?;
        let total_trials = self.config.scenarios.len() as u64 * u64::from(self.config.runs);

        info!(
            seed = self.config.rng_seed,
            cars = self.config.cars,
            board_secs = self.config.board_secs,
            scenarios = self.config.scenarios.len(),
            total_trials,
            "Starting boarding simulation"
        );

        sink.write_header()?;

        let mut scenario_summaries = Vec::with_capacity(self.config.scenarios.len());
        for scenario in &self.config.scenarios {
            let mut tally = ScenarioTally::new(scenario);

            for run_index in 1..=self.config.runs {
                let trial = run_trial(
                    scenario,
                    run_index,
                    self.config.cars,
                    self.config.board_secs,
                    &mut self.rng,
                );

                debug!(
                    scenario = trial.scenario_name,
                    run = trial.run_index,
                    queue = %trial.queue,
                    time_without = trial.time_without,
                    time_with = trial.time_with,
                    "Trial complete"
                );

                tally.record(&trial);
                sink.write_trial(&trial)?;
            }

            let summary = tally.finish();
            info!(
                scenario = %summary.name,
                runs = summary.runs,
                mean_improvement_secs = summary.mean_improvement_secs,
                mean_improvement_pct = summary.mean_improvement_pct,
                "Scenario complete"
            );
            scenario_summaries.push(summary);
        }

        sink.finish()?;

        info!(total_trials, "Simulation complete");

        Ok(RunSummary {
            config_hash,
            rng_seed: self.config.rng_seed,
            cars: self.config.cars,
            board_secs: self.config.board_secs,
            runs_per_scenario: self.config.runs,
            scenarios: scenario_summaries,
        })
    }
}

/// Execute one trial: sample queues, time both policies, compare.
///
/// # Arguments
///
/// * `scenario` - Scenario supplying the queue-length distribution
/// * `run_index` - 1-based index of this trial within the scenario
/// * `cars` - Number of cars
/// * `board_secs` - Seconds per boarding passenger
/// * `rng` - Shared generator
pub fn run_trial<'a>(
    scenario: &'a ScenarioConfig,
    run_index: u32,
    cars: u32,
    board_secs: u64,
    rng: &mut RngManager,
) -> TrialResult<'a> {
    let queue = generate_queue_lengths(cars, scenario.mean, scenario.stddev, rng);

    let time_without = time_without_balancing(&queue, board_secs);
    let time_with = time_with_balancing(&queue, cars, board_secs);
    let improvement = Improvement::between(time_without, time_with);

    TrialResult {
        scenario_name: &scenario.name,
        run_index,
        cars,
        board_secs,
        mean: scenario.mean,
        stddev: scenario.stddev,
        queue,
        time_without,
        time_with,
        improvement_secs: improvement.secs,
        improvement_pct: improvement.pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_trial_with_fixed_queues() {
        // Zero stddev pins every car to the rounded mean
        let scenario = ScenarioConfig::new("Flat", 5.0, 0.0);
        let mut rng = RngManager::new(1);

        let trial = run_trial(&scenario, 3, 4, 10, &mut rng);

        assert_eq!(trial.scenario_name, "Flat");
        assert_eq!(trial.run_index, 3);
        assert_eq!(trial.queue.as_slice(), &[5, 5, 5, 5]);
        assert_eq!(trial.time_without, 50);
        assert_eq!(trial.time_with, 50);
        assert_eq!(trial.improvement_secs, 0);
        assert_eq!(trial.improvement_pct, 0.0);
    }

    #[test]
    fn test_run_trial_advances_rng() {
        let scenario = ScenarioConfig::morning_rush();
        let mut rng = RngManager::new(42);
        let before = rng.get_state();

        run_trial(&scenario, 1, 6, 10, &mut rng);

        assert_ne!(rng.get_state(), before);
    }

    #[test]
    fn test_simulator_exposes_seeded_state() {
        let simulator = Simulator::new(SimulationConfig::default()).unwrap();
        assert_eq!(simulator.rng_state(), 42);
        assert_eq!(simulator.config().cars, 6);
    }
}
