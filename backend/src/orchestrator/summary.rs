//! Per-scenario aggregates, folded while trials stream past
//!
//! Rows are never retained: each scenario keeps a handful of running sums.

use crate::models::{ScenarioConfig, TrialResult};
use crate::orchestrator::SimulationError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Aggregate outcome of one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub mean: f64,
    pub stddev: f64,
    pub runs: u32,
    pub mean_time_without: f64,
    pub mean_time_with: f64,
    pub mean_improvement_secs: f64,
    pub mean_improvement_pct: f64,
    pub max_improvement_pct: f64,

    /// Trials where balancing saved nothing
    pub zero_improvement_runs: u32,
}

/// Aggregate outcome of a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// SHA256 of the config that produced this run
    pub config_hash: String,
    pub rng_seed: u64,
    pub cars: u32,
    pub board_secs: u64,
    pub runs_per_scenario: u32,
    pub scenarios: Vec<ScenarioSummary>,
}

impl RunSummary {
    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimulationError::SerializationError(format!("Summary serialization failed: {}", e))
        })
    }
}

/// Running sums for one scenario.
pub(crate) struct ScenarioTally<'a> {
    scenario: &'a ScenarioConfig,
    runs: u32,
    sum_time_without: u128,
    sum_time_with: u128,
    sum_improvement_secs: u128,
    sum_improvement_pct: f64,
    max_improvement_pct: f64,
    zero_improvement_runs: u32,
}

impl<'a> ScenarioTally<'a> {
    pub(crate) fn new(scenario: &'a ScenarioConfig) -> Self {
        Self {
            scenario,
            runs: 0,
            sum_time_without: 0,
            sum_time_with: 0,
            sum_improvement_secs: 0,
            sum_improvement_pct: 0.0,
            max_improvement_pct: 0.0,
            zero_improvement_runs: 0,
        }
    }

    pub(crate) fn record(&mut self, trial: &TrialResult<'_>) {
        self.runs += 1;
        self.sum_time_without += u128::from(trial.time_without);
        self.sum_time_with += u128::from(trial.time_with);
        self.sum_improvement_secs += u128::from(trial.improvement_secs);
        self.sum_improvement_pct += trial.improvement_pct;
        self.max_improvement_pct = self.max_improvement_pct.max(trial.improvement_pct);
        if trial.improvement_secs == 0 {
            self.zero_improvement_runs += 1;
        }
    }

    pub(crate) fn finish(self) -> ScenarioSummary {
        let n = f64::from(self.runs.max(1));
        ScenarioSummary {
            name: self.scenario.name.clone(),
            mean: self.scenario.mean,
            stddev: self.scenario.stddev,
            runs: self.runs,
            mean_time_without: self.sum_time_without as f64 / n,
            mean_time_with: self.sum_time_with as f64 / n,
            mean_improvement_secs: self.sum_improvement_secs as f64 / n,
            mean_improvement_pct: self.sum_improvement_pct / n,
            max_improvement_pct: self.max_improvement_pct,
            zero_improvement_runs: self.zero_improvement_runs,
        }
    }
}

/// Compute a deterministic SHA256 hash of a config.
///
/// Lets two summaries be checked for having come from the same inputs.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let json = serde_json::to_string(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueueVector;

    fn trial<'a>(scenario: &'a ScenarioConfig, without: u64, with: u64, pct: f64) -> TrialResult<'a> {
        TrialResult {
            scenario_name: &scenario.name,
            run_index: 1,
            cars: 2,
            board_secs: 10,
            mean: scenario.mean,
            stddev: scenario.stddev,
            queue: QueueVector::new(vec![0, 0]),
            time_without: without,
            time_with: with,
            improvement_secs: without - with,
            improvement_pct: pct,
        }
    }

    #[test]
    fn test_tally_averages() {
        let scenario = ScenarioConfig::midday();
        let mut tally = ScenarioTally::new(&scenario);
        tally.record(&trial(&scenario, 80, 50, 37.5));
        tally.record(&trial(&scenario, 40, 40, 0.0));

        let summary = tally.finish();
        assert_eq!(summary.name, "Midday");
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.mean_time_without, 60.0);
        assert_eq!(summary.mean_time_with, 45.0);
        assert_eq!(summary.mean_improvement_secs, 15.0);
        assert_eq!(summary.mean_improvement_pct, 18.75);
        assert_eq!(summary.max_improvement_pct, 37.5);
        assert_eq!(summary.zero_improvement_runs, 1);
    }

    #[test]
    fn test_empty_tally_is_zeroed() {
        let scenario = ScenarioConfig::midday();
        let summary = ScenarioTally::new(&scenario).finish();
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.mean_improvement_pct, 0.0);
    }

    #[test]
    fn test_config_hash_stable_and_sensitive() {
        let a = ScenarioConfig::morning_rush();
        let b = ScenarioConfig::evening_peak();

        let hash_a = compute_config_hash(&a).unwrap();
        assert_eq!(hash_a, compute_config_hash(&a.clone()).unwrap());
        assert_ne!(hash_a, compute_config_hash(&b).unwrap());
        assert_eq!(hash_a.len(), 64);
    }
}
