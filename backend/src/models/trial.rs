//! Result of a single trial run

use crate::models::QueueVector;
use serde::Serialize;

/// Outcome of one trial: the sampled queues, both departure times and the
/// improvement balancing achieves.
///
/// Created once per run, handed to the sink and then dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult<'a> {
    pub scenario_name: &'a str,

    /// 1-based run index within the scenario
    pub run_index: u32,

    pub cars: u32,
    pub board_secs: u64,
    pub mean: f64,
    pub stddev: f64,
    pub queue: QueueVector,

    /// Departure time when the train waits for the longest queue
    pub time_without: u64,

    /// Departure time with passengers spread evenly across cars
    pub time_with: u64,

    pub improvement_secs: u64,

    /// Improvement as a percentage of `time_without`, 2 decimal places
    pub improvement_pct: f64,
}
