//! Train Boarding Simulator Core - Rust Engine
//!
//! Monte Carlo comparison of train departure times with and without
//! balancing passenger queues across cars.
//!
//! # Architecture
//!
//! - **rng**: Deterministic random number generation
//! - **models**: Domain types (ScenarioConfig, QueueVector, TrialResult)
//! - **arrivals**: Per-car queue length sampling
//! - **boarding**: Departure timing under both policies
//! - **orchestrator**: Scenario/trial loop and run summary
//! - **output**: Streaming sinks for trial rows
//!
//! # Critical Invariants
//!
//! 1. Queue lengths are never negative
//! 2. Balancing never delays departure
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod arrivals;
pub mod boarding;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod rng;

// Re-exports for convenience
pub use arrivals::generate_queue_lengths;
pub use boarding::{time_with_balancing, time_without_balancing, Improvement};
pub use models::{QueueVector, ScenarioConfig, TrialResult};
pub use orchestrator::{
    run_trial, RunSummary, ScenarioSummary, SimulationConfig, SimulationError, Simulator,
};
pub use output::{CsvSink, TrialSink};
pub use rng::RngManager;
