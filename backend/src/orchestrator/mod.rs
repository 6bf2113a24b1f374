//! Orchestrator - scenario and trial loop
//!
//! See `engine.rs` for the runner and `summary.rs` for the aggregates it
//! returns.

pub mod engine;
pub mod summary;

// Re-export main types for convenience
pub use engine::{run_trial, SimulationConfig, SimulationError, Simulator};
pub use summary::{compute_config_hash, RunSummary, ScenarioSummary};
