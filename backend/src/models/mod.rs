//! Domain models for the boarding simulator

pub mod queue;
pub mod scenario;
pub mod trial;

// Re-exports
pub use queue::QueueVector;
pub use scenario::ScenarioConfig;
pub use trial::TrialResult;
