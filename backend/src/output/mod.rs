//! Output sinks for trial results
//!
//! The simulator streams every [`TrialResult`] to a [`TrialSink`] as soon as
//! it is produced; nothing is buffered beyond what the sink itself does.

mod csv;

pub use csv::{CsvSink, CSV_HEADER};

use crate::models::TrialResult;
use crate::orchestrator::SimulationError;

/// Destination for trial rows.
///
/// Call order is `write_header` once, `write_trial` per trial, then `finish`.
pub trait TrialSink {
    /// Write the column header row
    fn write_header(&mut self) -> Result<(), SimulationError>;

    /// Write one trial row
    fn write_trial(&mut self, trial: &TrialResult<'_>) -> Result<(), SimulationError>;

    /// Flush any buffered rows to the underlying destination
    fn finish(&mut self) -> Result<(), SimulationError>;
}
