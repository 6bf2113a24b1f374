//! Comma-separated output
//!
//! One header row, then one row per trial. Rows end in `\r\n`. Fields that
//! contain a comma, a quote or a line break are quoted, with inner quotes
//! doubled.

use crate::models::TrialResult;
use crate::orchestrator::SimulationError;
use crate::output::TrialSink;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 11] = [
    "day_scenario",
    "run_idx",
    "cars",
    "board_sec",
    "mu",
    "sigma",
    "q_lengths",
    "T_without",
    "T_with",
    "improve_sec",
    "improve_pct",
];

const ROW_TERMINATOR: &str = "\r\n";

/// Writes trials as CSV rows to any [`Write`] destination.
///
/// # Example
/// ```
/// use train_boarding_sim_core::output::{CsvSink, TrialSink};
///
/// let mut sink = CsvSink::new(Vec::new());
/// sink.write_header().unwrap();
/// let bytes = sink.into_inner().unwrap();
/// assert!(bytes.starts_with(b"day_scenario,run_idx"));
/// ```
pub struct CsvSink<W: Write> {
    writer: BufWriter<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path`.
    ///
    /// The handle is closed when the sink is dropped, including on error paths.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            rows_written: 0,
        }
    }

    /// Number of data rows written so far (header excluded)
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, SimulationError> {
        self.writer
            .into_inner()
            .map_err(|e| SimulationError::Io(e.into_error()))
    }

    fn write_record<'a>(
        &mut self,
        fields: impl IntoIterator<Item = Cow<'a, str>>,
    ) -> Result<(), SimulationError> {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(escape_field(&field).as_bytes())?;
        }
        self.writer.write_all(ROW_TERMINATOR.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> TrialSink for CsvSink<W> {
    fn write_header(&mut self) -> Result<(), SimulationError> {
        self.write_record(CSV_HEADER.iter().map(|h| Cow::Borrowed(*h)))
    }

    fn write_trial(&mut self, trial: &TrialResult<'_>) -> Result<(), SimulationError> {
        self.write_record([
            Cow::Borrowed(trial.scenario_name),
            Cow::Owned(trial.run_index.to_string()),
            Cow::Owned(trial.cars.to_string()),
            Cow::Owned(trial.board_secs.to_string()),
            Cow::Owned(trial.mean.to_string()),
            Cow::Owned(trial.stddev.to_string()),
            Cow::Owned(trial.queue.to_string()),
            Cow::Owned(trial.time_without.to_string()),
            Cow::Owned(trial.time_with.to_string()),
            Cow::Owned(trial.improvement_secs.to_string()),
            Cow::Owned(trial.improvement_pct.to_string()),
        ])?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SimulationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Quote a field if it would otherwise break the row structure.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
