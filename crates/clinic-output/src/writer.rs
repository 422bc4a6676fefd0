//! The `OutputWriter` trait implemented by table backends.

use clinic_model::{IntervalAuditRow, PatientRow, RunSummary};
use clinic_trial::{OverallRow, TrialResults};

use crate::OutputResult;

/// Sink for the four result tables of a trial.
pub trait OutputWriter {
    fn write_patients(&mut self, rows: &[PatientRow]) -> OutputResult<()>;

    fn write_intervals(&mut self, rows: &[IntervalAuditRow]) -> OutputResult<()>;

    fn write_runs(&mut self, rows: &[RunSummary]) -> OutputResult<()>;

    fn write_overall(&mut self, rows: &[OverallRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every table of `results` and finish the writer.
pub fn write_trial<W: OutputWriter>(writer: &mut W, results: &TrialResults) -> OutputResult<()> {
    writer.write_patients(&results.patients)?;
    writer.write_intervals(&results.interval_audit)?;
    writer.write_runs(&results.runs)?;
    writer.write_overall(&results.overall)?;
    writer.finish()
}
