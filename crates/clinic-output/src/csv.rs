//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `patient.csv`
//! - `interval.csv`
//! - `run.csv`
//! - `overall.csv`

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use clinic_model::{IntervalAuditRow, PatientRow, RunSummary};
use clinic_trial::OverallRow;

use crate::OutputResult;
use crate::writer::OutputWriter;

const PATIENT_HEADER: [&str; 6] =
    ["patient_id", "run", "arrival_time", "q_time_nurse", "time_with_nurse", "outcome"];

const INTERVAL_HEADER: [&str; 7] = [
    "run",
    "simulation_time",
    "number_utilised",
    "number_available",
    "queue_length",
    "utilisation",
    "running_mean_wait_time",
];

const RUN_HEADER: [&str; 11] = [
    "run_number",
    "scenario",
    "arrivals",
    "mean_q_time_nurse",
    "mean_time_with_nurse",
    "nurse_busy_time",
    "mean_nurse_utilisation",
    "mean_nurse_utilisation_tw",
    "mean_nurse_q_length",
    "count_unseen",
    "mean_q_time_unseen",
];

const OVERALL_HEADER: [&str; 8] =
    ["metric", "count", "mean", "std_dev", "lower_95_ci", "upper_95_ci", "min", "max"];

/// Writes trial output to four CSV files.
pub struct CsvWriter {
    patients:  Writer<File>,
    intervals: Writer<File>,
    runs:      Writer<File>,
    overall:   Writer<File>,
    finished:  bool,
}

/// Open `path` and write the header row.  Headers are written up front so
/// empty tables still produce a well-formed file.
fn open(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(header)?;
    Ok(w)
}

fn write_rows<T: Serialize>(w: &mut Writer<File>, rows: &[T]) -> OutputResult<()> {
    for row in rows {
        w.serialize(row)?;
    }
    Ok(())
}

impl CsvWriter {
    /// Create `dir` if needed, then open (or truncate) the four CSV files and
    /// write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            patients:  open(&dir.join("patient.csv"), &PATIENT_HEADER)?,
            intervals: open(&dir.join("interval.csv"), &INTERVAL_HEADER)?,
            runs:      open(&dir.join("run.csv"), &RUN_HEADER)?,
            overall:   open(&dir.join("overall.csv"), &OVERALL_HEADER)?,
            finished:  false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_patients(&mut self, rows: &[PatientRow]) -> OutputResult<()> {
        write_rows(&mut self.patients, rows)
    }

    fn write_intervals(&mut self, rows: &[IntervalAuditRow]) -> OutputResult<()> {
        write_rows(&mut self.intervals, rows)
    }

    fn write_runs(&mut self, rows: &[RunSummary]) -> OutputResult<()> {
        write_rows(&mut self.runs, rows)
    }

    fn write_overall(&mut self, rows: &[OverallRow]) -> OutputResult<()> {
        write_rows(&mut self.overall, rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.patients.flush()?;
        self.intervals.flush()?;
        self.runs.flush()?;
        self.overall.flush()?;
        Ok(())
    }
}
