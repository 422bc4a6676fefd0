//! `clinic-output` — result table writers for the clinic simulation.
//!
//! | Table            | File           | Row type            |
//! |------------------|----------------|---------------------|
//! | patient-level    | `patient.csv`  | `PatientRow`        |
//! | interval audit   | `interval.csv` | `IntervalAuditRow`  |
//! | run-level        | `run.csv`      | `RunSummary`        |
//! | overall          | `overall.csv`  | `OverallRow`        |
//!
//! Unknown values are written as `NaN`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clinic_output::{CsvWriter, write_trial};
//!
//! let results = Trial::new(param).run_reps()?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! write_trial(&mut writer, &results)?;
//! ```

pub mod csv;
pub mod error;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use writer::{OutputWriter, write_trial};
