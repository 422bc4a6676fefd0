//! `clinic-model` — the clinic process logic and single-replication runner.
//!
//! # Processes
//!
//! ```text
//! arrival generator   sample gap → wait → new Patient → request nurse → repeat
//! patient journey     Arrived → Queued → InService → Departed
//!                     (abandoned at the horizon while Queued / InService)
//! interval auditor    every audit_interval: snapshot nurse counts
//! ```
//!
//! Each suspension point is a [`ClinicEvent`] variant handled by
//! [`ClinicModel`] under `clinic_engine::Engine`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`patient`] | `Patient`, `PatientStage`                                |
//! | [`clinic`]  | `ClinicModel`, `ClinicEvent`                             |
//! | [`runner`]  | `Runner` — one replication end to end                    |
//! | [`row`]     | `PatientRow`, `IntervalAuditRow`, `RunSummary`, `RunResults` |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                           |

pub mod clinic;
pub mod error;
pub mod patient;
pub mod row;
pub mod runner;

#[cfg(test)]
mod tests;

pub use clinic::{ClinicEvent, ClinicModel};
pub use error::{ModelError, ModelResult};
pub use patient::{Patient, PatientStage};
pub use row::{IntervalAuditRow, PatientRow, RunResults, RunSummary};
pub use runner::Runner;
