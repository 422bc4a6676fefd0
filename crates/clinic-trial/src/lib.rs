//! `clinic-trial` — runs N independent replications and aggregates them.
//!
//! # Execution
//!
//! ```text
//! cores = Some(1)  → replications run in order on the calling thread
//! cores = Some(n)  → a dedicated n-thread Rayon pool
//! cores = None     → a Rayon pool sized to all logical cores
//! ```
//!
//! Each replication is a pure function of `(param, run index)`, so the mode
//! never changes results.  Outputs are sorted by run index before merging.
//!
//! # Tables
//!
//! | Field            | Rows                                              |
//! |------------------|---------------------------------------------------|
//! | `patients`       | every replication's patient rows, tagged by run   |
//! | `interval_audit` | every replication's audit rows, tagged by run     |
//! | `runs`           | one `RunSummary` per replication                  |
//! | `overall`        | one `OverallRow` per run-level metric             |

pub mod error;
pub mod summary;
pub mod trial;


pub use error::{TrialError, TrialResult};
pub use summary::{OverallRow, summarise_runs};
pub use trial::{Trial, TrialResults};
