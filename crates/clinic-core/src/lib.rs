//! `clinic-core` — foundational types for the clinic discrete-event simulation.
//!
//! This crate is a dependency of every other `clinic-*` crate.  It has no
//! `clinic-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `PatientId`, `RunId`, `StreamId`                          |
//! | [`time`]    | `SimTime` (totally ordered continuous time)               |
//! | [`rng`]     | `RandomStream`, `Exponential`, `derive_seed`              |
//! | [`param`]   | `Param`, `ParamBuilder` (validated, immutable config)     |
//! | [`error`]   | `ConfigError`, `ConfigResult`                             |

pub mod error;
pub mod ids;
pub mod param;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConfigError, ConfigResult};
pub use ids::{PatientId, RunId, StreamId};
pub use param::{Param, ParamBuilder};
pub use rng::{Exponential, RandomStream, derive_seed};
pub use time::SimTime;
