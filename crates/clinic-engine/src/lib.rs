//! `clinic-engine` — discrete-event scheduling and resource monitoring.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event_queue`] | `EventQueue` (min-heap keyed by time, then sequence)  |
//! | [`engine`]      | `Model` trait, `Scheduler`, `Engine`                  |
//! | [`observer`]    | `EngineObserver` trait, `NoopObserver`                |
//! | [`resource`]    | `MonitoredResource`, `Request`                        |
//! | [`error`]       | `EngineError`, `EngineResult<T>`                      |
//!
//! # Process model
//!
//! There are no coroutines.  A process is an explicit state machine owned by
//! the [`Model`]; each of its suspension points is an event variant.  Waiting
//! for a timeout means scheduling the continuation at `now + delay`; waiting
//! for a resource means parking a token in the resource's FIFO queue, which
//! `release` hands back so the model can schedule the continuation at `now`.
//!
//! ```text
//! loop:
//!   pop earliest (time, seq) event with time < horizon
//!   clock ← event time
//!   model.handle(event, scheduler)   // may schedule more events
//! clock ← horizon                    // remaining events are abandoned
//! ```

pub mod engine;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod resource;


pub use engine::{Engine, Model, Scheduler};
pub use error::{EngineError, EngineResult};
pub use event_queue::EventQueue;
pub use observer::{EngineObserver, NoopObserver};
pub use resource::{MonitoredResource, Request};
