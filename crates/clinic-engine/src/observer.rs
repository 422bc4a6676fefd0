//! Engine observer trait for progress reporting and diagnostics.

use clinic_core::SimTime;

/// Callbacks invoked by [`Engine::run_until`][crate::Engine::run_until].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait EngineObserver {
    /// Called after each event has been handled.
    fn on_event(&mut self, _now: SimTime) {}

    /// Called once the clock reaches the horizon.  `pending` counts events
    /// left unprocessed (abandoned processes).
    fn on_horizon(&mut self, _now: SimTime, _pending: usize) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
