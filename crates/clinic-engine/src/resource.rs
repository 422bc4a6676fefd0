//! `MonitoredResource` — capacity-limited FIFO server with exact
//! time-weighted occupancy accounting.
//!
//! # Accounting rule
//!
//! The resource keeps two running integrals:
//!
//! ```text
//! area_busy  = ∫ in_use(t)       dt
//! area_queue = ∫ queue_length(t) dt
//! ```
//!
//! Both are piecewise-constant between state changes, so every call that
//! changes `in_use` or the queue first adds `state × (now − last_update)`
//! using the state that held over that interval, then applies the change.
//! The stretch between the last change and the end of the run is never seen
//! by a state change, so [`flush_tail`][MonitoredResource::flush_tail] must be
//! called once at the horizon.
//!
//! Integrals only cover time at or after `window_start` (the end of warm-up),
//! so time-weighted statistics describe the data-collection window alone.

use std::collections::VecDeque;

use clinic_core::SimTime;

use crate::{EngineError, EngineResult};

/// Outcome of [`MonitoredResource::request`].
#[derive(Debug, PartialEq, Eq)]
pub enum Request<T> {
    /// A unit was free; the token is handed straight back to the caller.
    Granted(T),
    /// All units busy; the token waits in the FIFO queue.
    Queued,
}

/// A capacity-`c` resource whose waiting requests are served strictly in
/// arrival order.
///
/// `T` is the token identifying the suspended process (e.g. a `PatientId`).
/// The resource hands tokens back on grant so the caller can schedule the
/// process continuation; it never touches the event queue itself.
#[derive(Debug)]
pub struct MonitoredResource<T> {
    capacity:     usize,
    in_use:       usize,
    queue:        VecDeque<T>,
    last_update:  SimTime,
    window_start: SimTime,
    area_busy:    f64,
    area_queue:   f64,
}

impl<T> MonitoredResource<T> {
    /// A resource whose statistics window starts at time zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_window_start(capacity, SimTime::ZERO)
    }

    /// A resource that only integrates time at or after `window_start`.
    pub fn with_window_start(capacity: usize, window_start: SimTime) -> Self {
        Self {
            capacity,
            in_use: 0,
            queue: VecDeque::new(),
            last_update: SimTime::ZERO,
            window_start,
            area_busy: 0.0,
            area_queue: 0.0,
        }
    }

    /// Ask for one unit at `now`.
    pub fn request(&mut self, now: SimTime, token: T) -> Request<T> {
        self.accumulate(now);
        if self.in_use < self.capacity {
            self.in_use += 1;
            Request::Granted(token)
        } else {
            self.queue.push_back(token);
            Request::Queued
        }
    }

    /// Return one unit at `now`.
    ///
    /// If a request is waiting, the freed unit passes directly to the
    /// longest-waiting one and its token is returned; `in_use` is unchanged
    /// in that case.
    pub fn release(&mut self, now: SimTime) -> EngineResult<Option<T>> {
        if self.in_use == 0 {
            return Err(EngineError::ReleaseIdle);
        }
        self.accumulate(now);
        match self.queue.pop_front() {
            Some(next) => Ok(Some(next)),
            None => {
                self.in_use -= 1;
                Ok(None)
            }
        }
    }

    /// Integrate the interval since the last state change using the current
    /// state.  Must be called once at the end of a run.
    pub fn flush_tail(&mut self, now: SimTime) {
        self.accumulate(now);
    }

    fn accumulate(&mut self, now: SimTime) {
        debug_assert!(now >= self.last_update, "resource clock moved backwards");
        let from = self.last_update.max(self.window_start);
        if now > from {
            let elapsed = now - from;
            self.area_busy += self.in_use as f64 * elapsed;
            self.area_queue += self.queue.len() as f64 * elapsed;
        }
        self.last_update = self.last_update.max(now);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn last_update(&self) -> SimTime {
        self.last_update
    }

    #[inline]
    pub fn window_start(&self) -> SimTime {
        self.window_start
    }

    /// ∫ busy units dt over the window so far.
    #[inline]
    pub fn area_busy(&self) -> f64 {
        self.area_busy
    }

    /// ∫ queue length dt over the window so far.
    #[inline]
    pub fn area_queue(&self) -> f64 {
        self.area_queue
    }

    /// `in_use / capacity` right now.
    pub fn instantaneous_utilisation(&self) -> f64 {
        self.in_use as f64 / self.capacity as f64
    }

    /// Time-weighted utilisation over `elapsed` time units of window.
    pub fn utilisation(&self, elapsed: f64) -> f64 {
        self.area_busy / (self.capacity as f64 * elapsed)
    }

    /// Time-weighted mean queue length over `elapsed` time units of window.
    pub fn mean_queue_length(&self, elapsed: f64) -> f64 {
        self.area_queue / elapsed
    }
}
