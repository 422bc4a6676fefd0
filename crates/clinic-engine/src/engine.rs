//! The `Engine`, its `Scheduler`, and the `Model` extension point.

use clinic_core::SimTime;
use tracing::trace;

use crate::{EngineError, EngineObserver, EngineResult, EventQueue};

// ── Model ─────────────────────────────────────────────────────────────────────

/// User-defined simulation logic.
///
/// `Event` enumerates every continuation of every process in the model: the
/// engine pops one, advances the clock, and hands it back here.  All state
/// changes happen inside `handle`, one event at a time, so no two processes
/// ever observe a half-applied transition.
///
/// # Example
///
/// ```rust
/// use clinic_engine::{Engine, EngineError, Model, NoopObserver, Scheduler};
/// use clinic_core::SimTime;
///
/// struct Ticker { ticks: u32 }
///
/// impl Model for Ticker {
///     type Event = ();
///     type Error = EngineError;
///
///     fn handle(&mut self, _: (), sched: &mut Scheduler<()>) -> Result<(), EngineError> {
///         self.ticks += 1;
///         sched.schedule_in(1.0, ())
///     }
/// }
///
/// let mut engine = Engine::new(Ticker { ticks: 0 });
/// engine.scheduler_mut().schedule_at(SimTime::ZERO, ()).unwrap();
/// engine.run_until(SimTime(5.0), &mut NoopObserver).unwrap();
/// assert_eq!(engine.model().ticks, 5); // t = 0, 1, 2, 3, 4
/// ```
pub trait Model {
    type Event;
    type Error: From<EngineError>;

    /// Resume the process continuation carried by `event` at `sched.now()`.
    fn handle(
        &mut self,
        event: Self::Event,
        sched: &mut Scheduler<Self::Event>,
    ) -> Result<(), Self::Error>;
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The simulation clock plus the pending-event queue.
///
/// Models receive `&mut Scheduler` in [`Model::handle`]; it is the only way to
/// suspend a process until a later time.
pub struct Scheduler<E> {
    now:   SimTime,
    queue: EventQueue<E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now:   SimTime::ZERO,
            queue: EventQueue::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `event` at absolute time `at`.  `at == now` is allowed; the
    /// event fires after every event already queued for this instant.
    pub fn schedule_at(&mut self, at: SimTime, event: E) -> EngineResult<()> {
        if !at.is_finite() {
            return Err(EngineError::NonFiniteTime(at));
        }
        if at < self.now {
            return Err(EngineError::ScheduleInPast { now: self.now, at });
        }
        self.queue.push(at, event);
        Ok(())
    }

    /// Schedule `event` after `delay` time units.
    #[inline]
    pub fn schedule_in(&mut self, delay: f64, event: E) -> EngineResult<()> {
        self.schedule_at(self.now + delay, event)
    }

    /// Number of events still waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Drives a [`Model`] through time.
///
/// Strictly single-threaded: one event is handled to completion before the
/// next is popped.  Replications run in parallel by owning separate engines.
pub struct Engine<M: Model> {
    model:     M,
    sched:     Scheduler<M::Event>,
    processed: u64,
}

impl<M: Model> Engine<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            sched: Scheduler::new(),
            processed: 0,
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.sched.now()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Seed initial events (process start-ups) before running.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler<M::Event> {
        &mut self.sched
    }

    /// Total events handled so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Split borrow for post-run bookkeeping that needs both halves.
    pub fn parts_mut(&mut self) -> (&mut M, &mut Scheduler<M::Event>) {
        (&mut self.model, &mut self.sched)
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Handle the earliest pending event if it fires before `horizon`.
    ///
    /// Returns `Ok(false)` when no such event exists.
    pub fn step<O: EngineObserver>(
        &mut self,
        horizon:  SimTime,
        observer: &mut O,
    ) -> Result<bool, M::Error> {
        let Some((at, event)) = self.sched.queue.pop_before(horizon) else {
            return Ok(false);
        };
        self.sched.now = at;
        trace!(now = at.0, "event");
        self.model.handle(event, &mut self.sched)?;
        self.processed += 1;
        observer.on_event(at);
        Ok(true)
    }

    /// Run every event that fires strictly before `horizon`, then move the
    /// clock to `horizon`.
    ///
    /// Events at or beyond the horizon stay in the queue untouched; the
    /// processes they would have resumed are simply abandoned.
    pub fn run_until<O: EngineObserver>(
        &mut self,
        horizon:  SimTime,
        observer: &mut O,
    ) -> Result<(), M::Error> {
        while self.step(horizon, observer)? {}
        if self.sched.now < horizon {
            self.sched.now = horizon;
        }
        observer.on_horizon(self.sched.now, self.sched.pending());
        Ok(())
    }
}
