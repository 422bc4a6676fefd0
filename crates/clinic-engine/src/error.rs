use clinic_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot schedule an event at {at}: clock is already at {now}")]
    ScheduleInPast { now: SimTime, at: SimTime },

    #[error("cannot schedule an event at non-finite time {0}")]
    NonFiniteTime(SimTime),

    #[error("release called on a resource with no units in use")]
    ReleaseIdle,
}

pub type EngineResult<T> = Result<T, EngineError>;
