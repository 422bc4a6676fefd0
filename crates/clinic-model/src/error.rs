use clinic_core::{ConfigError, PatientId};
use clinic_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("event refers to unknown patient {0}")]
    UnknownPatient(PatientId),
}

pub type ModelResult<T> = Result<T, ModelError>;
