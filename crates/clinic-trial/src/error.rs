use clinic_core::RunId;
use clinic_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("replication {run} failed: {source}")]
    Replication {
        run:    RunId,
        #[source]
        source: ModelError,
    },

    #[error("could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type TrialResult<T> = Result<T, TrialError>;
