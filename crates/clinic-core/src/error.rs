//! Configuration error type.
//!
//! Every parameter rule violation names the offending parameter and the rule,
//! so callers can surface the message unchanged.

use thiserror::Error;

/// Errors raised while building or loading a [`Param`][crate::Param].
///
/// These are fatal: the caller must fix the configuration, not retry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parameter \"{0}\" must be greater than 0.")]
    NotPositive(&'static str),

    #[error("Parameter \"{0}\" must be greater than or equal to 0.")]
    Negative(&'static str),

    #[error("Parameter \"{0}\" must be finite.")]
    NotFinite(&'static str),

    #[error("invalid distribution: {0}")]
    Distribution(String),

    #[error("configuration parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
