//! Unified error type for the gearbox firmware.
//!
//! Each subsystem keeps its own small `Copy` error enum; this module folds
//! them into one [`Error`] so bootstrap code can use `?` across all of them.
//! Inside the polling loop nothing is fatal: validation failures fall back
//! to defaults and storage failures are logged.

use core::fmt;

use crate::app::model::ValidationError;
use crate::app::ports::StorageError;
use crate::config::ConfigError;

/// Every fallible bootstrap operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A raw value was outside its domain.
    Validation(ValidationError),
    /// Durable storage failed.
    Storage(StorageError),
    /// Timing configuration rejected.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
