//! Configuration validation errors.

use salat_core::CoreError;
use thiserror::Error;

/// Errors raised while building a [`Configuration`](crate::Configuration).
///
/// These are the only failures the crate produces: once a configuration
/// exists, every compute call is total and reports per-event outcomes
/// through [`PrayerTime`](crate::PrayerTime).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Coordinate validation failed.
    #[error(transparent)]
    Coordinates(#[from] CoreError),

    /// Elevation must be finite and non-negative meters.
    #[error("elevation {0} must be finite and >= 0 meters")]
    InvalidElevation(f64),

    /// The date must be finite epoch milliseconds.
    #[error("date {0} must be finite epoch milliseconds")]
    InvalidDate(f64),
}

/// Result alias for configuration construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
