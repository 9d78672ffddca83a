//! Shared error types for the salat workspace.
//!
//! Validation happens once, at the boundary where a caller constructs
//! coordinates or a configuration. The compute path itself is total and
//! reports per-event outcomes through its result types, never through errors.

use thiserror::Error;

/// Validation errors raised while constructing core value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// An input coordinate or scalar is outside its documented range.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use salat_core::CoreError;
    /// let err = CoreError::out_of_range("latitude", 95.0, "[-90, 90]");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "latitude 95 outside valid range [-90, 90]"
    /// );
    /// ```
    #[error("{name} {value} outside valid range {range}")]
    OutOfRange {
        /// Name of the offending input
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Human-readable description of the accepted range
        range: &'static str,
    },

    /// An input that must be finite was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NotFinite {
        /// Name of the offending input
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Result type alias for core validation.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an out-of-range error.
    pub fn out_of_range(name: &'static str, value: f64, range: &'static str) -> Self {
        Self::OutOfRange { name, value, range }
    }

    /// Create a non-finite-input error.
    pub fn not_finite(name: &'static str, value: f64) -> Self {
        Self::NotFinite { name, value }
    }
}
