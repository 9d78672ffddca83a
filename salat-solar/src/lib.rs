//! Solar astronomy for the salat workspace.
//!
//! Three layers, all pure and total:
//!
//! - [`julian`] — Julian Date conversions from civil dates and epoch
//!   milliseconds;
//! - [`position`] — the Meeus solar series producing declination, right
//!   ascension, equation of time, and apparent sidereal time per Julian Date;
//! - [`hour_angle`] — the chapter 15 machinery: approximate and corrected
//!   transit, corrected hour angle with the epsilon-clamp policy, and the
//!   shadow-factor afternoon altitude.
//!
//! Everything works in degrees and day fractions; mapping to epoch
//! milliseconds is left to the engine crate.

pub mod hour_angle;
pub mod interpolation;
pub mod julian;
pub mod position;

pub use hour_angle::{
    corrected_hour_angle, corrected_transit, DayInterpolants, HourAngleOutcome, ObserverTrig,
    COS_EPSILON,
};
pub use position::SolarPosition;
