//! Output backing store for one compute call.
//!
//! The kernel fills a fixed-layout struct-of-arrays and returns it by value;
//! the public view projects its lanes into tagged results on access. Six
//! event lanes are indexed by the constants below; the raw sunset is kept
//! outside the event lanes because it anchors the night-division times and
//! the high-latitude rules, and must not move with the maghrib adjustment.

use crate::outputs::Fallback;

/// Event lane indices.
pub(crate) mod lane {
    pub(crate) const FAJR: usize = 0;
    pub(crate) const SUNRISE: usize = 1;
    pub(crate) const DHUHR: usize = 2;
    pub(crate) const ASR: usize = 3;
    pub(crate) const MAGHRIB: usize = 4;
    pub(crate) const ISHA: usize = 5;
}

/// Undefined-event bits. Sunrise and sunset stem from the same hour-angle
/// evaluation but carry distinct bits; polar day/night sets both. Maghrib
/// shares the sunset bit. Dhuhr is always defined and has no bit.
pub(crate) mod undefined {
    pub(crate) const FAJR: u8 = 1;
    pub(crate) const SUNRISE: u8 = 2;
    pub(crate) const ASR: u8 = 4;
    pub(crate) const SUNSET: u8 = 8;
    pub(crate) const ISHA: u8 = 16;
}

/// Dense per-day output record.
///
/// Unset time lanes and not-applicable diagnostic lanes hold NaN; the
/// undefined bitmask, not the NaN, is the source of truth for whether an
/// event exists.
///
/// Equality is bitwise on the float lanes, so two slabs compare equal
/// exactly when the determinism contract says they should — including their
/// NaN sentinels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DaySlab {
    /// Event times, epoch ms, adjustment applied
    pub(crate) times_ms: [f64; 6],
    /// Raw cos of the hour angle per event; NaN when not applicable
    pub(crate) cos_hour_angle: [f64; 6],
    /// Whether the cos value was snapped from the noise band
    pub(crate) clamped: [bool; 6],
    /// Fallback that produced the lane's time, if any
    pub(crate) fallback: [Fallback; 6],
    /// Target altitude per event, degrees; NaN when not applicable
    pub(crate) target_altitude: [f64; 6],
    /// Solar declination for the day, degrees
    pub(crate) declination: f64,
    /// Equation of time, minutes
    pub(crate) equation_of_time: f64,
    /// Corrected transit, epoch ms, before the dhuhr adjustment
    pub(crate) solar_noon_ms: f64,
    /// Julian Date of the day
    pub(crate) julian_date: f64,
    /// Astronomical sunset, epoch ms, before the maghrib adjustment.
    /// Anchor for the night-division times and the high-latitude rules.
    pub(crate) sunset_raw_ms: f64,
}

impl PartialEq for DaySlab {
    fn eq(&self, other: &Self) -> bool {
        fn lanes_eq(a: &[f64; 6], b: &[f64; 6]) -> bool {
            a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
        }
        lanes_eq(&self.times_ms, &other.times_ms)
            && lanes_eq(&self.cos_hour_angle, &other.cos_hour_angle)
            && self.clamped == other.clamped
            && self.fallback == other.fallback
            && lanes_eq(&self.target_altitude, &other.target_altitude)
            && self.declination.to_bits() == other.declination.to_bits()
            && self.equation_of_time.to_bits() == other.equation_of_time.to_bits()
            && self.solar_noon_ms.to_bits() == other.solar_noon_ms.to_bits()
            && self.julian_date.to_bits() == other.julian_date.to_bits()
            && self.sunset_raw_ms.to_bits() == other.sunset_raw_ms.to_bits()
    }
}

impl DaySlab {
    pub(crate) fn new(declination: f64, equation_of_time: f64, julian_date: f64) -> Self {
        Self {
            times_ms: [f64::NAN; 6],
            cos_hour_angle: [f64::NAN; 6],
            clamped: [false; 6],
            fallback: [Fallback::None; 6],
            target_altitude: [f64::NAN; 6],
            declination,
            equation_of_time,
            solar_noon_ms: f64::NAN,
            julian_date,
            sunset_raw_ms: f64::NAN,
        }
    }
}
