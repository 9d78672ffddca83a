//! Hour-angle events: corrected transit and corrected hour angle.
//!
//! Implements the Meeus chapter 15 recipe in the degree domain. The transit
//! gets one interpolation-based correction; each rising/setting event gets
//! exactly one altitude-residual refinement step. One step is the contract:
//! further iteration is not more accurate for the altitudes this library
//! targets and diverges in near-polar borderline cases where the local hour
//! angle approaches zero.

use salat_core::angle::tables::{acos_deg, atan_deg, cos_deg, sin_deg};
use salat_core::angle::{asin_deg, quadrant_shift, tan_deg};
use salat_core::constants::{HOURS_PER_DAY, SIDEREAL_DEGREES_PER_DAY};

use crate::interpolation::interpolate_from_differences;

/// Tolerance band around |cos H| = 1 that is treated as floating-point noise
/// rather than geometric impossibility.
///
/// Tuned to the Meeus series plus the lookup-table precision; changing it
/// requires re-running the full regression baseline.
pub const COS_EPSILON: f64 = 1.0e-6;

/// Per-day interpolation constants consumed by the corrections.
///
/// `ra_sum`/`ra_diff` are the sum and difference of the two day-pair right
/// ascension differences, each first difference normalized through [0, 360);
/// the declination pair uses plain differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayInterpolants {
    /// Apparent sidereal time at Greenwich for today's midnight, degrees
    pub apparent_sidereal_time: f64,
    /// Today's right ascension, degrees
    pub right_ascension: f64,
    /// Normalized RA first-difference sum
    pub ra_sum: f64,
    /// Normalized RA first-difference difference
    pub ra_diff: f64,
    /// Today's declination, degrees
    pub declination: f64,
    /// Declination first-difference sum
    pub dec_sum: f64,
    /// Declination first-difference difference
    pub dec_diff: f64,
}

/// Location trig the hour-angle refinement needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverTrig {
    /// sin of the observer latitude
    pub sin_latitude: f64,
    /// cos of the observer latitude
    pub cos_latitude: f64,
    /// West-positive longitude (Meeus convention), degrees
    pub west_longitude: f64,
}

/// Outcome of a corrected-hour-angle evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngleOutcome {
    /// The sun reaches the target altitude; the event lands at
    /// `day_fraction` of the UTC day (may fall slightly outside [0, 1] for
    /// extreme longitudes).
    Reached {
        /// Event time as a fraction of the UTC day
        day_fraction: f64,
        /// Raw cos H before any snapping
        cos_hour_angle: f64,
        /// Whether the raw value was snapped from the noise band to +/-1
        clamped: bool,
    },
    /// |cos H| exceeds 1 + epsilon: the sun never reaches the altitude that
    /// day. The raw value is preserved for diagnostics.
    OutOfReach {
        /// Raw cos H
        cos_hour_angle: f64,
    },
}

/// cos of the hour angle at which the sun crosses a target altitude.
///
/// `sin_lat_sin_dec` and `cos_lat_cos_dec` are precomputed products; they
/// appear in this formula for all five daily events, so the kernel stages
/// them once per day.
#[inline]
pub fn cos_hour_angle(
    sin_target_altitude: f64,
    sin_lat_sin_dec: f64,
    cos_lat_cos_dec: f64,
) -> f64 {
    (sin_target_altitude - sin_lat_sin_dec) / cos_lat_cos_dec
}

/// Approximate transit as a fraction of the UTC day.
#[inline]
pub fn approximate_transit(
    right_ascension: f64,
    west_longitude: f64,
    apparent_sidereal_time: f64,
) -> f64 {
    ((right_ascension + west_longitude - apparent_sidereal_time) / 360.0).rem_euclid(1.0)
}

/// Sidereal time advanced to day fraction `m`, wrapped without a modulo.
///
/// The base value is in [0, 360) and the advance is below 361 degrees per
/// unit fraction, so at most two subtractions are needed on the high side
/// and none below -361 can occur for the fractions the kernel produces.
#[inline]
fn advanced_sidereal_time(apparent_sidereal_time: f64, m: f64) -> f64 {
    let mut theta = apparent_sidereal_time + SIDEREAL_DEGREES_PER_DAY * m;
    if theta >= 360.0 {
        theta -= 360.0;
        if theta >= 360.0 {
            theta -= 360.0;
        }
    }
    theta
}

/// Right ascension interpolated to day fraction `m`. The interpolation moves
/// the bounded base value by about a degree, so a single add-or-subtract
/// covers the wrap.
#[inline]
fn interpolated_right_ascension(interp: &DayInterpolants, m: f64) -> f64 {
    let mut ra =
        interpolate_from_differences(interp.right_ascension, interp.ra_sum, interp.ra_diff, m);
    if ra < 0.0 {
        ra += 360.0;
    } else if ra >= 360.0 {
        ra -= 360.0;
    }
    ra
}

/// Declination interpolated to day fraction `m`.
#[inline]
pub fn interpolated_declination(interp: &DayInterpolants, m: f64) -> f64 {
    interpolate_from_differences(interp.declination, interp.dec_sum, interp.dec_diff, m)
}

/// Corrected transit: solar noon in UTC hours.
pub fn corrected_transit(m0: f64, west_longitude: f64, interp: &DayInterpolants) -> f64 {
    let theta = advanced_sidereal_time(interp.apparent_sidereal_time, m0);
    let ra = interpolated_right_ascension(interp, m0);
    let local_hour_angle = quadrant_shift(theta - west_longitude - ra);
    (m0 - local_hour_angle / 360.0) * HOURS_PER_DAY
}

/// Corrected hour-angle event with one refinement step.
///
/// `after_transit` selects the PM branch (asr, sunset, isha); the AM branch
/// serves dawn and sunrise. `day_fraction` in the result is before the
/// 24-hour scaling so the caller can map it straight to milliseconds.
#[allow(clippy::too_many_arguments)]
pub fn corrected_hour_angle(
    m0: f64,
    target_altitude: f64,
    sin_target_altitude: f64,
    observer: &ObserverTrig,
    sin_lat_sin_dec: f64,
    cos_lat_cos_dec: f64,
    after_transit: bool,
    interp: &DayInterpolants,
) -> HourAngleOutcome {
    let raw = cos_hour_angle(sin_target_altitude, sin_lat_sin_dec, cos_lat_cos_dec);

    if !(-(1.0 + COS_EPSILON)..=(1.0 + COS_EPSILON)).contains(&raw) {
        return HourAngleOutcome::OutOfReach {
            cos_hour_angle: raw,
        };
    }
    let clamped = raw.abs() > 1.0;

    let h0 = acos_deg(raw);
    let m = if after_transit {
        m0 + h0 / 360.0
    } else {
        m0 - h0 / 360.0
    };

    // Single refinement: actual altitude at the trial instant vs target
    let theta = advanced_sidereal_time(interp.apparent_sidereal_time, m);
    let ra = interpolated_right_ascension(interp, m);
    let declination = interpolated_declination(interp, m);
    let local_hour_angle = quadrant_shift(theta - observer.west_longitude - ra);

    let sin_declination = sin_deg(declination);
    let cos_declination = cos_deg(declination);
    let altitude = asin_deg(
        observer.sin_latitude * sin_declination
            + observer.cos_latitude * cos_declination * cos_deg(local_hour_angle),
    );

    let dm = (altitude - target_altitude)
        / (360.0 * cos_declination * observer.cos_latitude * sin_deg(local_hour_angle));

    HourAngleOutcome::Reached {
        day_fraction: m + dm,
        cos_hour_angle: raw,
        clamped,
    }
}

/// Target altitude for the afternoon event under a shadow factor.
///
/// `shadow_factor` is 1 for the majority rule and 2 for the Hanafi school.
/// The arctangent argument is bounded to (0, 1] for every real latitude, so
/// the table evaluation applies.
#[inline]
pub fn shadow_factor_altitude(shadow_factor: f64, latitude: f64, declination: f64) -> f64 {
    atan_deg(1.0 / (shadow_factor + tan_deg((latitude - declination).abs())))
}
