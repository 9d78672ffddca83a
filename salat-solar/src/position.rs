//! Meeus-series solar position.
//!
//! For a Julian Date, produces the quantities the hour-angle kernel consumes:
//! declination, right ascension, equation of time, apparent sidereal time,
//! apparent ecliptic longitude, and the apparent obliquity. Low-precision
//! nutation is folded into both the sidereal time and the obliquity.
//!
//! All angles are degrees; the equation of time is minutes. Every term is a
//! polynomial or a trigonometric function of one, so construction is total —
//! there is no failure path.

use salat_core::angle::tables::{cos_deg, sin_deg};
use salat_core::angle::{asin_deg, atan2_deg, normalize_degrees, tan_deg};
use salat_core::constants::J2000_JD;

use crate::julian::julian_century;

/// Radians-to-minutes factor for the equation of time series.
const EQT_MINUTES_PER_RADIAN: f64 = 229.18;

/// Solar coordinates for one Julian Date.
///
/// Identity is the Julian Date; two values with equal `julian_date` are
/// interchangeable, which is what makes the position cache exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Julian Date the position was evaluated at
    pub julian_date: f64,
    /// Declination, degrees
    pub declination: f64,
    /// Right ascension, degrees in [0, 360)
    pub right_ascension: f64,
    /// Equation of time, minutes
    pub equation_of_time: f64,
    /// Apparent sidereal time at Greenwich, degrees
    pub apparent_sidereal_time: f64,
    /// Apparent ecliptic longitude, degrees
    pub apparent_longitude: f64,
    /// Apparent (nutation-corrected) obliquity of the ecliptic, degrees
    pub obliquity: f64,
}

impl SolarPosition {
    /// Evaluate the solar series at a Julian Date.
    pub fn new(julian_date: f64) -> Self {
        let t = julian_century(julian_date);
        let t2 = t * t;
        let t3 = t2 * t;

        // Mean longitude, mean anomaly, eccentricity
        let l0 = normalize_degrees(280.4664567 + 36000.76983 * t + 0.0003032 * t2);
        let m = normalize_degrees(357.52911 + 35999.05029 * t - 0.0001537 * t2);
        let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t2;

        let sin_m = sin_deg(m);
        let sin_2m = sin_deg(normalize_degrees(2.0 * m));
        let sin_3m = sin_deg(normalize_degrees(3.0 * m));

        // Equation of the center and true/apparent longitude
        let center = (1.914602 - 0.004817 * t - 0.000014 * t2) * sin_m
            + (0.019993 - 0.000101 * t) * sin_2m
            + 0.000289 * sin_3m;
        let true_longitude = normalize_degrees(l0 + center);
        let omega = 125.04 - 1934.136 * t;
        let apparent_longitude = true_longitude - 0.00569 - 0.00478 * sin_deg(omega);

        // Mean obliquity and low-precision nutation
        let mean_obliquity =
            23.439291 - 0.013004167 * t - 1.639e-7 * t2 + 5.036e-7 * t3;
        let lunar_longitude = normalize_degrees(218.3165 + 481267.8813 * t);
        let ascending_node =
            normalize_degrees(125.04452 - 1934.136261 * t + 0.0020708 * t2 + t3 / 450000.0);

        let two_l0 = normalize_degrees(2.0 * l0);
        let two_lunar = normalize_degrees(2.0 * lunar_longitude);
        let two_node = normalize_degrees(2.0 * ascending_node);

        let nutation_longitude = -(17.2 / 3600.0) * sin_deg(ascending_node)
            - (1.32 / 3600.0) * sin_deg(two_l0)
            - (0.23 / 3600.0) * sin_deg(two_lunar)
            + (0.21 / 3600.0) * sin_deg(two_node);
        let nutation_obliquity = (9.2 / 3600.0) * cos_deg(ascending_node)
            + (0.57 / 3600.0) * cos_deg(two_l0)
            + (0.10 / 3600.0) * cos_deg(two_lunar)
            - (0.09 / 3600.0) * cos_deg(two_node);

        let obliquity = mean_obliquity + nutation_obliquity;

        // Equatorial coordinates share the sin/cos of lambda and epsilon
        let sin_lambda = sin_deg(normalize_degrees(apparent_longitude));
        let cos_lambda = cos_deg(normalize_degrees(apparent_longitude));
        let sin_obliquity = sin_deg(obliquity);
        let cos_obliquity = cos_deg(obliquity);

        let declination = asin_deg(sin_obliquity * sin_lambda);
        let right_ascension = normalize_degrees(atan2_deg(cos_obliquity * sin_lambda, cos_lambda));

        // Sidereal time: mean value plus the equation of the equinoxes
        let mean_sidereal_time = normalize_degrees(
            280.46061837 + 360.98564736629 * (julian_date - J2000_JD) + 0.000387933 * t2
                - t3 / 38710000.0,
        );
        let apparent_sidereal_time =
            mean_sidereal_time + nutation_longitude * cos_deg(mean_obliquity + nutation_obliquity);

        // Equation of time (Meeus 28.3), radians scaled to minutes
        let half_obliquity_tan = tan_deg(obliquity / 2.0);
        let y = half_obliquity_tan * half_obliquity_tan;
        let cos_2l0 = cos_deg(two_l0);
        let sin_2l0 = sin_deg(two_l0);
        let sin_4l0 = sin_deg(normalize_degrees(4.0 * l0));

        let equation_of_time = EQT_MINUTES_PER_RADIAN
            * (y * sin_2l0 - 2.0 * e * sin_m + 4.0 * e * y * sin_m * cos_2l0
                - 0.5 * y * y * sin_4l0
                - 1.25 * e * e * sin_2m);

        Self {
            julian_date,
            declination,
            right_ascension,
            equation_of_time,
            apparent_sidereal_time,
            apparent_longitude,
            obliquity,
        }
    }
}
