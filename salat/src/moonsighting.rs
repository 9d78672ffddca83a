//! Season-adjusted twilight of the Moonsighting Committee.
//!
//! An empirical alternative to depression-angle twilight: dawn is a number
//! of minutes before sunrise and dusk a number of minutes after sunset,
//! where the minute count follows a six-segment piecewise-linear curve over
//! the days elapsed since the winter solstice, with latitude-scaled
//! breakpoints. Evening twilight selects among three shafaq definitions.
//!
//! This module is not consulted by the compute kernel; callers compose it as
//! an alternate fajr/isha source over the kernel's sunrise and sunset.

use salat_core::constants::MS_PER_MINUTE;
use salat_solar::julian::is_leap_year;

/// Evening twilight definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shafaq {
    /// General combined rule
    #[default]
    General,
    /// Red twilight
    Ahmer,
    /// White twilight
    Abyad,
}

/// Days elapsed since the hemisphere-appropriate winter solstice.
///
/// The northern offset is 10 days; the southern one 172 (173 in leap
/// years). The result is in [0, days-in-year).
pub fn days_since_solstice(day_of_year: i32, year: i32, latitude: f64) -> i32 {
    let days_in_year = if is_leap_year(year) { 366 } else { 365 };
    if latitude >= 0.0 {
        let mut days = day_of_year + 10;
        if days >= days_in_year {
            days -= days_in_year;
        }
        days
    } else {
        let southern_offset = if is_leap_year(year) { 173 } else { 172 };
        let mut days = day_of_year - southern_offset;
        if days < 0 {
            days += days_in_year;
        }
        days
    }
}

/// Interpolates the seasonal minute curve through its four latitude-scaled
/// breakpoint values.
fn seasonal_adjustment(a: f64, b: f64, c: f64, d: f64, days: i32) -> f64 {
    let dyy = days as f64;
    if days < 91 {
        a + (b - a) / 91.0 * dyy
    } else if days < 137 {
        b + (c - b) / 46.0 * (dyy - 91.0)
    } else if days < 183 {
        c + (d - c) / 46.0 * (dyy - 137.0)
    } else if days < 229 {
        d + (c - d) / 46.0 * (dyy - 183.0)
    } else if days < 275 {
        c + (b - c) / 46.0 * (dyy - 229.0)
    } else {
        b + (a - b) / 91.0 * (dyy - 275.0)
    }
}

/// Morning twilight: minutes before sunrise mapped onto the given sunrise
/// instant. Returns epoch ms.
pub fn season_adjusted_morning_twilight(
    latitude: f64,
    day_of_year: i32,
    year: i32,
    sunrise_ms: f64,
) -> f64 {
    let scale = latitude.abs() / 55.0;
    let a = 75.0 + 28.65 * scale;
    let b = 75.0 + 19.44 * scale;
    let c = 75.0 + 32.74 * scale;
    let d = 75.0 + 48.10 * scale;

    let days = days_since_solstice(day_of_year, year, latitude);
    let minutes = seasonal_adjustment(a, b, c, d, days);
    sunrise_ms - minutes * MS_PER_MINUTE
}

/// Evening twilight: minutes after sunset mapped onto the given sunset
/// instant. Returns epoch ms.
pub fn season_adjusted_evening_twilight(
    latitude: f64,
    day_of_year: i32,
    year: i32,
    sunset_ms: f64,
    shafaq: Shafaq,
) -> f64 {
    let scale = latitude.abs() / 55.0;
    let (a, b, c, d) = match shafaq {
        Shafaq::Ahmer => (
            62.0 + 17.40 * scale,
            62.0 - 7.16 * scale,
            62.0 + 5.12 * scale,
            62.0 + 19.44 * scale,
        ),
        Shafaq::Abyad => (
            75.0 + 25.60 * scale,
            75.0 + 7.16 * scale,
            75.0 + 36.84 * scale,
            75.0 + 81.84 * scale,
        ),
        Shafaq::General => (
            75.0 + 25.60 * scale,
            75.0 + 2.05 * scale,
            75.0 - 9.21 * scale,
            75.0 + 6.14 * scale,
        ),
    };

    let days = days_since_solstice(day_of_year, year, latitude);
    let minutes = seasonal_adjustment(a, b, c, d, days);
    sunset_ms + minutes * MS_PER_MINUTE
}
