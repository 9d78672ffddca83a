//! The compute kernel: one resolved configuration, one day, one slab.
//!
//! Protocol per call:
//!
//! 1. transit (always defined) and the asr target altitude at transit;
//! 2. the five hour-angle events, diagnostics lanes written before the
//!    undefined check so an out-of-reach event still surfaces its raw cos;
//! 3. raw sunset kept apart from adjusted maghrib;
//! 4. interval isha when the method carries one;
//! 5. the high-latitude rewrite of undefined fajr/isha.
//!
//! The kernel never fails; everything it cannot produce is encoded in the
//! undefined bitmask.

use salat_core::constants::{HOURS_PER_DAY, MS_PER_DAY, MS_PER_HOUR};
use salat_solar::hour_angle::{
    approximate_transit, corrected_hour_angle, corrected_transit, interpolated_declination,
    shadow_factor_altitude, HourAngleOutcome,
};

use salat_core::angle::tables::sin_deg;

use crate::cache::{DayConstants, LocationConstants};
use crate::config::HighLatitudeRule;
use crate::high_latitude;
use crate::outputs::Fallback;
use crate::slab::{lane, undefined, DaySlab};

/// Computes the day's slab and undefined bitmask.
pub(crate) fn compute_day(
    location: &LocationConstants,
    day: &DayConstants,
    rule: HighLatitudeRule,
) -> (DaySlab, u8) {
    let interp = &day.interpolants;
    let mut slab = DaySlab::new(
        interp.declination,
        day.equation_of_time,
        day.julian_date,
    );
    let mut mask: u8 = 0;

    // Products shared by every cos-hour-angle evaluation this day
    let sin_lat_sin_dec = location.observer.sin_latitude * day.sin_declination;
    let cos_lat_cos_dec = location.observer.cos_latitude * day.cos_declination;

    // Transit
    let m0 = approximate_transit(
        interp.right_ascension,
        location.observer.west_longitude,
        interp.apparent_sidereal_time,
    );
    let noon_hours = corrected_transit(m0, location.observer.west_longitude, interp);
    slab.solar_noon_ms = day.utc_midnight_ms + noon_hours * MS_PER_HOUR;
    slab.times_ms[lane::DHUHR] = slab.solar_noon_ms + location.adjustments_ms[lane::DHUHR];

    // Asr target altitude from the declination at transit
    let declination_at_transit = interpolated_declination(interp, noon_hours / HOURS_PER_DAY);
    let asr_altitude =
        shadow_factor_altitude(location.shadow_factor, location.latitude, declination_at_transit);
    let sin_asr_altitude = sin_deg(asr_altitude);

    let solve = |target_altitude: f64, sin_target_altitude: f64, after_transit: bool| {
        corrected_hour_angle(
            m0,
            target_altitude,
            sin_target_altitude,
            &location.observer,
            sin_lat_sin_dec,
            cos_lat_cos_dec,
            after_transit,
            interp,
        )
    };

    // Fajr
    slab.target_altitude[lane::FAJR] = location.fajr_altitude;
    match solve(location.fajr_altitude, location.sin_fajr_altitude, false) {
        HourAngleOutcome::Reached {
            day_fraction,
            cos_hour_angle,
            clamped,
        } => {
            slab.cos_hour_angle[lane::FAJR] = cos_hour_angle;
            slab.clamped[lane::FAJR] = clamped;
            slab.times_ms[lane::FAJR] = day.utc_midnight_ms
                + day_fraction * MS_PER_DAY
                + location.adjustments_ms[lane::FAJR];
        }
        HourAngleOutcome::OutOfReach { cos_hour_angle } => {
            slab.cos_hour_angle[lane::FAJR] = cos_hour_angle;
            mask |= undefined::FAJR;
        }
    }

    // Sunrise
    slab.target_altitude[lane::SUNRISE] = location.horizon_altitude;
    match solve(location.horizon_altitude, location.sin_horizon_altitude, false) {
        HourAngleOutcome::Reached {
            day_fraction,
            cos_hour_angle,
            clamped,
        } => {
            slab.cos_hour_angle[lane::SUNRISE] = cos_hour_angle;
            slab.clamped[lane::SUNRISE] = clamped;
            slab.times_ms[lane::SUNRISE] = day.utc_midnight_ms
                + day_fraction * MS_PER_DAY
                + location.adjustments_ms[lane::SUNRISE];
        }
        HourAngleOutcome::OutOfReach { cos_hour_angle } => {
            slab.cos_hour_angle[lane::SUNRISE] = cos_hour_angle;
            mask |= undefined::SUNRISE;
        }
    }

    // Asr
    slab.target_altitude[lane::ASR] = asr_altitude;
    match solve(asr_altitude, sin_asr_altitude, true) {
        HourAngleOutcome::Reached {
            day_fraction,
            cos_hour_angle,
            clamped,
        } => {
            slab.cos_hour_angle[lane::ASR] = cos_hour_angle;
            slab.clamped[lane::ASR] = clamped;
            slab.times_ms[lane::ASR] = day.utc_midnight_ms
                + day_fraction * MS_PER_DAY
                + location.adjustments_ms[lane::ASR];
        }
        HourAngleOutcome::OutOfReach { cos_hour_angle } => {
            slab.cos_hour_angle[lane::ASR] = cos_hour_angle;
            mask |= undefined::ASR;
        }
    }

    // Sunset. The raw time anchors the night divisions and the
    // high-latitude rules; the maghrib lane adds the adjustment on top.
    // Diagnostics land in the maghrib lane: same target altitude as
    // sunrise, mirrored hour angle.
    slab.target_altitude[lane::MAGHRIB] = location.horizon_altitude;
    match solve(location.horizon_altitude, location.sin_horizon_altitude, true) {
        HourAngleOutcome::Reached {
            day_fraction,
            cos_hour_angle,
            clamped,
        } => {
            slab.cos_hour_angle[lane::MAGHRIB] = cos_hour_angle;
            slab.clamped[lane::MAGHRIB] = clamped;
            slab.sunset_raw_ms = day.utc_midnight_ms + day_fraction * MS_PER_DAY;
            slab.times_ms[lane::MAGHRIB] =
                slab.sunset_raw_ms + location.adjustments_ms[lane::MAGHRIB];
        }
        HourAngleOutcome::OutOfReach { cos_hour_angle } => {
            slab.cos_hour_angle[lane::MAGHRIB] = cos_hour_angle;
            mask |= undefined::SUNSET;
        }
    }

    // Isha: fixed interval after maghrib when the method has one, otherwise
    // its own hour-angle event
    match location.isha_interval_ms {
        Some(interval_ms) => {
            if mask & undefined::SUNSET == 0 {
                slab.times_ms[lane::ISHA] = slab.times_ms[lane::MAGHRIB]
                    + interval_ms
                    + location.adjustments_ms[lane::ISHA];
                slab.fallback[lane::ISHA] = Fallback::IshaInterval;
                // cos lane stays NaN: no hour-angle geometry was involved
            } else {
                mask |= undefined::ISHA;
            }
        }
        None => {
            slab.target_altitude[lane::ISHA] = location.isha_altitude;
            match solve(location.isha_altitude, location.sin_isha_altitude, true) {
                HourAngleOutcome::Reached {
                    day_fraction,
                    cos_hour_angle,
                    clamped,
                } => {
                    slab.cos_hour_angle[lane::ISHA] = cos_hour_angle;
                    slab.clamped[lane::ISHA] = clamped;
                    slab.times_ms[lane::ISHA] = day.utc_midnight_ms
                        + day_fraction * MS_PER_DAY
                        + location.adjustments_ms[lane::ISHA];
                }
                HourAngleOutcome::OutOfReach { cos_hour_angle } => {
                    slab.cos_hour_angle[lane::ISHA] = cos_hour_angle;
                    mask |= undefined::ISHA;
                }
            }
        }
    }

    high_latitude::apply(rule, location, &mut slab, &mut mask);

    (slab, mask)
}
