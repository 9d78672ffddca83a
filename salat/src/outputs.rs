//! The per-day output view and its tagged per-prayer results.
//!
//! [`PrayerTimes`] owns the slab a kernel run produced and projects it lane
//! by lane on access. Derived times (midnight, imsak, the two thirds of the
//! night) are computed on demand from the raw sunset anchor, never stored.

use salat_core::constants::{MS_PER_DAY, MS_PER_MINUTE};

use crate::slab::{lane, undefined, DaySlab};

/// Offset of imsak before fajr: ten minutes, exactly.
const IMSAK_OFFSET_MS: f64 = 10.0 * MS_PER_MINUTE;

/// The eleven daily outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
    Imsak,
    FirstThird,
    LastThird,
}

/// How a time lane was produced when the direct geometry did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fallback {
    /// Direct hour-angle geometry
    #[default]
    None,
    /// Isha as a fixed interval after maghrib
    IshaInterval,
    /// Middle-of-night high-latitude rule
    MiddleOfNight,
    /// Seventh-of-night high-latitude rule
    SeventhOfNight,
    /// Twilight-angle high-latitude rule
    TwilightAngle,
}

/// Why a result is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndefinedReason {
    /// The sun never reaches the target altitude that day
    NeverReachesAltitude,
    /// A derived time needs both sunset and sunrise
    SunriseOrSunsetUndefined,
    /// Imsak needs fajr
    FajrUndefined,
}

impl std::fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UndefinedReason::NeverReachesAltitude => {
                write!(f, "sun never reaches the target altitude")
            }
            UndefinedReason::SunriseOrSunsetUndefined => {
                write!(f, "sunset or sunrise undefined")
            }
            UndefinedReason::FajrUndefined => write!(f, "fajr is undefined"),
        }
    }
}

/// Numerical context attached to every result, valid or not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Raw cos of the hour angle, when the event came from hour-angle
    /// geometry
    pub cos_hour_angle: Option<f64>,
    /// Whether the cos value was snapped from the noise band to +/-1
    pub clamped: bool,
    /// Fallback that produced the time
    pub fallback: Fallback,
    /// Target altitude in degrees, when the event has one
    pub target_altitude: Option<f64>,
}

/// One prayer's outcome: a time, or the reason there is none.
///
/// Callers must handle both variants at every accessor; the tagged union is
/// the contract, not an error path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrayerTime {
    /// The event occurs
    Valid {
        /// Event time, epoch milliseconds
        time_ms: f64,
        /// Numerical context
        diagnostics: Diagnostics,
    },
    /// The event does not occur
    Undefined {
        /// Why
        reason: UndefinedReason,
        /// Numerical context (raw cos value preserved where applicable)
        diagnostics: Diagnostics,
    },
}

impl PrayerTime {
    /// The time in epoch milliseconds, if the event occurs.
    #[inline]
    pub fn time_ms(&self) -> Option<f64> {
        match self {
            PrayerTime::Valid { time_ms, .. } => Some(*time_ms),
            PrayerTime::Undefined { .. } => None,
        }
    }

    /// True for the `Valid` variant.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, PrayerTime::Valid { .. })
    }

    /// The diagnostics of either variant.
    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            PrayerTime::Valid { diagnostics, .. } => diagnostics,
            PrayerTime::Undefined { diagnostics, .. } => diagnostics,
        }
    }
}

/// All outputs of one compute call.
///
/// Holds the slab by value; accessors are cheap projections and may be
/// called any number of times in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    slab: DaySlab,
    undefined: u8,
}

impl PrayerTimes {
    pub(crate) fn new(slab: DaySlab, undefined: u8) -> Self {
        Self { slab, undefined }
    }

    fn lane_diagnostics(&self, index: usize) -> Diagnostics {
        let cos = self.slab.cos_hour_angle[index];
        let altitude = self.slab.target_altitude[index];
        Diagnostics {
            cos_hour_angle: (!cos.is_nan()).then_some(cos),
            clamped: self.slab.clamped[index],
            fallback: self.slab.fallback[index],
            target_altitude: (!altitude.is_nan()).then_some(altitude),
        }
    }

    fn event(&self, index: usize, bit: u8) -> PrayerTime {
        let diagnostics = self.lane_diagnostics(index);
        if self.undefined & bit != 0 {
            PrayerTime::Undefined {
                reason: UndefinedReason::NeverReachesAltitude,
                diagnostics,
            }
        } else {
            PrayerTime::Valid {
                time_ms: self.slab.times_ms[index],
                diagnostics,
            }
        }
    }

    /// Dawn.
    pub fn fajr(&self) -> PrayerTime {
        self.event(lane::FAJR, undefined::FAJR)
    }

    /// Sunrise.
    pub fn sunrise(&self) -> PrayerTime {
        self.event(lane::SUNRISE, undefined::SUNRISE)
    }

    /// Solar noon. Always defined.
    pub fn dhuhr(&self) -> PrayerTime {
        PrayerTime::Valid {
            time_ms: self.slab.times_ms[lane::DHUHR],
            diagnostics: self.lane_diagnostics(lane::DHUHR),
        }
    }

    /// Afternoon.
    pub fn asr(&self) -> PrayerTime {
        self.event(lane::ASR, undefined::ASR)
    }

    /// Astronomical sunset, before the maghrib adjustment. Shares the hour
    /// angle and clamp flag with the maghrib lane.
    pub fn sunset(&self) -> PrayerTime {
        let diagnostics = self.lane_diagnostics(lane::MAGHRIB);
        if self.undefined & undefined::SUNSET != 0 {
            PrayerTime::Undefined {
                reason: UndefinedReason::NeverReachesAltitude,
                diagnostics,
            }
        } else {
            PrayerTime::Valid {
                time_ms: self.slab.sunset_raw_ms,
                diagnostics,
            }
        }
    }

    /// Maghrib: sunset plus the maghrib adjustment. Inherits sunset's
    /// undefined status.
    pub fn maghrib(&self) -> PrayerTime {
        self.event(lane::MAGHRIB, undefined::SUNSET)
    }

    /// Dusk.
    pub fn isha(&self) -> PrayerTime {
        self.event(lane::ISHA, undefined::ISHA)
    }

    fn night_anchor(&self) -> Option<(f64, f64)> {
        if self.undefined & (undefined::SUNRISE | undefined::SUNSET) != 0 {
            return None;
        }
        let next_sunrise = self.slab.times_ms[lane::SUNRISE] + MS_PER_DAY;
        Some((self.slab.sunset_raw_ms, next_sunrise))
    }

    fn night_division(&self, fraction_numerator: f64, fraction_denominator: f64) -> PrayerTime {
        match self.night_anchor() {
            Some((sunset, next_sunrise)) => PrayerTime::Valid {
                time_ms: sunset
                    + (next_sunrise - sunset) * fraction_numerator / fraction_denominator,
                diagnostics: Diagnostics::default(),
            },
            None => PrayerTime::Undefined {
                reason: UndefinedReason::SunriseOrSunsetUndefined,
                diagnostics: Diagnostics::default(),
            },
        }
    }

    /// Solar midnight: midpoint between the raw sunset and the next day's
    /// sunrise.
    pub fn midnight(&self) -> PrayerTime {
        self.night_division(1.0, 2.0)
    }

    /// End of the first third of the night.
    pub fn first_third(&self) -> PrayerTime {
        self.night_division(1.0, 3.0)
    }

    /// Start of the last third of the night.
    pub fn last_third(&self) -> PrayerTime {
        self.night_division(2.0, 3.0)
    }

    /// Imsak: ten minutes before fajr, exactly.
    pub fn imsak(&self) -> PrayerTime {
        match self.fajr() {
            PrayerTime::Valid {
                time_ms,
                diagnostics,
            } => PrayerTime::Valid {
                time_ms: time_ms - IMSAK_OFFSET_MS,
                diagnostics,
            },
            PrayerTime::Undefined { diagnostics, .. } => PrayerTime::Undefined {
                reason: UndefinedReason::FajrUndefined,
                diagnostics,
            },
        }
    }

    /// Dispatch accessor over [`Prayer`].
    pub fn time(&self, prayer: Prayer) -> PrayerTime {
        match prayer {
            Prayer::Fajr => self.fajr(),
            Prayer::Sunrise => self.sunrise(),
            Prayer::Dhuhr => self.dhuhr(),
            Prayer::Asr => self.asr(),
            Prayer::Sunset => self.sunset(),
            Prayer::Maghrib => self.maghrib(),
            Prayer::Isha => self.isha(),
            Prayer::Midnight => self.midnight(),
            Prayer::Imsak => self.imsak(),
            Prayer::FirstThird => self.first_third(),
            Prayer::LastThird => self.last_third(),
        }
    }

    /// Solar declination for the day, degrees.
    pub fn declination(&self) -> f64 {
        self.slab.declination
    }

    /// Equation of time, minutes.
    pub fn equation_of_time_minutes(&self) -> f64 {
        self.slab.equation_of_time
    }

    /// Corrected transit, epoch ms, before the dhuhr adjustment.
    pub fn solar_noon_ms(&self) -> f64 {
        self.slab.solar_noon_ms
    }

    /// Julian Date of the computed day.
    pub fn julian_date(&self) -> f64 {
        self.slab.julian_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slab::DaySlab;

    fn slab_with_times() -> DaySlab {
        let mut slab = DaySlab::new(10.0, 3.0, 2461096.5);
        let base = 1_000_000_000.0;
        slab.times_ms = [
            base + 4.0 * 3.6e6,  // fajr
            base + 6.0 * 3.6e6,  // sunrise
            base + 12.0 * 3.6e6, // dhuhr
            base + 15.0 * 3.6e6, // asr
            base + 18.0 * 3.6e6, // maghrib
            base + 19.5 * 3.6e6, // isha
        ];
        slab.sunset_raw_ms = base + 18.0 * 3.6e6;
        slab.solar_noon_ms = base + 12.0 * 3.6e6;
        slab
    }

    #[test]
    fn test_all_defined_projection() {
        let times = PrayerTimes::new(slab_with_times(), 0);
        for prayer in [
            Prayer::Fajr,
            Prayer::Sunrise,
            Prayer::Dhuhr,
            Prayer::Asr,
            Prayer::Sunset,
            Prayer::Maghrib,
            Prayer::Isha,
            Prayer::Midnight,
            Prayer::Imsak,
            Prayer::FirstThird,
            Prayer::LastThird,
        ] {
            assert!(times.time(prayer).is_valid(), "{prayer:?} should be valid");
        }
    }

    #[test]
    fn test_imsak_exactly_ten_minutes_before_fajr() {
        let times = PrayerTimes::new(slab_with_times(), 0);
        let fajr = times.fajr().time_ms().unwrap();
        let imsak = times.imsak().time_ms().unwrap();
        assert_eq!(fajr - imsak, 600_000.0);
    }

    #[test]
    fn test_night_division_ordering() {
        let times = PrayerTimes::new(slab_with_times(), 0);
        let sunset = times.sunset().time_ms().unwrap();
        let first = times.first_third().time_ms().unwrap();
        let mid = times.midnight().time_ms().unwrap();
        let last = times.last_third().time_ms().unwrap();
        assert!(sunset < first && first < mid && mid < last);
    }

    #[test]
    fn test_undefined_fajr_cascades_to_imsak() {
        let times = PrayerTimes::new(slab_with_times(), undefined::FAJR);
        assert!(!times.fajr().is_valid());
        match times.imsak() {
            PrayerTime::Undefined { reason, .. } => {
                assert_eq!(reason, UndefinedReason::FajrUndefined);
            }
            other => panic!("expected undefined imsak, got {other:?}"),
        }
    }

    #[test]
    fn test_undefined_sunset_cascades() {
        let mask = undefined::SUNRISE | undefined::SUNSET;
        let times = PrayerTimes::new(slab_with_times(), mask);
        assert!(!times.sunset().is_valid());
        assert!(!times.maghrib().is_valid());
        for derived in [Prayer::Midnight, Prayer::FirstThird, Prayer::LastThird] {
            match times.time(derived) {
                PrayerTime::Undefined { reason, .. } => {
                    assert_eq!(reason, UndefinedReason::SunriseOrSunsetUndefined);
                }
                other => panic!("expected undefined {derived:?}, got {other:?}"),
            }
        }
        // Dhuhr is unaffected
        assert!(times.dhuhr().is_valid());
    }

    #[test]
    fn test_sunset_reads_raw_anchor_not_maghrib_lane() {
        let mut slab = slab_with_times();
        // Push the maghrib lane away from raw sunset, as a method adjustment
        // would
        slab.times_ms[super::lane::MAGHRIB] += 3.0 * 60_000.0;
        let times = PrayerTimes::new(slab, 0);
        assert_eq!(
            times.sunset().time_ms().unwrap() + 3.0 * 60_000.0,
            times.maghrib().time_ms().unwrap()
        );
        // Night divisions follow raw sunset
        let sunset = times.sunset().time_ms().unwrap();
        let next_sunrise = times.sunrise().time_ms().unwrap() + MS_PER_DAY;
        assert_eq!(
            times.midnight().time_ms().unwrap(),
            sunset + (next_sunrise - sunset) / 2.0
        );
    }

    #[test]
    fn test_diagnostics_nan_maps_to_none() {
        let times = PrayerTimes::new(slab_with_times(), 0);
        // Lanes in the fixture never set cos values
        assert_eq!(times.fajr().diagnostics().cos_hour_angle, None);
        assert_eq!(times.fajr().diagnostics().target_altitude, None);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            UndefinedReason::SunriseOrSunsetUndefined.to_string(),
            "sunset or sunrise undefined"
        );
        assert_eq!(UndefinedReason::FajrUndefined.to_string(), "fajr is undefined");
    }
}
