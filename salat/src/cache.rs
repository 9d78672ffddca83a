//! The engine's three caches.
//!
//! - [`SolarCache`]: direct-mapped, 512 slots, keyed by Julian Date. A slot
//!   hits only on exact JD equality; a colliding insert replaces.
//! - [`DayCache`]: same geometry, holding the per-day interpolation
//!   constants derived from three consecutive solar positions.
//! - The location cache: the last-seen configuration fingerprint plus the
//!   trig that depends only on it, refreshed when any fingerprint field
//!   changes under strict float equality.
//!
//! Cached values are exactly what a miss would recompute, so hits are
//! bitwise-identical to the miss path and clearing never changes outputs.

use salat_core::angle::normalize_degrees;
use salat_core::angle::tables::{cos_deg, sin_deg};
use salat_solar::julian::unix_ms_from_julian_day;
use salat_solar::{DayInterpolants, ObserverTrig, SolarPosition};

use crate::config::Configuration;
use crate::slab::lane;

/// Slots in the solar-position and day-constants caches.
const CACHE_SLOTS: usize = 512;

#[inline]
fn slot_index(julian_date: f64) -> usize {
    ((julian_date + 0.5) as i64).rem_euclid(CACHE_SLOTS as i64) as usize
}

/// Direct-mapped solar-position cache.
pub(crate) struct SolarCache {
    slots: Box<[Option<SolarPosition>]>,
}

impl SolarCache {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![None; CACHE_SLOTS].into_boxed_slice(),
        }
    }

    /// Returns the position for `julian_date`, computing and storing it on a
    /// miss or a collision.
    pub(crate) fn get_or_compute(&mut self, julian_date: f64) -> SolarPosition {
        let index = slot_index(julian_date);
        if let Some(cached) = self.slots[index] {
            if cached.julian_date == julian_date {
                return cached;
            }
        }
        let position = SolarPosition::new(julian_date);
        self.slots[index] = Some(position);
        position
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(None);
    }
}

/// Location-independent per-day constants.
///
/// Everything the kernel reads for one date, staged once: the interpolation
/// sums and differences for right ascension (first differences normalized
/// through [0, 360)) and declination (plain differences), the trig of
/// today's declination, the equation of time, and the UTC midnight of the
/// Julian Date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DayConstants {
    pub(crate) julian_date: f64,
    pub(crate) interpolants: DayInterpolants,
    pub(crate) sin_declination: f64,
    pub(crate) cos_declination: f64,
    pub(crate) equation_of_time: f64,
    pub(crate) utc_midnight_ms: f64,
}

impl DayConstants {
    fn compute(julian_date: f64, solar: &mut SolarCache) -> Self {
        let yesterday = solar.get_or_compute(julian_date - 1.0);
        let today = solar.get_or_compute(julian_date);
        let tomorrow = solar.get_or_compute(julian_date + 1.0);

        let ra_back = normalize_degrees(today.right_ascension - yesterday.right_ascension);
        let ra_forward = normalize_degrees(tomorrow.right_ascension - today.right_ascension);
        let dec_back = today.declination - yesterday.declination;
        let dec_forward = tomorrow.declination - today.declination;

        Self {
            julian_date,
            interpolants: DayInterpolants {
                apparent_sidereal_time: today.apparent_sidereal_time,
                right_ascension: today.right_ascension,
                ra_sum: ra_back + ra_forward,
                ra_diff: ra_forward - ra_back,
                declination: today.declination,
                dec_sum: dec_back + dec_forward,
                dec_diff: dec_forward - dec_back,
            },
            sin_declination: sin_deg(today.declination),
            cos_declination: cos_deg(today.declination),
            equation_of_time: today.equation_of_time,
            utc_midnight_ms: unix_ms_from_julian_day(julian_date),
        }
    }
}

/// Direct-mapped day-constants cache.
pub(crate) struct DayCache {
    slots: Box<[Option<DayConstants>]>,
}

impl DayCache {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![None; CACHE_SLOTS].into_boxed_slice(),
        }
    }

    pub(crate) fn get_or_compute(
        &mut self,
        julian_date: f64,
        solar: &mut SolarCache,
    ) -> DayConstants {
        let index = slot_index(julian_date);
        if let Some(cached) = self.slots[index] {
            if cached.julian_date == julian_date {
                return cached;
            }
        }
        let constants = DayConstants::compute(julian_date, solar);
        self.slots[index] = Some(constants);
        constants
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(None);
    }
}

/// The configuration fields whose change invalidates the derived location
/// constants. Compared with strict float equality; the date is deliberately
/// absent so that a context varying only the date always hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ConfigFingerprint {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    fajr_angle: f64,
    isha_angle: f64,
    isha_interval: Option<f64>,
    shadow_factor: f64,
    adjustments: [f64; 6],
}

impl ConfigFingerprint {
    fn of(config: &Configuration) -> Self {
        Self {
            latitude: config.coordinates.latitude,
            longitude: config.coordinates.longitude,
            elevation: config.elevation,
            fajr_angle: config.method.fajr_angle,
            isha_angle: config.method.isha_angle,
            isha_interval: config.method.isha_interval_minutes,
            shadow_factor: config.madhab.shadow_factor(),
            adjustments: [
                config.adjustments.fajr,
                config.adjustments.sunrise,
                config.adjustments.dhuhr,
                config.adjustments.asr,
                config.adjustments.maghrib,
                config.adjustments.isha,
            ],
        }
    }
}

/// Derived constants that depend only on the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LocationConstants {
    pub(crate) observer: ObserverTrig,
    /// Observer latitude, degrees (the shadow-factor altitude needs it raw)
    pub(crate) latitude: f64,
    /// Horizon altitude with the elevation dip, degrees (negative)
    pub(crate) horizon_altitude: f64,
    pub(crate) sin_horizon_altitude: f64,
    pub(crate) fajr_angle: f64,
    pub(crate) fajr_altitude: f64,
    pub(crate) sin_fajr_altitude: f64,
    pub(crate) isha_angle: f64,
    pub(crate) isha_altitude: f64,
    pub(crate) sin_isha_altitude: f64,
    /// Per-lane adjustments, milliseconds
    pub(crate) adjustments_ms: [f64; 6],
    pub(crate) shadow_factor: f64,
    /// Governing isha interval in milliseconds, when the method has one
    pub(crate) isha_interval_ms: Option<f64>,
}

impl LocationConstants {
    fn derive(config: &Configuration) -> Self {
        let latitude = config.coordinates.latitude;
        let horizon_altitude = -(0.8333 + 0.0347 * config.elevation.sqrt());
        let fajr_altitude = -config.method.fajr_angle;
        let isha_altitude = -config.method.isha_angle;

        let minutes = [
            config.adjustments.fajr,
            config.adjustments.sunrise,
            config.adjustments.dhuhr,
            config.adjustments.asr,
            config.adjustments.maghrib,
            config.adjustments.isha,
        ];
        let mut adjustments_ms = [0.0; 6];
        for (slot, m) in adjustments_ms.iter_mut().zip(minutes) {
            *slot = m * 60_000.0;
        }
        debug_assert_eq!(adjustments_ms.len(), lane::ISHA + 1);

        Self {
            observer: ObserverTrig {
                sin_latitude: sin_deg(latitude),
                cos_latitude: cos_deg(latitude),
                west_longitude: -config.coordinates.longitude,
            },
            latitude,
            horizon_altitude,
            sin_horizon_altitude: sin_deg(horizon_altitude),
            fajr_angle: config.method.fajr_angle,
            fajr_altitude,
            sin_fajr_altitude: sin_deg(fajr_altitude),
            isha_angle: config.method.isha_angle,
            isha_altitude,
            sin_isha_altitude: sin_deg(isha_altitude),
            adjustments_ms,
            shadow_factor: config.madhab.shadow_factor(),
            isha_interval_ms: config
                .method
                .governing_isha_interval()
                .map(|minutes| minutes * 60_000.0),
        }
    }
}

/// Last-seen configuration plus its derived constants.
pub(crate) struct LocationCache {
    entry: Option<(ConfigFingerprint, LocationConstants)>,
}

impl LocationCache {
    pub(crate) fn new() -> Self {
        Self { entry: None }
    }

    /// Returns the derived constants, recomputing only when a fingerprint
    /// field changed.
    pub(crate) fn resolve(&mut self, config: &Configuration) -> LocationConstants {
        let fingerprint = ConfigFingerprint::of(config);
        if let Some((cached_fingerprint, constants)) = &self.entry {
            if *cached_fingerprint == fingerprint {
                return *constants;
            }
        }
        let constants = LocationConstants::derive(config);
        self.entry = Some((fingerprint, constants));
        constants
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Madhab, Method};
    use salat_core::Coordinates;

    fn config() -> Configuration {
        Configuration::new(
            Coordinates::new(22.3569, 91.7832).unwrap(),
            1_750_000_000_000.0,
            Method::muslim_world_league(),
        )
        .unwrap()
    }

    #[test]
    fn test_solar_cache_hit_is_identical() {
        let mut cache = SolarCache::new();
        let jd = 2461096.5;
        let first = cache.get_or_compute(jd);
        let second = cache.get_or_compute(jd);
        assert_eq!(first, second);
    }

    #[test]
    fn test_solar_cache_collision_replaces() {
        let mut cache = SolarCache::new();
        let jd = 2461096.5;
        let colliding = jd + CACHE_SLOTS as f64;
        assert_eq!(slot_index(jd), slot_index(colliding));

        let first = cache.get_or_compute(jd);
        let second = cache.get_or_compute(colliding);
        assert_eq!(second.julian_date, colliding);
        // The original key recomputes after eviction, bit-identically
        let recomputed = cache.get_or_compute(jd);
        assert_eq!(first, recomputed);
    }

    #[test]
    fn test_clear_then_recompute_identical() {
        let mut cache = SolarCache::new();
        let before = cache.get_or_compute(2461212.5);
        cache.clear();
        let after = cache.get_or_compute(2461212.5);
        assert_eq!(before, after);
    }

    #[test]
    fn test_day_constants_interpolants() {
        let mut solar = SolarCache::new();
        let mut days = DayCache::new();
        let day = days.get_or_compute(2461096.5, &mut solar);

        // RA advances ~1 degree/day, so the normalized sums sit near 2
        assert!(
            (1.6..2.4).contains(&day.interpolants.ra_sum),
            "ra_sum {}",
            day.interpolants.ra_sum
        );
        assert!(day.interpolants.ra_diff.abs() < 0.1);
        assert!(
            (day.sin_declination - day.interpolants.declination.to_radians().sin()).abs() < 1e-5
        );
        assert_eq!(
            day.utc_midnight_ms,
            unix_ms_from_julian_day(2461096.5)
        );
    }

    #[test]
    fn test_location_cache_hits_on_identical_config() {
        let mut cache = LocationCache::new();
        let config = config();
        let first = cache.resolve(&config);
        let second = cache.resolve(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_location_cache_ignores_date_change() {
        let mut cache = LocationCache::new();
        let mut config = config();
        let first = cache.resolve(&config);
        config.date_ms += 86_400_000.0;
        let second = cache.resolve(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_location_cache_refreshes_on_madhab_change() {
        let mut cache = LocationCache::new();
        let config = config();
        let standard = cache.resolve(&config);
        let hanafi = cache.resolve(&config.with_madhab(Madhab::Hanafi));
        assert_eq!(standard.shadow_factor, 1.0);
        assert_eq!(hanafi.shadow_factor, 2.0);
    }

    #[test]
    fn test_elevation_deepens_horizon() {
        let mut cache = LocationCache::new();
        let sea_level = cache.resolve(&config());
        let elevated = cache.resolve(&config().with_elevation(1600.0).unwrap());
        assert!(elevated.horizon_altitude < sea_level.horizon_altitude);
        assert!((sea_level.horizon_altitude + 0.8333).abs() < 1e-12);
    }
}
