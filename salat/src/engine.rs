//! The engine value: caches plus the compute entry point.
//!
//! An [`Engine`] owns the solar-position, day-constants, and location caches.
//! It is deliberately a plain value with interior mutability nowhere: sharing
//! one across threads requires external synchronization, which keeps the
//! single-threaded contract structural. The crate root wraps a thread-local
//! instance for the free-function API; hosts that want explicit ownership
//! construct their own.

use salat_solar::julian::julian_day_from_unix_ms;

use crate::cache::{DayCache, LocationCache, SolarCache};
use crate::config::Configuration;
use crate::kernel;
use crate::outputs::PrayerTimes;

/// A prayer-times engine owning its caches.
///
/// Computation is deterministic: identical inputs produce bit-identical
/// outputs whether the caches are cold, warm, or freshly cleared.
pub struct Engine {
    solar: SolarCache,
    days: DayCache,
    location: LocationCache,
}

impl Engine {
    /// An engine with empty caches.
    pub fn new() -> Self {
        Self {
            solar: SolarCache::new(),
            days: DayCache::new(),
            location: LocationCache::new(),
        }
    }

    /// Computes the day's times for a configuration.
    ///
    /// Never fails: geometrically impossible events surface through the
    /// undefined variant of each accessor on the returned view.
    pub fn compute(&mut self, config: &Configuration) -> PrayerTimes {
        let location = self.location.resolve(config);
        let julian_date = julian_day_from_unix_ms(config.date_ms);
        let day = self.days.get_or_compute(julian_date, &mut self.solar);
        let (slab, mask) = kernel::compute_day(&location, &day, config.high_latitude_rule);
        PrayerTimes::new(slab, mask)
    }

    /// Empties all three caches.
    ///
    /// Has no effect on subsequent outputs beyond the recomputation cost.
    pub fn clear_caches(&mut self) {
        self.solar.clear();
        self.days.clear();
        self.location.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
