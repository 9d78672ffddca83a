//! Long-lived compute handle for one location and method.
//!
//! A [`PrayerContext`] retains a configuration and varies only the date
//! across calls, so the location cache hits on every compute and the derived
//! trig is paid once. Output is bit-identical to the one-shot path.

use crate::config::Configuration;
use crate::outputs::PrayerTimes;

/// A retained configuration with the date left open.
///
/// # Example
///
/// ```rust
/// use salat::{Configuration, Coordinates, Method, PrayerContext};
///
/// let config = Configuration::new(
///     Coordinates::new(30.0444, 31.2357)?,
///     0.0,
///     Method::egyptian(),
/// )?;
/// let context = PrayerContext::new(config);
///
/// let day_ms = 86_400_000.0;
/// let first = context.compute(1_771_977_600_000.0);
/// let next = context.compute(1_771_977_600_000.0 + day_ms);
/// assert!(first.dhuhr().is_valid() && next.dhuhr().is_valid());
/// # Ok::<(), salat::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrayerContext {
    config: Configuration,
}

impl PrayerContext {
    /// Wraps a configuration; its `date_ms` is ignored and replaced on every
    /// [`compute`](Self::compute).
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// Computes the times for a date through the thread-local engine.
    pub fn compute(&self, date_ms: f64) -> PrayerTimes {
        let mut config = self.config;
        config.date_ms = date_ms;
        crate::compute_prayer_times(&config)
    }

    /// The retained configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }
}
