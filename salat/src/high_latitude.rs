//! High-latitude fallback rules.
//!
//! In the seasonal band where the sun stays above the configured twilight
//! depression all night, fajr and isha have no geometric solution. When a
//! rule other than `None` is selected and the night itself exists (sunrise
//! and sunset both defined, positive duration), the undefined slot is
//! rewritten as a fraction of the night measured from the raw sunset anchor.

use salat_core::constants::MS_PER_DAY;

use crate::cache::LocationConstants;
use crate::config::HighLatitudeRule;
use crate::outputs::Fallback;
use crate::slab::{lane, undefined, DaySlab};

/// Rewrites undefined fajr/isha lanes per the selected rule.
///
/// Declines when the rule is `None`, when sunrise or sunset is undefined, or
/// when the night duration is not strictly positive (possible under the
/// midnight sun); in those cases the undefined bits stay set.
pub(crate) fn apply(
    rule: HighLatitudeRule,
    location: &LocationConstants,
    slab: &mut DaySlab,
    mask: &mut u8,
) {
    if rule == HighLatitudeRule::None {
        return;
    }
    if *mask & (undefined::SUNRISE | undefined::SUNSET) != 0 {
        return;
    }
    let sunset = slab.sunset_raw_ms;
    let next_sunrise = slab.times_ms[lane::SUNRISE] + MS_PER_DAY;
    let night = next_sunrise - sunset;
    if night <= 0.0 {
        return;
    }

    let fallback = match rule {
        HighLatitudeRule::MiddleOfNight => Fallback::MiddleOfNight,
        HighLatitudeRule::SeventhOfNight => Fallback::SeventhOfNight,
        HighLatitudeRule::TwilightAngle => Fallback::TwilightAngle,
        HighLatitudeRule::None => unreachable!(),
    };

    if *mask & undefined::FAJR != 0 {
        let base = match rule {
            HighLatitudeRule::MiddleOfNight => sunset + night / 2.0,
            HighLatitudeRule::SeventhOfNight => next_sunrise - night / 7.0,
            HighLatitudeRule::TwilightAngle => {
                next_sunrise - (location.fajr_angle / 60.0) * night
            }
            HighLatitudeRule::None => unreachable!(),
        };
        slab.times_ms[lane::FAJR] = base + location.adjustments_ms[lane::FAJR];
        slab.fallback[lane::FAJR] = fallback;
        *mask &= !undefined::FAJR;
    }

    if *mask & undefined::ISHA != 0 {
        let base = match rule {
            HighLatitudeRule::MiddleOfNight => sunset + night / 2.0,
            HighLatitudeRule::SeventhOfNight => sunset + night / 7.0,
            HighLatitudeRule::TwilightAngle => {
                sunset + (location.isha_angle / 60.0) * night
            }
            HighLatitudeRule::None => unreachable!(),
        };
        slab.times_ms[lane::ISHA] = base + location.adjustments_ms[lane::ISHA];
        slab.fallback[lane::ISHA] = fallback;
        *mask &= !undefined::ISHA;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DayCache, LocationCache, SolarCache};
    use crate::config::{Configuration, Method};
    use crate::kernel::compute_day;
    use salat_core::Coordinates;
    use salat_solar::julian::julian_day_from_unix_ms;

    // London, 2026-06-21: sunrise/sunset exist but 18/17-degree twilight
    // does not
    fn london_solstice() -> Configuration {
        Configuration::new(
            Coordinates::new(51.5074, -0.1278).unwrap(),
            1_782_000_000_000.0,
            Method::muslim_world_league(),
        )
        .unwrap()
    }

    fn run(config: &Configuration, rule: HighLatitudeRule) -> (DaySlab, u8) {
        let mut solar = SolarCache::new();
        let mut days = DayCache::new();
        let mut locations = LocationCache::new();
        let location = locations.resolve(config);
        let day = days.get_or_compute(julian_day_from_unix_ms(config.date_ms), &mut solar);
        compute_day(&location, &day, rule)
    }

    #[test]
    fn test_none_leaves_undefined() {
        let (_, mask) = run(&london_solstice(), HighLatitudeRule::None);
        assert_ne!(mask & undefined::FAJR, 0);
        assert_ne!(mask & undefined::ISHA, 0);
    }

    #[test]
    fn test_rules_rewrite_both_lanes() {
        for rule in [
            HighLatitudeRule::MiddleOfNight,
            HighLatitudeRule::SeventhOfNight,
            HighLatitudeRule::TwilightAngle,
        ] {
            let (slab, mask) = run(&london_solstice(), rule);
            assert_eq!(mask & (undefined::FAJR | undefined::ISHA), 0, "{rule:?}");
            assert!(slab.times_ms[lane::FAJR].is_finite());
            assert!(slab.times_ms[lane::ISHA].is_finite());
            // Both rewritten lanes live inside the night
            assert!(slab.times_ms[lane::ISHA] > slab.sunset_raw_ms);
            assert!(slab.times_ms[lane::FAJR] > slab.sunset_raw_ms);
            assert!(
                slab.times_ms[lane::FAJR] < slab.times_ms[lane::SUNRISE] + MS_PER_DAY
            );
        }
    }

    #[test]
    fn test_rule_ordering_within_night() {
        // Seventh-of-night isha comes earliest, middle-of-night latest
        let (seventh, _) = run(&london_solstice(), HighLatitudeRule::SeventhOfNight);
        let (middle, _) = run(&london_solstice(), HighLatitudeRule::MiddleOfNight);
        let (twilight, _) = run(&london_solstice(), HighLatitudeRule::TwilightAngle);
        assert!(seventh.times_ms[lane::ISHA] < twilight.times_ms[lane::ISHA]);
        assert!(twilight.times_ms[lane::ISHA] < middle.times_ms[lane::ISHA]);
    }

    #[test]
    fn test_polar_day_declines() {
        // No sunset at all: the rule must not invent times
        let polar = Configuration::new(
            Coordinates::new(71.0, 25.78).unwrap(),
            1_782_000_000_000.0,
            Method::muslim_world_league(),
        )
        .unwrap();
        let (_, mask) = run(&polar, HighLatitudeRule::MiddleOfNight);
        assert_ne!(mask & undefined::FAJR, 0);
        assert_ne!(mask & undefined::ISHA, 0);
    }

    #[test]
    fn test_fallback_flags_recorded() {
        let (slab, _) = run(&london_solstice(), HighLatitudeRule::TwilightAngle);
        assert_eq!(slab.fallback[lane::FAJR], Fallback::TwilightAngle);
        assert_eq!(slab.fallback[lane::ISHA], Fallback::TwilightAngle);
    }

    #[test]
    fn test_defined_twilight_untouched() {
        // Cairo midsummer: fajr/isha exist, the rule must not move them
        let cairo = Configuration::new(
            Coordinates::new(30.0444, 31.2357).unwrap(),
            1_655_769_600_000.0,
            Method::muslim_world_league(),
        )
        .unwrap();
        let (with_rule, _) = run(&cairo, HighLatitudeRule::TwilightAngle);
        let (without, _) = run(&cairo, HighLatitudeRule::None);
        assert_eq!(with_rule.times_ms[lane::FAJR], without.times_ms[lane::FAJR]);
        assert_eq!(with_rule.times_ms[lane::ISHA], without.times_ms[lane::ISHA]);
        assert_eq!(with_rule.fallback[lane::FAJR], Fallback::None);
    }
}
