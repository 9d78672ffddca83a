//! Calculation configuration: method angles, jurisprudence options, and
//! per-prayer minute adjustments.
//!
//! A [`Configuration`] is immutable once built and cheap to copy. Validation
//! happens in the constructors; the kernel assumes every field is in range.

use salat_core::Coordinates;

use crate::errors::{ConfigError, ConfigResult};

/// Shadow-length school for the afternoon prayer.
///
/// Maps to the shadow factor in the target-altitude formula: the afternoon
/// event falls when an object's shadow exceeds its noon shadow by its own
/// length (factor 1) or twice its length (factor 2). The Hanafi computation
/// lands 30 to 90 minutes after the majority one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Madhab {
    /// Shadow factor 1 (Shafi, Maliki, Hanbali)
    #[default]
    Standard,
    /// Shadow factor 2
    Hanafi,
}

impl Madhab {
    /// The shadow factor this school uses.
    #[inline]
    pub fn shadow_factor(self) -> f64 {
        match self {
            Madhab::Standard => 1.0,
            Madhab::Hanafi => 2.0,
        }
    }
}

/// Strategy for assigning dawn and dusk when the sun never reaches the
/// configured depression angle (seasonal failure band at high latitudes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighLatitudeRule {
    /// Dawn and dusk at the midpoint of the night
    MiddleOfNight,
    /// Dawn in the last seventh of the night, dusk in the first seventh
    SeventhOfNight,
    /// Night fraction proportional to the configured twilight angle
    TwilightAngle,
    /// Leave undefined events undefined
    #[default]
    None,
}

/// Resolution strategy inside the polar circles.
///
/// Only [`Unresolved`](PolarCircleResolution::Unresolved) is implemented by
/// the kernel; the other values are accepted and ignored, reserved for
/// external resolvers that substitute a reference location or date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolarCircleResolution {
    /// No substitution; events may be undefined
    #[default]
    Unresolved,
    /// Reserved: nearest location where the event occurs
    AqrabBalad,
    /// Reserved: nearest date where the event occurs
    AqrabYaum,
}

/// Definition of solar midnight. Single option, present for forward
/// compatibility of the configuration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidnightMode {
    /// Midpoint between sunset and next sunrise
    #[default]
    Standard,
}

/// Signed minute offsets applied to each prayer after the astronomy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeAdjustments {
    /// Minutes added to fajr
    pub fajr: f64,
    /// Minutes added to sunrise
    pub sunrise: f64,
    /// Minutes added to dhuhr
    pub dhuhr: f64,
    /// Minutes added to asr
    pub asr: f64,
    /// Minutes added to maghrib
    pub maghrib: f64,
    /// Minutes added to isha
    pub isha: f64,
}

/// Twilight parameters of a calculation method.
///
/// Exactly one of `isha_angle` and a present, nonzero
/// `isha_interval_minutes` governs isha: with an interval, isha is maghrib
/// plus that many minutes and the angle is unused.
///
/// `maghrib_angle` is carried for schema completeness and ignored by the
/// kernel (maghrib is sunset plus the maghrib adjustment).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    /// Solar depression angle for dawn, degrees below the horizon
    pub fajr_angle: f64,
    /// Solar depression angle for dusk, degrees below the horizon
    pub isha_angle: f64,
    /// Fixed isha offset after maghrib, minutes; overrides the angle when
    /// present and nonzero
    pub isha_interval_minutes: Option<f64>,
    /// Reserved maghrib depression angle; ignored by the kernel
    pub maghrib_angle: Option<f64>,
}

impl Method {
    /// A method defined by a pair of twilight angles.
    pub fn new(fajr_angle: f64, isha_angle: f64) -> Self {
        Self {
            fajr_angle,
            isha_angle,
            isha_interval_minutes: None,
            maghrib_angle: None,
        }
    }

    /// A method defined by a dawn angle and a fixed isha interval.
    pub fn with_isha_interval(fajr_angle: f64, interval_minutes: f64) -> Self {
        Self {
            fajr_angle,
            isha_angle: 0.0,
            isha_interval_minutes: Some(interval_minutes),
            maghrib_angle: None,
        }
    }

    /// The isha interval, when present and nonzero.
    #[inline]
    pub(crate) fn governing_isha_interval(&self) -> Option<f64> {
        self.isha_interval_minutes.filter(|minutes| *minutes != 0.0)
    }

    /// Muslim World League: 18 / 17.
    pub fn muslim_world_league() -> Self {
        Self::new(18.0, 17.0)
    }

    /// Egyptian General Authority of Survey: 19.5 / 17.5.
    pub fn egyptian() -> Self {
        Self::new(19.5, 17.5)
    }

    /// University of Islamic Sciences, Karachi: 18 / 18.
    pub fn karachi() -> Self {
        Self::new(18.0, 18.0)
    }

    /// Umm al-Qura University, Makkah: 18.5 dawn, isha 90 minutes after
    /// maghrib.
    pub fn umm_al_qura() -> Self {
        Self::with_isha_interval(18.5, 90.0)
    }

    /// UAE General Authority of Islamic Affairs: 18.2 / 18.2.
    pub fn dubai() -> Self {
        Self::new(18.2, 18.2)
    }

    /// Moonsighting Committee Worldwide base angles: 18 / 18.
    pub fn moonsighting_committee() -> Self {
        Self::new(18.0, 18.0)
    }

    /// Islamic Society of North America: 15 / 15.
    pub fn north_america() -> Self {
        Self::new(15.0, 15.0)
    }

    /// Kuwait: 18 / 17.5.
    pub fn kuwait() -> Self {
        Self::new(18.0, 17.5)
    }

    /// Qatar: 18 dawn, isha 90 minutes after maghrib.
    pub fn qatar() -> Self {
        Self::with_isha_interval(18.0, 90.0)
    }

    /// Singapore: 20 / 18.
    pub fn singapore() -> Self {
        Self::new(20.0, 18.0)
    }

    /// Zero-angle template for fully custom parameters.
    pub fn other() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Complete input for one compute call.
///
/// Construct with [`Configuration::new`] and refine with the builder-style
/// setters. The value is `Copy`; the engine never mutates it.
///
/// # Example
///
/// ```rust
/// use salat::{Configuration, Coordinates, HighLatitudeRule, Madhab, Method};
///
/// let config = Configuration::new(
///     Coordinates::new(51.5074, -0.1278)?,
///     1_782_000_000_000.0, // 2026-06-21 UTC midnight
///     Method::muslim_world_league(),
/// )?
/// .with_madhab(Madhab::Hanafi)
/// .with_high_latitude_rule(HighLatitudeRule::TwilightAngle);
/// # Ok::<(), salat::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Observer position
    pub coordinates: Coordinates,
    /// UTC midnight of the civil date, epoch milliseconds
    pub date_ms: f64,
    /// Twilight method parameters
    pub method: Method,
    /// Afternoon shadow school
    pub madhab: Madhab,
    /// High-latitude dawn/dusk strategy
    pub high_latitude_rule: HighLatitudeRule,
    /// Polar-circle resolution (reserved values accepted, ignored)
    pub polar_circle_resolution: PolarCircleResolution,
    /// Midnight definition
    pub midnight_mode: MidnightMode,
    /// Per-prayer minute offsets
    pub adjustments: TimeAdjustments,
    /// Observer elevation above sea level, meters
    pub elevation: f64,
}

impl Configuration {
    /// Create a configuration with defaults for everything beyond position,
    /// date, and method.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDate`] for a non-finite date. The
    /// coordinates were validated at their own construction.
    pub fn new(coordinates: Coordinates, date_ms: f64, method: Method) -> ConfigResult<Self> {
        if !date_ms.is_finite() {
            return Err(ConfigError::InvalidDate(date_ms));
        }
        Ok(Self {
            coordinates,
            date_ms,
            method,
            madhab: Madhab::default(),
            high_latitude_rule: HighLatitudeRule::default(),
            polar_circle_resolution: PolarCircleResolution::default(),
            midnight_mode: MidnightMode::default(),
            adjustments: TimeAdjustments::default(),
            elevation: 0.0,
        })
    }

    /// Set the observer elevation in meters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidElevation`] for NaN, infinite, or
    /// negative values.
    pub fn with_elevation(mut self, elevation: f64) -> ConfigResult<Self> {
        if !elevation.is_finite() || elevation < 0.0 {
            return Err(ConfigError::InvalidElevation(elevation));
        }
        self.elevation = elevation;
        Ok(self)
    }

    /// Set the afternoon shadow school.
    pub fn with_madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    /// Set the high-latitude dawn/dusk strategy.
    pub fn with_high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = rule;
        self
    }

    /// Set the per-prayer minute adjustments.
    pub fn with_adjustments(mut self, adjustments: TimeAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Set the polar-circle resolution option.
    pub fn with_polar_circle_resolution(mut self, resolution: PolarCircleResolution) -> Self {
        self.polar_circle_resolution = resolution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new(30.0444, 31.2357).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::new(coords(), 0.0, Method::egyptian()).unwrap();
        assert_eq!(config.madhab, Madhab::Standard);
        assert_eq!(config.high_latitude_rule, HighLatitudeRule::None);
        assert_eq!(config.elevation, 0.0);
        assert_eq!(config.adjustments, TimeAdjustments::default());
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(matches!(
            Configuration::new(coords(), f64::NAN, Method::egyptian()),
            Err(ConfigError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_invalid_elevation_rejected() {
        let config = Configuration::new(coords(), 0.0, Method::egyptian()).unwrap();
        assert!(config.with_elevation(-1.0).is_err());
        assert!(config.with_elevation(f64::NAN).is_err());
        assert!(config.with_elevation(1650.0).is_ok());
    }

    #[test]
    fn test_shadow_factors() {
        assert_eq!(Madhab::Standard.shadow_factor(), 1.0);
        assert_eq!(Madhab::Hanafi.shadow_factor(), 2.0);
    }

    #[test]
    fn test_interval_governs_only_when_nonzero() {
        assert_eq!(
            Method::umm_al_qura().governing_isha_interval(),
            Some(90.0)
        );
        assert_eq!(Method::muslim_world_league().governing_isha_interval(), None);

        let mut zero_interval = Method::new(18.0, 17.0);
        zero_interval.isha_interval_minutes = Some(0.0);
        assert_eq!(zero_interval.governing_isha_interval(), None);
    }

    #[test]
    fn test_preset_angles() {
        assert_eq!(Method::muslim_world_league().fajr_angle, 18.0);
        assert_eq!(Method::muslim_world_league().isha_angle, 17.0);
        assert_eq!(Method::egyptian().fajr_angle, 19.5);
        assert_eq!(Method::north_america().isha_angle, 15.0);
        assert_eq!(Method::qatar().isha_interval_minutes, Some(90.0));
        assert_eq!(Method::other().fajr_angle, 0.0);
        assert_eq!(Method::other().isha_angle, 0.0);
        assert_eq!(Method::other().isha_interval_minutes, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_configuration_serde_round_trip() {
        let original = Configuration::new(coords(), 1_750_000_000_000.0, Method::karachi())
            .unwrap()
            .with_madhab(Madhab::Hanafi);
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }
}
