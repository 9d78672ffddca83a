//! Night-division times for supererogatory prayer.

/// The two sunnah night points derived from a sunset and the following fajr.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunnahTimes {
    /// Midpoint of the night, epoch ms
    pub middle_of_night_ms: f64,
    /// Start of the last third of the night, epoch ms
    pub last_third_of_night_ms: f64,
}

/// Divides the night between a sunset and the next day's fajr.
///
/// Pure arithmetic; the caller supplies the two anchors, typically today's
/// raw sunset and tomorrow's fajr.
///
/// # Example
///
/// ```rust
/// use salat::compute_sunnah_times;
///
/// let sunset = 0.0;
/// let next_fajr = 9.0 * 3_600_000.0; // nine-hour night
/// let sunnah = compute_sunnah_times(sunset, next_fajr);
/// assert_eq!(sunnah.middle_of_night_ms, 4.5 * 3_600_000.0);
/// assert_eq!(sunnah.last_third_of_night_ms, 6.0 * 3_600_000.0);
/// ```
pub fn compute_sunnah_times(sunset_ms: f64, next_fajr_ms: f64) -> SunnahTimes {
    let night = next_fajr_ms - sunset_ms;
    SunnahTimes {
        middle_of_night_ms: sunset_ms + night / 2.0,
        last_third_of_night_ms: sunset_ms + night * 2.0 / 3.0,
    }
}
