//! Great-circle bearing to the Kaaba.

use salat_core::angle::{atan2_deg, cos_deg, normalize_degrees, sin_deg, tan_deg};
use salat_core::constants::{KAABA_LATITUDE, KAABA_LONGITUDE};
use salat_core::Coordinates;

/// Initial great-circle bearing from the observer to the Kaaba, degrees
/// clockwise from true north in [0, 360).
///
/// # Example
///
/// ```rust
/// use salat::{compute_qibla, Coordinates};
///
/// let new_york = Coordinates::new(40.7128, -74.006)?;
/// let bearing = compute_qibla(&new_york);
/// assert!((bearing - 58.48).abs() < 0.05);
/// # Ok::<(), salat::CoreError>(())
/// ```
pub fn compute_qibla(coordinates: &Coordinates) -> f64 {
    let longitude_delta = KAABA_LONGITUDE - coordinates.longitude;
    let numerator = sin_deg(longitude_delta);
    let denominator = cos_deg(coordinates.latitude) * tan_deg(KAABA_LATITUDE)
        - sin_deg(coordinates.latitude) * cos_deg(longitude_delta);
    normalize_degrees(atan2_deg(numerator, denominator))
}
