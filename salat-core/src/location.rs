//! Geographic observer coordinates.
//!
//! Provides the [`Coordinates`] type used by every compute entry point.
//! Values are validated once at construction; the compute path assumes they
//! are in range and finite.

use crate::errors::{CoreError, CoreResult};

/// An observer position on Earth's surface, in degrees.
///
/// - **Latitude**: positive north, [-90, 90]
/// - **Longitude**: positive east, [-180, 180]
///
/// Internally the engine works with the Meeus west-positive longitude
/// convention; that conversion happens at the point of use, not here.
///
/// # Examples
///
/// ```rust
/// use salat_core::Coordinates;
///
/// let mecca = Coordinates::new(21.4225, 39.8262)?;
/// assert_eq!(mecca.latitude, 21.4225);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// # Ok::<(), salat_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, validating range and finiteness.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if either value is NaN/infinite or outside its
    /// documented range.
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !latitude.is_finite() {
            return Err(CoreError::not_finite("latitude", latitude));
        }
        if !longitude.is_finite() {
            return Err(CoreError::not_finite("longitude", longitude));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::out_of_range("latitude", latitude, "[-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::out_of_range(
                "longitude",
                longitude,
                "[-180, 180]",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let c = Coordinates::new(51.5074, -0.1278).unwrap();
        assert_eq!(c.latitude, 51.5074);
        assert_eq!(c.longitude, -0.1278);
    }

    #[test]
    fn test_poles_and_antimeridian_accepted() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(Coordinates::new(90.0001, 0.0).is_err());
        assert!(Coordinates::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(0.0, -200.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(matches!(
            Coordinates::new(f64::NAN, 0.0),
            Err(CoreError::NotFinite { name: "latitude", .. })
        ));
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = Coordinates::new(22.3569, 91.7832).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }
}
