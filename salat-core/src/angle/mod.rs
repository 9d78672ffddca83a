//! Degree-domain angle primitives.
//!
//! The solar series and the hour-angle kernel work in degrees throughout;
//! these wrappers keep the call sites free of unit conversions. None of the
//! functions here allocate, and all are pure.
//!
//! Two families are provided:
//!
//! - native wrappers ([`sin_deg`], [`cos_deg`], [`tan_deg`], [`asin_deg`],
//!   [`atan2_deg`]) that convert and delegate to `f64` intrinsics;
//! - table-backed evaluation in [`tables`] for the hot-path sin/cos/acos/atan
//!   lookups.

mod normalize;
pub mod tables;

pub use normalize::{normalize_degrees, quadrant_shift};

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};

/// Sine of an angle given in degrees.
#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    (deg * DEG_TO_RAD).sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    (deg * DEG_TO_RAD).cos()
}

/// Tangent of an angle given in degrees.
#[inline]
pub fn tan_deg(deg: f64) -> f64 {
    (deg * DEG_TO_RAD).tan()
}

/// Arcsine in degrees.
#[inline]
pub fn asin_deg(x: f64) -> f64 {
    x.asin() * RAD_TO_DEG
}

/// Four-quadrant arctangent in degrees.
#[inline]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_deg() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-12);
        assert!((sin_deg(90.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cos_deg() {
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-12);
        assert!(cos_deg(90.0).abs() < 1e-12);
    }

    #[test]
    fn test_tan_deg() {
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_asin_deg() {
        assert!((asin_deg(1.0) - 90.0).abs() < 1e-12);
        assert!((asin_deg(0.5) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_atan2_deg_quadrants() {
        assert!((atan2_deg(1.0, 1.0) - 45.0).abs() < 1e-12);
        assert!((atan2_deg(1.0, -1.0) - 135.0).abs() < 1e-12);
        assert!((atan2_deg(-1.0, -1.0) + 135.0).abs() < 1e-12);
    }

}
