//! Trigonometric lookup tables with linear interpolation.
//!
//! The compute kernel evaluates sin/cos of bounded degree arguments and
//! acos/atan of pre-clamped arguments thousands of times per batch. The
//! tables below trade a few tens of kilobytes of process memory for
//! transcendental-free evaluation on those paths.
//!
//! Grid densities are load-bearing: the sine grid at 5 samples per degree and
//! the inverse grids at 4096 samples per half-range keep every engine output
//! within one second of a native-trig reference across the regression
//! baseline (20 locations x 365 days x 2 shadow factors). Do not thin them.
//!
//! Arguments outside the sine table's domain fall back to native trig; the
//! inverse tables clamp their argument to [-1, 1] before indexing.

use std::sync::LazyLock;

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};

/// Lower bound of the sine table domain, degrees.
const SIN_MIN_DEG: f64 = -540.0;

/// Upper bound of the sine table domain, degrees.
const SIN_MAX_DEG: f64 = 630.0;

/// Samples per degree in the sine table.
const SIN_SAMPLES_PER_DEG: f64 = 5.0;

const SIN_LEN: usize = ((SIN_MAX_DEG - SIN_MIN_DEG) as usize) * 5 + 1;

/// Samples per half-range ([0, 1]) in the acos/atan tables.
const INVERSE_SAMPLES_PER_HALF: f64 = 4096.0;

const INVERSE_LEN: usize = 4096 * 2 + 1;

static SIN_TABLE: LazyLock<Box<[f64]>> = LazyLock::new(|| {
    let mut table = vec![0.0f64; SIN_LEN];
    for (i, slot) in table.iter_mut().enumerate() {
        let deg = SIN_MIN_DEG + i as f64 / SIN_SAMPLES_PER_DEG;
        *slot = (deg * DEG_TO_RAD).sin();
    }
    table.into_boxed_slice()
});

static ACOS_TABLE: LazyLock<Box<[f64]>> = LazyLock::new(|| {
    let mut table = vec![0.0f64; INVERSE_LEN];
    for (i, slot) in table.iter_mut().enumerate() {
        let x = -1.0 + i as f64 / INVERSE_SAMPLES_PER_HALF;
        *slot = x.acos() * RAD_TO_DEG;
    }
    table.into_boxed_slice()
});

static ATAN_TABLE: LazyLock<Box<[f64]>> = LazyLock::new(|| {
    let mut table = vec![0.0f64; INVERSE_LEN];
    for (i, slot) in table.iter_mut().enumerate() {
        let x = -1.0 + i as f64 / INVERSE_SAMPLES_PER_HALF;
        *slot = x.atan() * RAD_TO_DEG;
    }
    table.into_boxed_slice()
});

#[inline]
fn lerp(table: &[f64], index: f64) -> f64 {
    let i = index as usize;
    let frac = index - i as f64;
    let a = table[i];
    let b = table[i + 1];
    a + frac * (b - a)
}

/// Table-backed sine of an angle in degrees.
///
/// Falls back to native trig outside [-540, 630], which only happens on
/// caller error; all intermediate kernel values are bounded to the domain.
#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    let index = (deg - SIN_MIN_DEG) * SIN_SAMPLES_PER_DEG;
    if index < 0.0 || index >= (SIN_LEN - 1) as f64 {
        return (deg * DEG_TO_RAD).sin();
    }
    lerp(&SIN_TABLE, index)
}

/// Table-backed cosine of an angle in degrees.
///
/// Reuses the sine table through the identity cos(x) = sin(x + 90), shifting
/// the index base instead of the argument.
#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    let index = (deg + 90.0 - SIN_MIN_DEG) * SIN_SAMPLES_PER_DEG;
    if index < 0.0 || index >= (SIN_LEN - 1) as f64 {
        return (deg * DEG_TO_RAD).cos();
    }
    lerp(&SIN_TABLE, index)
}

/// Table-backed arccosine, returning degrees.
///
/// The argument is clamped to [-1, 1] before indexing; callers apply the
/// epsilon-clamp policy first, so anything beyond the snap band never
/// reaches this function.
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    let x = x.clamp(-1.0, 1.0);
    let index = (x + 1.0) * INVERSE_SAMPLES_PER_HALF;
    if index >= (INVERSE_LEN - 1) as f64 {
        return 0.0;
    }
    lerp(&ACOS_TABLE, index)
}

/// Table-backed arctangent over [-1, 1], returning degrees.
///
/// Only valid for arguments in [-1, 1]; the single caller (the shadow-factor
/// altitude) is bounded to (0, 1].
#[inline]
pub fn atan_deg(x: f64) -> f64 {
    let x = x.clamp(-1.0, 1.0);
    let index = (x + 1.0) * INVERSE_SAMPLES_PER_HALF;
    if index >= (INVERSE_LEN - 1) as f64 {
        return 45.0;
    }
    lerp(&ATAN_TABLE, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_table_matches_native() {
        let mut deg = -540.0;
        while deg <= 630.0 {
            let native = (deg * DEG_TO_RAD).sin();
            assert!(
                (sin_deg(deg) - native).abs() < 2e-6,
                "sin table error at {deg} deg"
            );
            deg += 0.37;
        }
    }

    #[test]
    fn test_cos_table_matches_native() {
        let mut deg = -540.0;
        while deg <= 540.0 {
            let native = (deg * DEG_TO_RAD).cos();
            assert!(
                (cos_deg(deg) - native).abs() < 2e-6,
                "cos table error at {deg} deg"
            );
            deg += 0.41;
        }
    }

    #[test]
    fn test_sin_out_of_range_falls_back() {
        assert!((sin_deg(1000.0) - (1000.0 * DEG_TO_RAD).sin()).abs() < 1e-15);
        assert!((sin_deg(-1000.0) - (-1000.0 * DEG_TO_RAD).sin()).abs() < 1e-15);
    }

    #[test]
    fn test_acos_table_matches_native() {
        let mut x: f64 = -1.0;
        while x <= 1.0 {
            let native = x.acos() * RAD_TO_DEG;
            assert!(
                (acos_deg(x) - native).abs() < 5e-2,
                "acos table error at {x}"
            );
            x += 0.0013;
        }
    }

    #[test]
    fn test_acos_endpoints() {
        assert!((acos_deg(-1.0) - 180.0).abs() < 1e-9);
        assert!(acos_deg(1.0).abs() < 1e-9);
        // Beyond-range inputs are clamped, not extrapolated
        assert!((acos_deg(-1.5) - 180.0).abs() < 1e-9);
        assert!(acos_deg(1.5).abs() < 1e-9);
    }

    #[test]
    fn test_atan_table_matches_native() {
        let mut x: f64 = -1.0;
        while x <= 1.0 {
            let native = x.atan() * RAD_TO_DEG;
            assert!(
                (atan_deg(x) - native).abs() < 1e-3,
                "atan table error at {x}"
            );
            x += 0.0017;
        }
    }

    #[test]
    fn test_atan_endpoints() {
        assert!((atan_deg(1.0) - 45.0).abs() < 1e-9);
        assert!((atan_deg(-1.0) + 45.0).abs() < 1e-9);
    }
}
