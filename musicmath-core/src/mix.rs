//! # Mixing Helpers
//!
//! Gain and pan conversions used by track faders.

/// Converts a gain in decibels to a linear amplitude factor.
pub fn decibel_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Converts a linear amplitude factor to decibels. `0.0` maps to negative infinity.
pub fn linear_to_decibel(v: f64) -> f64 {
    v.log10() * 20.0
}

/// Splits a pan position into left and right channel volumes.
///
/// `pan` runs from -100 (hard left) to 100 (hard right). Both results lie
/// in `[-1, 0]`; panning toward a side raises that side from `-1` to `0`.
///
/// # Returns
/// * `(left, right)` - e.g. centre `(-1, -1)`, hard right `(0, -1)`
pub fn pan_to_channel_volumes(pan: f32) -> (f32, f32) {
    let left = (pan.max(0.0) - 100.0) / 100.0;
    let right = (pan.min(0.0) + 100.0) / -100.0;
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_decibel_reference_points() {
        assert_relative_eq!(decibel_to_linear(0.0), 1.0);
        assert_relative_eq!(decibel_to_linear(20.0), 10.0);
        assert_relative_eq!(
            decibel_to_linear(-6.0),
            0.501_187_233_6,
            max_relative = 1e-9
        );
        assert_abs_diff_eq!(linear_to_decibel(1.0), 0.0);
        assert_eq!(linear_to_decibel(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_decibel_roundtrip() {
        for v in [1e-6, 0.25, 1.0, 3.7, 1000.0] {
            assert_relative_eq!(
                decibel_to_linear(linear_to_decibel(v)),
                v,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_pan() {
        assert_eq!(pan_to_channel_volumes(0.0), (-1.0, -1.0));
        assert_eq!(pan_to_channel_volumes(100.0), (0.0, -1.0));
        assert_eq!(pan_to_channel_volumes(-100.0), (-1.0, 0.0));
        assert_eq!(pan_to_channel_volumes(50.0), (-0.5, -1.0));
    }
}
