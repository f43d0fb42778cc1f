//! # Curve Interpolation Module
//!
//! Shaped segments between two points, used to sample pitch and automation
//! curves. Every shape can be evaluated forward (value at a time) and
//! inverted (time at which a value is reached).
//!
//! The eased shapes are built from quarter and half sine waves so they stay
//! monotonic and continuous between the endpoints.

use std::f64::consts::{FRAC_PI_2, PI};

/// Segments narrower than this evaluate to their end value.
const MIN_WIDTH: f64 = 0.001;

/// Shape of the curve leaving a pitch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PitchPointShape {
    #[default]
    Linear,
    /// Starts flat, ends steep (quarter cosine).
    EaseIn,
    /// Starts steep, ends flat (quarter sine).
    EaseOut,
    /// Flat at both ends (half cosine).
    EaseInOut,
}

/// A curve segment from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Segment {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// True when the segment is too narrow to evaluate, including when
    /// `x1` lies before `x0`.
    pub fn is_degenerate(&self) -> bool {
        self.x1 - self.x0 < MIN_WIDTH
    }

    fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Position of `x` across the segment, 0 at `x0` and 1 at `x1`.
    fn progress(&self, x: f64) -> f64 {
        (x - self.x0) / self.width()
    }

    /// Position of `y` across the segment's value range.
    fn level(&self, y: f64) -> f64 {
        (y - self.y0) / self.height()
    }

    /// Maps a progress value back into the `x` domain.
    fn at_progress(&self, t: f64) -> f64 {
        t * self.width() + self.x0
    }
}

impl PitchPointShape {
    /// Evaluates the curve at `x`.
    ///
    /// Degenerate segments (see [`Segment::is_degenerate`]) return `y1`.
    pub fn interpolate(self, segment: &Segment, x: f64) -> f64 {
        if segment.is_degenerate() {
            return segment.y1;
        }
        let t = segment.progress(x);
        let eased = match self {
            Self::Linear => t,
            Self::EaseIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::EaseOut => (t * FRAC_PI_2).sin(),
            Self::EaseInOut => (1.0 - (t * PI).cos()) / 2.0,
        };
        segment.y0 + segment.height() * eased
    }

    /// Finds the `x` at which the curve reaches `y`.
    ///
    /// The segment must not be degenerate and `y0` must differ from `y1`;
    /// otherwise the result is not a meaningful position (typically NaN or
    /// infinite). `y` outside the segment's value range also yields NaN for
    /// the eased shapes.
    pub fn invert(self, segment: &Segment, y: f64) -> f64 {
        let level = segment.level(y);
        let t = match self {
            Self::Linear => level,
            Self::EaseIn => (1.0 - level).acos() / FRAC_PI_2,
            Self::EaseOut => level.asin() / FRAC_PI_2,
            Self::EaseInOut => (1.0 - level * 2.0).acos() / PI,
        };
        segment.at_progress(t)
    }
}

/// Evaluates `shape` over the segment `(x0, y0)`-`(x1, y1)` at `x`.
pub fn interpolate_shape(
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    x: f64,
    shape: PitchPointShape,
) -> f64 {
    shape.interpolate(&Segment::new(x0, y0, x1, y1), x)
}

/// Inverse of [`interpolate_shape`]: the `x` at which the curve reaches `y`.
pub fn interpolate_shape_x(
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    y: f64,
    shape: PitchPointShape,
) -> f64 {
    shape.invert(&Segment::new(x0, y0, x1, y1), y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SHAPES: [PitchPointShape; 4] = [
        PitchPointShape::Linear,
        PitchPointShape::EaseIn,
        PitchPointShape::EaseOut,
        PitchPointShape::EaseInOut,
    ];

    #[test]
    fn test_endpoints() {
        let segment = Segment::new(10.0, -3.0, 20.0, 5.0);
        for shape in SHAPES {
            assert_abs_diff_eq!(shape.interpolate(&segment, 10.0), -3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(shape.interpolate(&segment, 20.0), 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_midpoints() {
        let segment = Segment::new(0.0, 0.0, 1.0, 1.0);
        let mid = |shape: PitchPointShape| shape.interpolate(&segment, 0.5);
        assert_abs_diff_eq!(mid(PitchPointShape::Linear), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mid(PitchPointShape::EaseInOut), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(
            mid(PitchPointShape::EaseIn),
            1.0 - 0.5_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            mid(PitchPointShape::EaseOut),
            0.5_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_segment_returns_end_value() {
        for shape in SHAPES {
            let narrow = Segment::new(1.0, 2.0, 1.0005, 7.0);
            assert_eq!(shape.interpolate(&narrow, 1.0), 7.0);
            let reversed = Segment::new(5.0, 2.0, 4.0, 7.0);
            assert_eq!(shape.interpolate(&reversed, 4.5), 7.0);
        }
    }

    #[test]
    fn test_forward_then_inverse() {
        let segment = Segment::new(100.0, 60.0, 220.0, 48.0);
        for shape in SHAPES {
            for x in [105.0, 130.0, 160.0, 199.0, 219.0] {
                let y = shape.interpolate(&segment, x);
                assert_abs_diff_eq!(shape.invert(&segment, y), x, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_eased_shapes_are_monotonic() {
        let segment = Segment::new(0.0, 0.0, 1.0, 10.0);
        for shape in SHAPES {
            let samples: Vec<f64> = (0..=100)
                .map(|i| shape.interpolate(&segment, i as f64 / 100.0))
                .collect();
            assert!(
                samples.windows(2).all(|w| w[1] >= w[0]),
                "{shape:?} not monotonic"
            );
        }
    }

    #[test]
    fn test_flat_segment_inverse_is_not_a_position() {
        let flat = Segment::new(0.0, 1.0, 1.0, 1.0);
        assert!(!PitchPointShape::Linear.invert(&flat, 1.0).is_finite());
    }

    #[test]
    fn test_free_function_argument_order() {
        let y = interpolate_shape(0.0, 4.0, 1.0, 3.0, 1.0, PitchPointShape::Linear);
        assert_abs_diff_eq!(y, 1.5);
        let x = interpolate_shape_x(0.0, 4.0, 1.0, 3.0, 1.5, PitchPointShape::Linear);
        assert_abs_diff_eq!(x, 1.0);
    }
}
