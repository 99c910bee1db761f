//! Easing functions
//!
//! Maps normalized time `t in [0, 1]` to an eased progress value. The
//! `CubicBezier` variant matches CSS timing functions: the curve runs from
//! (0,0) to (1,1) with two control points, solved for x by Newton iteration
//! with a bisection fallback.

/// An easing curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// No easing
    Linear,
    /// Quadratic ease-in (slow start)
    EaseIn,
    /// Quadratic ease-out (slow end)
    EaseOut,
    /// Quadratic ease-in-out
    EaseInOut,
    /// CSS-style cubic bezier with control points (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The settle curve used by the carousel: a gentle ease-out
    pub fn settle() -> Self {
        Easing::CubicBezier(0.25, 0.46, 0.45, 0.94)
    }

    /// Apply the curve to a normalized time value
    ///
    /// Input is clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// One-dimensional cubic bezier through 0, `c1`, `c2`, 1
fn bezier_axis(t: f32, c1: f32, c2: f32) -> f32 {
    let inv = 1.0 - t;
    3.0 * inv * inv * t * c1 + 3.0 * inv * t * t * c2 + t * t * t
}

fn bezier_axis_derivative(t: f32, c1: f32, c2: f32) -> f32 {
    let inv = 1.0 - t;
    3.0 * inv * inv * c1 + 6.0 * inv * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}

/// Evaluate a CSS cubic-bezier timing function at time `x`
fn cubic_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Solve bezier_x(t) = x for the curve parameter t.
    let mut t = x;
    for _ in 0..8 {
        let error = bezier_axis(t, x1, x2) - x;
        if error.abs() < 1e-5 {
            return bezier_axis(t, y1, y2);
        }
        let slope = bezier_axis_derivative(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
        t = t.clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; fall back to bisection.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..24 {
        let error = bezier_axis(t, x1, x2) - x;
        if error.abs() < 1e-5 {
            break;
        }
        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier_axis(t, y1, y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::settle(),
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_settle_curve_is_ease_out() {
        // An ease-out curve runs ahead of linear in the first half.
        let settle = Easing::settle();
        assert!(settle.apply(0.25) > 0.25);
        assert!(settle.apply(0.5) > 0.5);
    }

    #[test]
    fn test_cubic_bezier_is_monotonic() {
        let settle = Easing::settle();
        let mut prev = 0.0;
        for i in 1..=100 {
            let value = settle.apply(i as f32 / 100.0);
            assert!(value >= prev - 1e-4, "not monotonic at step {i}");
            prev = value;
        }
    }
}
