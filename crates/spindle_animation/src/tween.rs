//! Finite eased interpolation
//!
//! A `Tween` runs from a start value to an end value over a fixed duration,
//! shaped by an easing curve. Once finished it pins to the end value.

use crate::easing::Easing;

/// An in-flight eased interpolation between two values
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration_ms` milliseconds
    ///
    /// A zero duration finishes immediately at the end value.
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms as f32,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds; returns true while still running
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed_ms += dt * 1000.0;
        !self.is_finished()
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed_ms / self.duration_ms);
        self.from + (self.to - self.from) * t
    }

    /// Whether the tween has reached its end
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// The end value
    pub fn to(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_end_value() {
        let mut tween = Tween::new(0.0, 10.0, 400, Easing::settle());
        assert_eq!(tween.value(), 0.0);

        // 30 frames at 60fps = 500ms, past the 400ms duration
        for _ in 0..30 {
            tween.tick(1.0 / 60.0);
        }

        assert!(tween.is_finished());
        assert_eq!(tween.value(), 10.0);
    }

    #[test]
    fn test_tween_progresses_monotonically_for_ease_out() {
        let mut tween = Tween::new(2.0, 4.0, 200, Easing::EaseOut);
        let mut prev = tween.value();
        while tween.tick(1.0 / 120.0) {
            let value = tween.value();
            assert!(value >= prev - 1e-4);
            prev = value;
        }
        assert_eq!(tween.value(), 4.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = Tween::new(1.0, 5.0, 0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 5.0);
    }
}
