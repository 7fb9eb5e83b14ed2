/// Easing curve applied to tween progress.
///
/// Only linear easing is used by the walkers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
        }
    }
}

/// Timed interpolation of a single scalar.
///
/// Progress only moves forward and is advanced explicitly by the caller;
/// there is no clock inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::Linear,
            elapsed: 0.0,
        }
    }

    /// Advances by `dt` seconds and returns the new progress.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.progress()
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> f32 {
        let t = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_interpolation() {
        let mut t = Tween::new(0.0, 1.0, 0.1);
        assert_eq!(t.value(), 0.0);

        t.advance(0.05);
        assert!((t.value() - 0.5).abs() < 1e-6);
        assert!(!t.is_finished());

        t.advance(0.05);
        assert_eq!(t.value(), 1.0);
        assert!(t.is_finished());
    }

    #[test]
    fn progress_saturates() {
        let mut t = Tween::new(1.0, 0.0, 0.1);
        t.advance(10.0);
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn bad_dt_does_not_move_progress() {
        let mut t = Tween::new(0.0, 1.0, 1.0);
        t.advance(0.25);
        t.advance(-1.0);
        t.advance(f32::NAN);
        t.advance(f32::INFINITY);
        assert!((t.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut t = Tween::new(0.0, 1.0, 0.3);
        let mut last = 0.0;
        for _ in 0..20 {
            let p = t.advance(0.016);
            assert!(p >= last);
            last = p;
        }
        assert!(t.is_finished());
    }
}
