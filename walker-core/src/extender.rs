//! Path extension: choosing the next lattice point of a walk.
//!
//! A walk advances by one unit step along a random axis. Candidates that
//! leave the lattice box are always redrawn. Candidates that land on an
//! endpoint already present in the walker's chain are redrawn a limited
//! number of times; once that budget is spent the next in-bounds candidate
//! is accepted even if it collides. The walk is therefore only weakly
//! self-avoiding, and a collision is a normal, reported outcome.

use crate::types::{Axis, LatticePoint, in_bounds};
use rand::Rng;

/// A source of unit directions for the extender.
///
/// [`RandomDirections`] is the production implementation; tests provide
/// scripted sequences.
pub trait DirectionSource {
    fn next_axis(&mut self) -> Axis;
}

/// Uniformly random directions drawn from an [`Rng`].
#[derive(Debug)]
pub struct RandomDirections<R> {
    rng: R,
}

impl<R: Rng> RandomDirections<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DirectionSource for RandomDirections<R> {
    fn next_axis(&mut self) -> Axis {
        Axis::ALL[self.rng.random_range(0..Axis::ALL.len())]
    }
}

/// Result of one [`next_point`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extension {
    pub point: LatticePoint,
    /// `true` if `point` equals an existing endpoint, i.e. the avoidance
    /// budget ran out and the fallback fired.
    pub collided: bool,
    /// Number of candidates rejected because they hit an existing endpoint.
    pub rejections: u32,
}

/// Draws the next point of a walk.
///
/// Repeatedly draws an axis from `source` and forms `from + axis`:
///
/// 1. Candidates outside `[-bound, bound]` are discarded and do not count
///    against the retry budget.
/// 2. Candidates equal to any point yielded by `history` are discarded
///    while fewer than `retries` such rejections have happened.
/// 3. The first candidate that passes, or the first in-bounds candidate
///    after the budget is spent, is returned.
///
/// ### Parameters
/// - `history` - Endpoints of the segments currently in the chain. It is
///   iterated once per in-bounds candidate, hence the `Clone` bound.
/// - `from` - The point the new step starts from. Must itself lie inside
///   the box, and `bound` must be at least 1, otherwise no candidate can
///   ever pass step 1.
/// - `bound` - Half-extent of the lattice box.
/// - `retries` - Self-avoidance rejection budget.
/// - `source` - Direction generator.
///
/// ### Returns
/// The accepted point together with whether it collided.
pub fn next_point<I>(
    history: I,
    from: LatticePoint,
    bound: i32,
    retries: u32,
    source: &mut impl DirectionSource,
) -> Extension
where
    I: IntoIterator<Item = LatticePoint>,
    I::IntoIter: Clone,
{
    debug_assert!(bound >= 1 && in_bounds(from, bound));

    let history = history.into_iter();
    let mut rejections = 0;

    loop {
        let candidate = from + source.next_axis().offset();
        if !in_bounds(candidate, bound) {
            continue;
        }

        let collided = history.clone().any(|p| p == candidate);
        if collided && rejections < retries {
            rejections += 1;
            continue;
        }

        return Extension {
            point: candidate,
            collided,
            rejections,
        };
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::IVec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays a fixed list of axes in a loop.
    #[derive(Debug)]
    pub(crate) struct Scripted {
        axes: Vec<Axis>,
        pub drawn: usize,
    }

    impl Scripted {
        pub(crate) fn new(axes: impl IntoIterator<Item = Axis>) -> Self {
            let axes: Vec<Axis> = axes.into_iter().collect();
            assert!(!axes.is_empty(), "script needs at least one axis");
            Self { axes, drawn: 0 }
        }
    }

    impl DirectionSource for Scripted {
        fn next_axis(&mut self) -> Axis {
            let axis = self.axes[self.drawn % self.axes.len()];
            self.drawn += 1;
            axis
        }
    }

    #[test]
    fn boundary_rejects_outward_step() {
        // Walker sits on the +x face; +x is drawn three times before +y.
        let from = IVec3::new(5, 0, 0);
        let mut src = Scripted::new([Axis::PosX, Axis::PosX, Axis::PosX, Axis::PosY]);

        let ext = next_point(std::iter::empty(), from, 5, 10, &mut src);

        assert_eq!(ext.point, IVec3::new(5, 1, 0));
        assert!(!ext.collided);
        // Boundary redraws do not consume the avoidance budget.
        assert_eq!(ext.rejections, 0);
        assert_eq!(src.drawn, 4);
    }

    #[test]
    fn boundary_holds_under_random_draws() {
        let mut src = RandomDirections::new(StdRng::seed_from_u64(7));
        let from = IVec3::new(5, 0, 0);
        for _ in 0..500 {
            let ext = next_point(std::iter::empty(), from, 5, 10, &mut src);
            assert!(ext.point.x <= 5, "stepped out of the box: {}", ext.point);
        }
    }

    #[test]
    fn avoids_existing_endpoint_when_possible() {
        let from = IVec3::ZERO;
        let history = [IVec3::X];
        let mut src = Scripted::new([Axis::PosX, Axis::NegY]);

        let ext = next_point(history, from, 5, 10, &mut src);

        assert_eq!(ext.point, IVec3::NEG_Y);
        assert!(!ext.collided);
        assert_eq!(ext.rejections, 1);
    }

    #[test]
    fn fallback_fires_only_after_budget_is_spent() {
        let from = IVec3::ZERO;
        let history = [IVec3::X];

        // Ten colliding draws followed by a free one: budget not exceeded.
        let mut script = vec![Axis::PosX; 10];
        script.push(Axis::PosZ);
        let mut src = Scripted::new(script);
        let ext = next_point(history, from, 5, 10, &mut src);
        assert_eq!(ext.point, IVec3::Z);
        assert!(!ext.collided);
        assert_eq!(ext.rejections, 10);

        // Eleven consecutive collisions: the eleventh is accepted.
        let mut src = Scripted::new(vec![Axis::PosX; 11]);
        let ext = next_point(history, from, 5, 10, &mut src);
        assert_eq!(ext.point, IVec3::X);
        assert!(ext.collided);
        assert_eq!(ext.rejections, 10);
        assert_eq!(src.drawn, 11);
    }

    #[test]
    fn zero_budget_accepts_first_in_bounds_candidate() {
        let mut src = Scripted::new([Axis::PosX]);
        let ext = next_point([IVec3::X], IVec3::ZERO, 5, 0, &mut src);
        assert!(ext.collided);
        assert_eq!(src.drawn, 1);
    }

    #[test]
    fn random_directions_cover_all_axes() {
        let mut src = RandomDirections::new(StdRng::seed_from_u64(42));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(src.next_axis());
        }
        assert_eq!(seen.len(), 6);
    }
}
