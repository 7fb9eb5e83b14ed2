use crate::types::{Axis, LatticePoint, in_bounds};
use glam::IVec3;
use thiserror::Error;

/// Starting state of one walker: the first segment spans
/// `start -> start + direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkerSeed {
    pub start: LatticePoint,
    pub direction: LatticePoint,
}

impl WalkerSeed {
    pub fn from_origin(direction: LatticePoint) -> Self {
        Self {
            start: IVec3::ZERO,
            direction,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub walkers: Vec<WalkerSeed>,
    /// Steady-state trail length of every walker.
    pub capacity: usize,
    /// Half-extent of the lattice box.
    pub bound: i32,
    /// Duration of one growth or recycle tween, in seconds.
    pub tween_secs: f32,
    /// Self-avoidance rejections allowed before a colliding point is accepted.
    pub avoid_retries: u32,
    /// Base seed for the per-walker RNGs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walkers: vec![
                WalkerSeed::from_origin(IVec3::X),
                WalkerSeed::from_origin(IVec3::NEG_X),
                WalkerSeed::from_origin(IVec3::Y),
            ],
            capacity: 40,
            bound: 5,
            tween_secs: 0.1,
            avoid_retries: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("at least one walker is required")]
    NoWalkers,
    #[error("capacity must be at least 1, got {0}")]
    Capacity(usize),
    #[error("bound must be at least 1, got {0}")]
    Bound(i32),
    #[error("tween duration must be a positive number of seconds, got {0}")]
    TweenDuration(f32),
    #[error("walker {walker}: direction {direction} is not a unit axis vector")]
    Direction {
        walker: usize,
        direction: LatticePoint,
    },
    #[error("{expected} walkers configured but only {got} direction sources given")]
    Sources { expected: usize, got: usize },
    #[error("walker {walker}: seed point {point} lies outside the bound {bound}")]
    SeedOutOfBounds {
        walker: usize,
        point: LatticePoint,
        bound: i32,
    },
}

impl Config {
    /// Checks every construction-time rule.
    ///
    /// ### Returns
    /// - `Ok(())` if a pool can be built from this configuration.
    /// - `Err` with the first rule that is violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.walkers.is_empty() {
            return Err(ConfigError::NoWalkers);
        }
        if self.capacity < 1 {
            return Err(ConfigError::Capacity(self.capacity));
        }
        if self.bound < 1 {
            return Err(ConfigError::Bound(self.bound));
        }
        if !self.tween_secs.is_finite() || self.tween_secs <= 0.0 {
            return Err(ConfigError::TweenDuration(self.tween_secs));
        }

        for (walker, seed) in self.walkers.iter().enumerate() {
            if Axis::from_offset(seed.direction).is_none() {
                return Err(ConfigError::Direction {
                    walker,
                    direction: seed.direction,
                });
            }
            for point in [seed.start, seed.start + seed.direction] {
                if !in_bounds(point, self.bound) {
                    return Err(ConfigError::SeedOutOfBounds {
                        walker,
                        point,
                        bound: self.bound,
                    });
                }
            }
        }
        Ok(())
    }
}
