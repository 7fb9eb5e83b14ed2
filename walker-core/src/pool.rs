//! A fixed set of independent walkers driven by one frame clock.

use crate::{
    animator::{TickOutcome, Walker},
    config::{Config, ConfigError},
    extender::{DirectionSource, RandomDirections},
    segment::SegmentTransform,
    types::WalkerId,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

/// Owns every walker and fans each frame tick out to all of them.
///
/// The set of walkers is fixed at construction. Walkers share no state,
/// including their random sources, so the order they are ticked in does
/// not affect the outcome.
#[derive(Debug)]
pub struct WalkerPool<S = RandomDirections<StdRng>> {
    walkers: Vec<Walker<S>>,
    disposed: bool,
}

impl WalkerPool {
    /// Builds a pool with one random direction source per walker.
    ///
    /// With `cfg.seed = Some(s)`, walker `i` is seeded with `s + i`;
    /// otherwise every walker is seeded from OS entropy.
    ///
    /// ### Returns
    /// - `Ok(pool)` with every walker idle at its seed segment.
    /// - `Err` if `cfg` fails [`Config::validate`].
    pub fn new(cfg: &Config) -> Result<Self, ConfigError> {
        let sources = (0..cfg.walkers.len()).map(|i| {
            let rng = match cfg.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_os_rng(),
            };
            RandomDirections::new(rng)
        });
        Self::with_sources(cfg, sources)
    }
}

impl<S: DirectionSource> WalkerPool<S> {
    /// Builds a pool taking one direction source per configured walker,
    /// in order.
    ///
    /// Surplus sources are ignored.
    ///
    /// ### Returns
    /// - `Ok(pool)` with exactly one walker per [`Config::walkers`] entry.
    /// - `Err` if `cfg` fails [`Config::validate`], or
    ///   [`ConfigError::Sources`] if `sources` runs out before every
    ///   walker has one.
    pub fn with_sources(
        cfg: &Config,
        sources: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let walkers: Vec<Walker<S>> = cfg
            .walkers
            .iter()
            .zip(sources)
            .enumerate()
            .map(|(id, (seed, source))| Walker::new(id, seed, cfg, source))
            .collect();

        if walkers.len() < cfg.walkers.len() {
            return Err(ConfigError::Sources {
                expected: cfg.walkers.len(),
                got: walkers.len(),
            });
        }

        info!(
            walkers = walkers.len(),
            capacity = cfg.capacity,
            bound = cfg.bound,
            "walker pool created"
        );

        Ok(Self {
            walkers,
            disposed: false,
        })
    }

    pub fn walkers(&self) -> &[Walker<S>] {
        &self.walkers
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Advances every walker by `dt` seconds, in id order.
    ///
    /// ### Returns
    /// The outcome for each walker, indexed by [`WalkerId`].
    pub fn tick(&mut self, dt: f32) -> Vec<TickOutcome> {
        self.walkers.iter_mut().map(|w| w.tick(dt)).collect()
    }

    /// Current transforms of every segment of every walker.
    ///
    /// Walkers are visited in id order and segments in storage order. The
    /// sequence is lazy and yields at most `walkers * capacity` items.
    pub fn transforms(&self) -> impl Iterator<Item = (WalkerId, SegmentTransform)> + '_ {
        self.walkers
            .iter()
            .flat_map(|w| w.transforms().map(move |t| (w.id(), t)))
    }

    /// Total number of segments currently alive across all walkers.
    pub fn segment_count(&self) -> usize {
        self.walkers.iter().map(|w| w.buffer().len()).sum()
    }

    /// Total number of avoidance fallbacks taken across all walkers.
    pub fn fallbacks(&self) -> u64 {
        self.walkers.iter().map(Walker::fallbacks).sum()
    }

    /// Cancels every in-flight cycle and stops all further ticking.
    ///
    /// Completion effects of cancelled cycles never run. Calling this more
    /// than once is harmless.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let in_flight = self.walkers.iter().filter(|w| w.is_busy()).count();
        for w in &mut self.walkers {
            w.cancel();
        }
        self.disposed = true;
        info!(in_flight, "walker pool disposed");
    }
}
