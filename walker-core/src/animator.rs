//! Per-walker animation state machine.
//!
//! A walker is either [`WalkerState::Idle`] or animating one [`Cycle`].
//! A tick on an idle walker decides the next step of the path and starts a
//! cycle; ticks on an animating walker only move its tween(s) forward; the
//! tick on which progress reaches 1 applies the cycle's completion effect
//! and returns the walker to idle. Path decisions therefore never overlap.

use crate::{
    buffer::SegmentBuffer,
    config::{Config, WalkerSeed},
    extender::{self, DirectionSource},
    segment::{Anchor, MIN_EXTENSION, SegmentTransform},
    tween::Tween,
    types::{LatticePoint, SegmentId, WalkerId},
};
use tracing::{debug, trace};

/// One in-flight animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cycle {
    /// A freshly appended segment extends from collapsed to full.
    Grow { segment: SegmentId, tween: Tween },
    /// The head segment finishes extending while the oldest one collapses.
    /// Both tweens share one duration and advance together.
    ///
    /// `shrink` is `None` when head and oldest are the same slot
    /// (capacity 1).
    Recycle {
        forward: SegmentId,
        backward: SegmentId,
        grow: Tween,
        shrink: Option<Tween>,
    },
}

impl Cycle {
    fn advance(&mut self, dt: f32) -> f32 {
        match self {
            Cycle::Grow { tween, .. } => tween.advance(dt),
            Cycle::Recycle { grow, shrink, .. } => {
                if let Some(shrink) = shrink {
                    shrink.advance(dt);
                }
                grow.advance(dt)
            }
        }
    }

    /// Writes the tweened extensions into the buffer.
    fn apply(&self, buffer: &mut SegmentBuffer) {
        match *self {
            Cycle::Grow { segment, tween } => buffer.get_mut(segment).set_extension(tween.value()),
            Cycle::Recycle {
                forward,
                backward,
                grow,
                shrink,
            } => {
                buffer.get_mut(forward).set_extension(grow.value());
                if let Some(shrink) = shrink {
                    buffer.get_mut(backward).set_extension(shrink.value());
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WalkerState {
    Idle,
    Animating(Cycle),
}

/// What a single [`Walker::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The walker was idle and began a new cycle.
    Started,
    /// A cycle is in flight and moved forward.
    Advanced,
    /// A cycle reached the end and its completion effect was applied.
    Completed,
    /// The walker has been torn down; nothing happened.
    Disposed,
}

/// One independently animated trail.
///
/// The segment buffer, the cursor inside it and the animation state are
/// only mutated through [`Walker::tick`] and [`Walker::cancel`].
#[derive(Debug)]
pub struct Walker<S> {
    id: WalkerId,
    buffer: SegmentBuffer,
    state: WalkerState,
    source: S,
    bound: i32,
    avoid_retries: u32,
    tween_secs: f32,
    fallbacks: u64,
    disposed: bool,
}

impl<S: DirectionSource> Walker<S> {
    /// Creates an idle walker whose trail is the seed's first segment.
    ///
    /// `cfg` is expected to have passed [`Config::validate`].
    pub fn new(id: WalkerId, seed: &WalkerSeed, cfg: &Config, source: S) -> Self {
        Self {
            id,
            buffer: SegmentBuffer::new(seed.start, seed.start + seed.direction, cfg.capacity),
            state: WalkerState::Idle,
            source,
            bound: cfg.bound,
            avoid_retries: cfg.avoid_retries,
            tween_secs: cfg.tween_secs,
            fallbacks: 0,
            disposed: false,
        }
    }

    pub fn id(&self) -> WalkerId {
        self.id
    }

    pub fn buffer(&self) -> &SegmentBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &WalkerState {
        &self.state
    }

    /// `true` while a cycle is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, WalkerState::Animating(_))
    }

    /// Number of steps that landed on an existing endpoint because the
    /// avoidance budget ran out.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current transforms of this walker's segments, in storage order.
    pub fn transforms(&self) -> impl Iterator<Item = SegmentTransform> + '_ {
        self.buffer.transforms()
    }

    /// Advances the walker by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        if self.disposed {
            return TickOutcome::Disposed;
        }

        match self.state {
            WalkerState::Idle => {
                let cycle = self.begin_cycle();
                cycle.apply(&mut self.buffer);
                self.state = WalkerState::Animating(cycle);
                trace!(walker = self.id, ?cycle, "cycle started");
                TickOutcome::Started
            }
            WalkerState::Animating(mut cycle) => {
                let progress = cycle.advance(dt);
                cycle.apply(&mut self.buffer);
                if progress < 1.0 {
                    self.state = WalkerState::Animating(cycle);
                    return TickOutcome::Advanced;
                }
                self.complete(cycle);
                self.state = WalkerState::Idle;
                TickOutcome::Completed
            }
        }
    }

    /// Drops any in-flight cycle without running its completion effect and
    /// makes every later tick a no-op.
    pub fn cancel(&mut self) {
        self.state = WalkerState::Idle;
        self.disposed = true;
    }

    fn begin_cycle(&mut self) -> Cycle {
        let duration = self.tween_secs;

        if !self.buffer.is_full() {
            let end = self.extend();
            let segment = self.buffer.append(end);
            return Cycle::Grow {
                segment,
                tween: Tween::new(MIN_EXTENSION, 1.0, duration),
            };
        }

        let forward = self.buffer.head_index();
        let backward = self.buffer.cursor();
        let grow = Tween::new(self.buffer.segments()[forward].extension, 1.0, duration);

        let shrink = (forward != backward).then(|| {
            let seg = self.buffer.get_mut(backward);
            seg.anchor = Anchor::End;
            Tween::new(seg.extension, MIN_EXTENSION, duration)
        });

        Cycle::Recycle {
            forward,
            backward,
            grow,
            shrink,
        }
    }

    fn complete(&mut self, cycle: Cycle) {
        match cycle {
            Cycle::Grow { segment, .. } => {
                self.buffer.get_mut(segment).set_extension(1.0);
            }
            Cycle::Recycle { forward, .. } => {
                self.buffer.get_mut(forward).set_extension(1.0);
                let end = self.extend();
                let slot = self.buffer.recycle(end);
                self.buffer.get_mut(slot).set_extension(MIN_EXTENSION);
            }
        }
        trace!(walker = self.id, cursor = self.buffer.cursor(), "cycle completed");
    }

    /// Draws the next endpoint from the head of the trail.
    fn extend(&mut self) -> LatticePoint {
        let from = self.buffer.head_point();
        let ext = extender::next_point(
            self.buffer.ends(),
            from,
            self.bound,
            self.avoid_retries,
            &mut self.source,
        );
        if ext.collided {
            self.fallbacks += 1;
            debug!(
                walker = self.id,
                point = %ext.point,
                rejections = ext.rejections,
                "avoidance budget exhausted, accepting existing endpoint"
            );
        }
        ext.point
    }
}
