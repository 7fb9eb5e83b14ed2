//! Core of a generative lattice-walk animation.
//!
//! A handful of walkers trace random, weakly self-avoiding paths through a
//! bounded integer lattice. Each path is a fixed-length trail of segments
//! that grows, then recycles its oldest segment as its newest one, with
//! every change animated by a short tween.
//!
//! Main components:
//! - [`types`]: lattice points, ids and unit axes.
//! - [`config`]: construction-time configuration and its validation.
//! - [`extender`]: choosing the next lattice point of a walk.
//! - [`segment`]: segments and their derived transforms.
//! - [`tween`]: scalar interpolation advanced by frame ticks.
//! - [`buffer`]: the fixed-capacity segment trail of one walker.
//! - [`animator`]: the per-walker idle/animating state machine.
//! - [`pool`]: the set of walkers driven by the frame clock.
//! - [`guides`]: reference grid lines for renderers.

pub mod animator;
pub mod buffer;
pub mod config;
pub mod extender;
pub mod guides;
pub mod pool;
pub mod segment;
pub mod tween;
pub mod types;
