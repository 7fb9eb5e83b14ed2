//! Property tests over long random runs of single walkers and pools.

use glam::IVec3;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use walker_core::{
    animator::{Cycle, TickOutcome, Walker, WalkerState},
    config::{Config, WalkerSeed},
    extender::RandomDirections,
    pool::WalkerPool,
    segment::Segment,
    types::{Axis, in_bounds},
};

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop::sample::select(Axis::ALL.to_vec())
}

fn walker(seed: u64, capacity: usize, bound: i32, dir: Axis) -> Walker<RandomDirections<StdRng>> {
    let cfg = Config {
        walkers: vec![WalkerSeed::from_origin(dir.offset())],
        capacity,
        bound,
        ..Config::default()
    };
    Walker::new(
        0,
        &cfg.walkers[0],
        &cfg,
        RandomDirections::new(StdRng::seed_from_u64(seed)),
    )
}

fn path(w: &Walker<RandomDirections<StdRng>>) -> Vec<(IVec3, IVec3)> {
    w.buffer().segments().iter().map(|s| (s.start, s.end)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn endpoints_stay_in_bounds_and_steps_are_unit(
        seed in any::<u64>(),
        capacity in 1usize..20,
        bound in 1i32..6,
        dir in arb_axis(),
        dt in 0.01f32..0.2,
    ) {
        let mut w = walker(seed, capacity, bound, dir);

        for _ in 0..400 {
            w.tick(dt);
            for s in w.buffer().segments() {
                prop_assert!(in_bounds(s.start, bound));
                prop_assert!(in_bounds(s.end, bound));
                prop_assert_eq!((s.end - s.start).abs().element_sum(), 1);
            }
            let chain: Vec<&Segment> = w.buffer().chain().collect();
            for pair in chain.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn length_never_exceeds_or_drops_from_capacity(
        seed in any::<u64>(),
        capacity in 1usize..15,
    ) {
        let mut w = walker(seed, capacity, 5, Axis::PosX);
        let mut reached = false;

        for _ in 0..300 {
            w.tick(0.05);
            let len = w.buffer().len();
            prop_assert!(len <= capacity);
            if reached {
                prop_assert_eq!(len, capacity);
            }
            reached |= len == capacity;
        }
        prop_assert!(reached);
    }

    #[test]
    fn cursor_advances_by_one_per_recycle(
        seed in any::<u64>(),
        capacity in 1usize..10,
    ) {
        let mut w = walker(seed, capacity, 4, Axis::NegY);
        let mut cursors = vec![];

        for _ in 0..500 {
            let recycling = matches!(w.state(), WalkerState::Animating(Cycle::Recycle { .. }));
            if w.tick(0.04) == TickOutcome::Completed && recycling {
                cursors.push(w.buffer().cursor());
            }
        }

        prop_assert!(!cursors.is_empty());
        for (i, c) in cursors.iter().enumerate() {
            prop_assert_eq!(*c, (i + 1) % capacity);
        }
    }

    #[test]
    fn busy_spans_leave_the_path_untouched(
        seed in any::<u64>(),
        capacity in 2usize..10,
        dt in 0.005f32..0.05,
    ) {
        let mut w = walker(seed, capacity, 5, Axis::PosZ);
        let mut snapshot = path(&w);

        for _ in 0..400 {
            match w.tick(dt) {
                TickOutcome::Advanced => {
                    prop_assert!(w.is_busy());
                    prop_assert_eq!(&path(&w), &snapshot);
                }
                TickOutcome::Started => {
                    prop_assert!(w.is_busy());
                    snapshot = path(&w);
                }
                TickOutcome::Completed => {
                    prop_assert!(!w.is_busy());
                    snapshot = path(&w);
                }
                TickOutcome::Disposed => prop_assert!(false, "walker was never disposed"),
            }
        }
    }

    #[test]
    fn transforms_derive_identically(
        seed in any::<u64>(),
        ticks in 0usize..200,
    ) {
        let cfg = Config { capacity: 8, seed: Some(seed), ..Config::default() };
        let mut pool = WalkerPool::new(&cfg).unwrap();
        for _ in 0..ticks {
            pool.tick(0.033);
        }

        let first: Vec<_> = pool.transforms().collect();
        let second: Vec<_> = pool.transforms().collect();
        prop_assert_eq!(first.len(), pool.segment_count());
        prop_assert_eq!(first, second);
    }
}
