//! Property tests over arbitrary seeds, viewports and input scripts

use proptest::prelude::*;

use super::pipes::gate_range;
use super::state::{GameEvent, Session, TickOutcome};
use crate::consts::NUM_PIPES;
use crate::tuning::Tuning;

fn session(seed: u64, width: f32, height: f32) -> Session {
    let mut session = Session::new(Tuning::default(), seed);
    session.on_viewport_resized(width, height);
    session
}

proptest! {
    #[test]
    fn prop_same_seed_same_run(
        seed in any::<u64>(),
        script in prop::collection::vec(any::<bool>(), 0..300),
    ) {
        let mut a = session(seed, 400.0, 800.0);
        let mut b = session(seed, 400.0, 800.0);
        for flap in script {
            if flap {
                a.on_primary_input();
                b.on_primary_input();
            }
            prop_assert_eq!(a.advance(), b.advance());
            prop_assert_eq!(a.bird().pos.y.to_bits(), b.bird().pos.y.to_bits());
            prop_assert_eq!(a.bird().vel.to_bits(), b.bird().vel.to_bits());
            prop_assert_eq!(a.score(), b.score());
            prop_assert_eq!(a.pipes(), b.pipes());
        }
    }

    #[test]
    fn prop_pool_invariants(
        seed in any::<u64>(),
        width in 200.0f32..1200.0,
        height in 200.0f32..1600.0,
        script in prop::collection::vec(any::<bool>(), 0..400),
    ) {
        let mut session = session(seed, width, height);
        let pipe_width = session.pool().width();
        let gap = session.pool().gap();
        // Points credited per slot since it was last recycled
        let mut credited = [0u32; NUM_PIPES];
        let mut last_score = 0;

        for flap in script {
            if session.is_over() {
                session.reset();
                credited = [0; NUM_PIPES];
                last_score = 0;
            }
            if flap {
                session.apply_impulse();
            }
            session.advance();

            prop_assert_eq!(session.pipes().len(), NUM_PIPES);
            prop_assert!(session.score() >= last_score);
            last_score = session.score();

            let mut recycled = [false; NUM_PIPES];
            for event in session.events() {
                match *event {
                    GameEvent::Recycled { pipe } => {
                        recycled[pipe] = true;
                        credited[pipe] = 0;
                    }
                    GameEvent::Scored { pipe, .. } => {
                        credited[pipe] += 1;
                        prop_assert!(credited[pipe] <= 1);
                    }
                    GameEvent::Crashed { .. } => {}
                }
            }

            let pipes = session.pipes();
            for (i, pipe) in pipes.iter().enumerate() {
                if recycled[i] {
                    // Ahead of every pipe that stayed, and of any slot recycled before it
                    for (j, other) in pipes.iter().enumerate() {
                        if j != i && (!recycled[j] || j < i) {
                            prop_assert!(pipe.x > other.x);
                        }
                    }
                    prop_assert!(!pipe.scored);
                }
                match gate_range(gap, height) {
                    Some((min, max)) => {
                        prop_assert!(pipe.gate_top >= min - 1e-3 && pipe.gate_top <= max + 1e-3);
                    }
                    None => prop_assert_eq!(pipe.gate_top, height / 2.0 - gap / 2.0),
                }
                for other in &pipes[i + 1..] {
                    prop_assert!((pipe.x - other.x).abs() >= pipe_width);
                }
            }
        }
    }

    #[test]
    fn prop_game_over_is_terminal(
        seed in any::<u64>(),
        script in prop::collection::vec(any::<bool>(), 0..400),
    ) {
        let mut session = session(seed, 400.0, 800.0);
        let mut stopped = false;
        for flap in script {
            if flap {
                session.apply_impulse();
            }
            let outcome = session.advance();
            if stopped {
                prop_assert_eq!(outcome, TickOutcome::Stop);
            }
            if outcome == TickOutcome::Stop {
                stopped = true;
                prop_assert!(session.is_over());
            }
        }
    }
}
