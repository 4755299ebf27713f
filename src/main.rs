//! Flap Core entry point
//!
//! Headless native runner: plays a few autopilot runs at the fixed timestep
//! and logs the results.
//!
//! Usage: `flap-core [seed] [tuning.json]`

use flap_core::consts::{DEFAULT_SEED, SIM_DT};
use flap_core::{Autopilot, Game, Session, Tuning};

/// Reference viewport (logical pixels)
const VIEWPORT: (f32, f32) = (400.0, 800.0);
/// Number of autopilot runs
const RUNS: u32 = 5;
/// Per-run tick cap (one minute at 60 Hz)
const MAX_RUN_TICKS: u32 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Flap Core (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using default", e);
            DEFAULT_SEED
        }
        None => DEFAULT_SEED,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Using default tuning: {}", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let mut game = Game::new(Session::new(tuning, seed)).with_autopilot(Autopilot::default());
    log::info!(
        "Seed {}, tuning {:?}",
        game.session().seed(),
        game.session().tuning()
    );
    game.on_viewport_resized(VIEWPORT.0, VIEWPORT.1);

    for run in 1..=RUNS {
        let mut ticks = 0;
        while game.is_ticking() && ticks < MAX_RUN_TICKS {
            ticks += game.update(SIM_DT);
        }

        let session = game.session();
        let outcome = if session.is_over() {
            "crashed"
        } else {
            "survived"
        };
        println!(
            "run {}: {} after {} ticks, score {}",
            run,
            outcome,
            session.time_ticks(),
            session.score()
        );

        if run < RUNS {
            if session.is_over() {
                game.on_primary_input();
            } else {
                game.on_viewport_resized(VIEWPORT.0, VIEWPORT.1);
            }
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
