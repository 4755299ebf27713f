//! Flap Core - simulation core for a tap-to-flap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipe pool, scoring, collisions)
//! - `tuning`: Data-driven physics constants
//! - `autopilot`: Demo/idle-mode controller
//! - `host`: Fixed-timestep driver for a host loop

pub mod autopilot;
pub mod host;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use host::{Game, SharedGame};
pub use sim::{GamePhase, Session, TickOutcome};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per ~16ms frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Number of pipe pairs in the recycled pool
    pub const NUM_PIPES: usize = 3;

    /// Bird horizontal position as a fraction of viewport width
    pub const BIRD_X_FRACTION: f32 = 0.35;
    /// Bird starting height as a fraction of viewport height
    pub const BIRD_Y_FRACTION: f32 = 0.5;
    /// Bird radius as a fraction of the shorter viewport side
    pub const BIRD_RADIUS_FRACTION: f32 = 0.03;

    /// Default seed used by hosts that don't supply one
    pub const DEFAULT_SEED: u64 = 0x5eed_f1a9;
}
