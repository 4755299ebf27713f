//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed-size pipe pool, no allocation while ticking
//! - No rendering or platform dependencies

pub mod collision;
pub mod pipes;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CrashCause, Rect, check_collision};
pub use pipes::{Pipe, PipePool, gate_range, sample_gate, spacing_for};
pub use snapshot::{RectInstance, Snapshot};
pub use state::{
    Bird, EVENT_CAPACITY, GameEvent, GamePhase, InputAction, Session, TickOutcome, Viewport,
};
pub use tick::tick;

#[cfg(test)]
mod properties;
