//! Session state and core simulation types
//!
//! A `Session` owns the bird, the pipe pool and the seeded RNG. It is created
//! once and reset in place; only the methods here and `tick` mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CrashCause, Rect};
use super::pipes::{Pipe, PipePool};
use super::snapshot::Snapshot;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Viewport size not known yet, nothing simulates
    Uninitialized,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Whether the host should keep scheduling ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

impl TickOutcome {
    pub fn should_continue(self) -> bool {
        self == TickOutcome::Continue
    }
}

/// What a primary input (tap/click/space) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// No viewport yet
    Ignored,
    /// Bird flapped
    Flapped,
    /// Session was reset after game over
    Restarted,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Bird passed the center of a pipe
    Scored { pipe: usize, score: u32 },
    /// A pipe left the screen and re-entered on the right
    Recycled { pipe: usize },
    /// Run ended
    Crashed { cause: CrashCause },
}

/// Upper bound on events per tick: every pipe recycles and scores, plus a crash
pub const EVENT_CAPACITY: usize = NUM_PIPES * 2 + 1;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Returns `None` for sizes the simulation can't run in
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Center; x is fixed after reset
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    pub radius: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: 0.0,
            radius: 1.0,
        }
    }
}

impl Bird {
    /// Bird at its starting spot for a viewport, at rest
    pub fn spawn(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width * BIRD_X_FRACTION,
                viewport.height * BIRD_Y_FRACTION,
            ),
            vel: 0.0,
            radius: viewport.width.min(viewport.height) * BIRD_RADIUS_FRACTION,
        }
    }

    /// One gravity step: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.pos.y += self.vel;
    }

    /// Overwrite velocity; repeated flaps don't stack
    pub fn flap(&mut self, flap_velocity: f32) {
        self.vel = flap_velocity;
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was created from
    seed: u64,
    pub(crate) rng: Pcg32,
    /// Tuning as configured (logical units)
    tuning: Tuning,
    /// Effective per-tick values in pixels
    pub(crate) params: Tuning,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) phase: GamePhase,
    pub(crate) bird: Bird,
    pub(crate) pool: PipePool,
    pub(crate) score: u32,
    pub(crate) time_ticks: u64,
    /// Events from the most recent tick (capacity fixed at construction)
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create an uninitialized session. Call `on_viewport_resized` to start.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let params = tuning.scaled();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            params,
            viewport: None,
            phase: GamePhase::Uninitialized,
            bird: Bird::default(),
            pool: PipePool::new(params.pipe_width, params.pipe_gap),
            score: 0,
            time_ticks: 0,
            events: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Like `new`, but rejects tuning the simulation can't run with
    pub fn try_new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::new(tuning, seed))
    }

    /// Viewport size became known or changed: restart the run in it.
    ///
    /// Non-positive or non-finite sizes are ignored.
    pub fn on_viewport_resized(&mut self, width: f32, height: f32) {
        let Some(viewport) = Viewport::new(width, height) else {
            log::warn!("Ignoring unusable viewport {}x{}", width, height);
            return;
        };
        self.viewport = Some(viewport);
        self.reset();
    }

    /// Start a fresh run in the current viewport. No-op until one is known.
    pub fn reset(&mut self) {
        let Some(viewport) = self.viewport else {
            log::debug!("Reset before viewport is known, ignoring");
            return;
        };

        self.bird = Bird::spawn(viewport);
        self.pool.layout(viewport, &mut self.rng);
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.phase = GamePhase::Running;

        log::info!(
            "Session reset in {}x{} viewport (pipe spacing {:.1})",
            viewport.width,
            viewport.height,
            self.pool.spacing()
        );
    }

    /// Flap. Only affects a running session.
    pub fn apply_impulse(&mut self) {
        if self.phase == GamePhase::Running {
            self.bird.flap(self.params.flap_velocity);
        }
    }

    /// Primary input, dispatched on the current phase
    pub fn on_primary_input(&mut self) -> InputAction {
        match self.phase {
            GamePhase::Uninitialized => InputAction::Ignored,
            GamePhase::Running => {
                self.apply_impulse();
                InputAction::Flapped
            }
            GamePhase::GameOver => {
                self.reset();
                InputAction::Restarted
            }
        }
    }

    /// Advance one fixed tick. See `tick::tick`.
    pub fn advance(&mut self) -> TickOutcome {
        super::tick::tick(self)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Per-tick values actually used by the simulation
    pub fn params(&self) -> &Tuning {
        &self.params
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe; NUM_PIPES] {
        self.pool.pipes()
    }

    pub fn pool(&self) -> &PipePool {
        &self.pool
    }

    /// Top and bottom segment of every pipe, in slot order
    pub fn pipe_rects(&self) -> [(Rect, Rect); NUM_PIPES] {
        let height = self.viewport.map_or(0.0, |v| v.height);
        let (width, gap) = (self.pool.width(), self.pool.gap());
        let pipes = *self.pool.pipes();
        pipes.map(|p| (p.top_rect(width), p.bottom_rect(width, gap, height)))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
