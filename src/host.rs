//! Fixed-timestep driver for a host loop
//!
//! The core only defines `Session::advance`. `Game` is one way to schedule it:
//! feed it real frame times and it runs whole ticks out of an accumulator,
//! stops scheduling on game over, and resumes when input restarts the run.
//! `SharedGame` serializes access for hosts that deliver input on another
//! thread than the one drawing frames.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::autopilot::Autopilot;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{InputAction, Session, Snapshot};

/// Longest frame time fed into the accumulator (s)
const MAX_FRAME_DT: f32 = 0.1;

/// Game instance holding the session and its tick schedule
#[derive(Debug, Clone)]
pub struct Game {
    session: Session,
    accumulator: f32,
    /// Whether ticks are currently scheduled
    ticking: bool,
    /// Idle/demo mode - autopilot plays the game
    autopilot: Option<Autopilot>,
}

impl Game {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            accumulator: 0.0,
            ticking: false,
            autopilot: None,
        }
    }

    pub fn with_autopilot(mut self, autopilot: Autopilot) -> Self {
        self.autopilot = Some(autopilot);
        self
    }

    /// Viewport known or changed: reset and (re)start ticking
    pub fn on_viewport_resized(&mut self, width: f32, height: f32) {
        self.session.on_viewport_resized(width, height);
        if self.session.viewport().is_some() {
            self.start();
        }
    }

    /// Tap/click/space. Restarting after game over also restarts ticking.
    pub fn on_primary_input(&mut self) -> InputAction {
        let action = self.session.on_primary_input();
        if action == InputAction::Restarted {
            log::info!("Restarted after game over");
            self.start();
        }
        action
    }

    fn start(&mut self) {
        self.accumulator = 0.0;
        self.ticking = true;
    }

    /// Run simulation ticks for `dt` seconds of wall time.
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.ticking {
            return 0;
        }
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", dt);
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let flap = self
                .autopilot
                .as_ref()
                .is_some_and(|pilot| pilot.should_flap(&self.session));
            if flap {
                self.session.apply_impulse();
            }

            let outcome = self.session.advance();
            self.accumulator -= SIM_DT;
            substeps += 1;

            if !outcome.should_continue() {
                self.ticking = false;
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    /// Whether the host should keep delivering frames to `update`
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }
}

/// `Game` behind a single mutex
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the game. A panic in another holder leaves plain numeric state
    /// behind, so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, Game> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on_viewport_resized(&self, width: f32, height: f32) {
        self.lock().on_viewport_resized(width, height);
    }

    pub fn on_primary_input(&self) -> InputAction {
        self.lock().on_primary_input()
    }

    pub fn update(&self, dt: f32) -> u32 {
        self.lock().update(dt)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}
