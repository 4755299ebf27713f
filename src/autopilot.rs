//! Idle/demo mode controller
//!
//! Steers the bird through the next gate by flapping whenever the next tick
//! would leave it below an aim line. Between flaps the bird coasts up about
//! half a gate's height, so the aim line sits below the gate center.

use crate::sim::{GamePhase, Pipe, Session};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Aim offset below the gate center, as a fraction of the gap
    pub bias: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { bias: 0.25 }
    }
}

impl Autopilot {
    /// The pipe the bird still has to clear: the leftmost one whose right
    /// edge is not yet behind the bird
    pub fn next_pipe<'a>(&self, session: &'a Session) -> Option<&'a Pipe> {
        let bird = session.bird();
        let width = session.pool().width();
        session
            .pipes()
            .iter()
            .filter(|p| p.x + width >= bird.pos.x - bird.radius)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }

    /// Lowest y the bird should reach
    pub fn target_y(&self, session: &Session) -> Option<f32> {
        let gap = session.pool().gap();
        self.next_pipe(session)
            .map(|p| p.gate_top + gap * (0.5 + self.bias))
    }

    /// Whether to flap before the next tick
    pub fn should_flap(&self, session: &Session) -> bool {
        if session.phase() != GamePhase::Running {
            return false;
        }
        let Some(target) = self.target_y(session) else {
            return false;
        };
        let bird = session.bird();
        let predicted = bird.pos.y + bird.vel + session.params().gravity;
        predicted > target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn running(seed: u64) -> Session {
        let mut session = Session::new(Tuning::default(), seed);
        session.on_viewport_resized(400.0, 800.0);
        session
    }

    #[test]
    fn test_idle_before_viewport() {
        let session = Session::new(Tuning::default(), 1);
        assert!(!Autopilot::default().should_flap(&session));
    }

    #[test]
    fn test_next_pipe_is_leftmost_ahead() {
        let session = running(3);
        let pilot = Autopilot::default();
        let next = pilot.next_pipe(&session).unwrap();
        assert_eq!(next.x, 400.0);
    }

    #[test]
    fn test_flaps_when_below_target() {
        let mut session = running(3);
        let pilot = Autopilot::default();
        let target = pilot.target_y(&session).unwrap();

        session.bird.pos.y = target + 50.0;
        assert!(pilot.should_flap(&session));

        session.bird.pos.y = target - 50.0;
        assert!(!pilot.should_flap(&session));
    }

    #[test]
    fn test_clears_first_pipe() {
        for seed in [1, 2, 3, 4, 5] {
            let mut session = running(seed);
            let pilot = Autopilot::default();
            // First pipe reaches the bird well within this many ticks
            for _ in 0..80 {
                if pilot.should_flap(&session) {
                    session.apply_impulse();
                }
                session.advance();
            }
            assert!(session.score() >= 1, "seed {seed} scored {}", session.score());
        }
    }
}
