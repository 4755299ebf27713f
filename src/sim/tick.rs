//! Fixed timestep simulation tick
//!
//! One call advances a running session by exactly one step, in a fixed order:
//! physics, pipe scroll/recycle, scoring, collision.

use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, Session, TickOutcome};

/// Advance the session by one fixed tick
pub fn tick(session: &mut Session) -> TickOutcome {
    session.events.clear();

    match session.phase {
        GamePhase::Uninitialized => return TickOutcome::Continue,
        GamePhase::GameOver => return TickOutcome::Stop,
        GamePhase::Running => {}
    }
    let Some(viewport) = session.viewport else {
        return TickOutcome::Continue;
    };

    session.time_ticks += 1;
    let params = session.params;

    // Physics
    session.bird.integrate(params.gravity);

    // Scroll pipes, recycling any that left the screen
    let events = &mut session.events;
    session
        .pool
        .scroll(params.pipe_speed, viewport, &mut session.rng, |pipe| {
            log::debug!("Recycled pipe {}", pipe);
            events.push(GameEvent::Recycled { pipe });
        });

    update_score(session);

    if let Some(cause) = check_collision(&session.bird, &session.pool, viewport) {
        session.phase = GamePhase::GameOver;
        session.events.push(GameEvent::Crashed { cause });
        log::info!(
            "Game over: {:?} after {} ticks, score {}",
            cause,
            session.time_ticks,
            session.score
        );
        return TickOutcome::Stop;
    }

    TickOutcome::Continue
}

/// Credit each pipe whose center line the bird has passed, once per pass
fn update_score(session: &mut Session) {
    let bird_x = session.bird.pos.x;
    let width = session.pool.width();
    for (pipe, slot) in session.pool.pipes_mut().iter_mut().enumerate() {
        if !slot.scored && bird_x > slot.center_x(width) {
            slot.scored = true;
            session.score += 1;
            session.events.push(GameEvent::Scored {
                pipe,
                score: session.score,
            });
            log::debug!("Scored pipe {} (score {})", pipe, session.score);
        }
    }
}
