//! Read-only view of a session for rendering
//!
//! Hosts draw from a `Snapshot` and never touch the session directly.
//! `rect_instances` flattens it into GPU-ready instance data.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GamePhase, Session, Viewport};
use crate::consts::NUM_PIPES;

/// Number of rect instances in a frame: the bird plus two segments per pipe
pub const INSTANCE_COUNT: usize = 1 + NUM_PIPES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub top: Rect,
    pub bottom: Rect,
    pub scored: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub time_ticks: u64,
    pub viewport: Option<Viewport>,
    pub bird: BirdView,
    pub pipes: [PipeView; NUM_PIPES],
}

/// Instance kinds, used by shaders to pick a color
pub mod kinds {
    pub const BIRD: u32 = 0;
    pub const PIPE_TOP: u32 = 1;
    pub const PIPE_BOTTOM: u32 = 2;
}

/// One axis-aligned quad for instanced drawing
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub kind: u32,
    pub _pad: [u32; 3],
}

impl RectInstance {
    pub const fn new(rect: Rect, kind: u32) -> Self {
        Self {
            min: [rect.left, rect.top],
            max: [rect.right, rect.bottom],
            kind,
            _pad: [0; 3],
        }
    }
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let bird = session.bird();
        let rects = session.pipe_rects();
        let mut pipes = [PipeView {
            top: Rect::default(),
            bottom: Rect::default(),
            scored: false,
        }; NUM_PIPES];
        for ((view, (top, bottom)), pipe) in pipes.iter_mut().zip(rects).zip(session.pipes()) {
            *view = PipeView {
                top,
                bottom,
                scored: pipe.scored,
            };
        }

        Self {
            phase: session.phase(),
            score: session.score(),
            time_ticks: session.time_ticks(),
            viewport: session.viewport(),
            bird: BirdView {
                pos: bird.pos,
                radius: bird.radius,
                vel: bird.vel,
            },
            pipes,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Bird box followed by top/bottom segments in slot order.
    /// Inverted segments (short viewports) are emitted as zero-size quads.
    pub fn rect_instances(&self) -> [RectInstance; INSTANCE_COUNT] {
        let mut out = [RectInstance::zeroed(); INSTANCE_COUNT];
        out[0] = RectInstance::new(Rect::around(self.bird.pos, self.bird.radius), kinds::BIRD);
        for (i, pipe) in self.pipes.iter().enumerate() {
            out[1 + i * 2] = RectInstance::new(clamp_empty(pipe.top), kinds::PIPE_TOP);
            out[2 + i * 2] = RectInstance::new(clamp_empty(pipe.bottom), kinds::PIPE_BOTTOM);
        }
        out
    }
}

fn clamp_empty(rect: Rect) -> Rect {
    if rect.is_empty() {
        Rect::new(rect.left, rect.top, rect.left, rect.top)
    } else {
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_matches_session() {
        let mut session = Session::new(Tuning::default(), 21);
        session.on_viewport_resized(400.0, 800.0);
        session.advance();

        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.time_ticks, 1);
        assert_eq!(snap.bird.pos, session.bird().pos);
        assert_eq!(snap.bird.radius, 12.0);
        for (view, pipe) in snap.pipes.iter().zip(session.pipes()) {
            assert_eq!(view.top.left, pipe.x);
            assert_eq!(view.top.bottom, pipe.gate_top);
            assert_eq!(view.bottom.bottom, 800.0);
        }
    }

    #[test]
    fn test_rect_instances_layout() {
        let mut session = Session::new(Tuning::default(), 21);
        session.on_viewport_resized(400.0, 800.0);
        let snap = session.snapshot();
        let instances = snap.rect_instances();

        assert_eq!(instances[0].kind, kinds::BIRD);
        assert_eq!(instances[0].min, [128.0, 388.0]);
        assert_eq!(instances[0].max, [152.0, 412.0]);
        assert_eq!(instances[1].kind, kinds::PIPE_TOP);
        assert_eq!(instances[2].kind, kinds::PIPE_BOTTOM);

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), INSTANCE_COUNT * std::mem::size_of::<RectInstance>());
        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
    }

    #[test]
    fn test_short_viewport_emits_empty_top() {
        let mut session = Session::new(Tuning::default(), 21);
        session.on_viewport_resized(400.0, 100.0);
        let instances = session.snapshot().rect_instances();
        // Gate centered at -40: the top segment is inverted
        assert_eq!(instances[1].min, instances[1].max);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = Session::new(Tuning::default(), 21);
        session.on_viewport_resized(400.0, 800.0);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.snapshot());
    }
}
