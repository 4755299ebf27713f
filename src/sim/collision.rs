//! Collision detection for the bird and the pipe pool
//!
//! Everything is axis-aligned. Intersection uses open intervals: rectangles
//! that only share an edge do not collide. The screen bounds are the one
//! exception, where touching the ceiling or the floor already counts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pipes::PipePool;
use super::state::{Bird, Viewport};

/// Axis-aligned rectangle in viewport pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of half-size `half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    /// True for zero-area or inverted rectangles
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Strict overlap test: shared edges with zero overlap area don't count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Bird touched the top of the screen
    Ceiling,
    /// Bird touched the bottom of the screen
    Floor,
    /// Bird hit a pipe segment (slot index)
    Pipe { index: usize },
}

/// Check the bird's box against the screen bounds
pub fn bird_bounds_collision(bird: &Rect, viewport_height: f32) -> Option<CrashCause> {
    if bird.top <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if bird.bottom >= viewport_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// Check the bird's box against both segments of every pipe
pub fn bird_pipe_collision(
    bird: &Rect,
    pool: &PipePool,
    viewport_height: f32,
) -> Option<CrashCause> {
    pool.pipes().iter().enumerate().find_map(|(index, pipe)| {
        let top = pipe.top_rect(pool.width());
        let bottom = pipe.bottom_rect(pool.width(), pool.gap(), viewport_height);
        (bird.intersects(&top) || bird.intersects(&bottom)).then_some(CrashCause::Pipe { index })
    })
}

/// Full per-tick collision check, bounds first
pub fn check_collision(bird: &Bird, pool: &PipePool, viewport: Viewport) -> Option<CrashCause> {
    let rect = bird.rect();
    bird_bounds_collision(&rect, viewport.height)
        .or_else(|| bird_pipe_collision(&rect, pool, viewport.height))
}
