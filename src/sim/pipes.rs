//! Fixed-size pipe pool
//!
//! The pool is an arena of `NUM_PIPES` slots allocated once per session. A pipe
//! that scrolls off the left edge is re-initialized in place ahead of the
//! others; nothing is ever inserted or removed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Viewport;
use crate::consts::NUM_PIPES;

/// One pipe pair: a top and a bottom segment around a passable gate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of both segments
    pub x: f32,
    /// Y of the top of the gate (bottom of the top segment)
    pub gate_top: f32,
    /// Whether the bird has already been credited for this pass
    pub scored: bool,
}

impl Pipe {
    pub fn top_rect(&self, width: f32) -> Rect {
        Rect::new(self.x, 0.0, self.x + width, self.gate_top)
    }

    pub fn bottom_rect(&self, width: f32, gap: f32, viewport_height: f32) -> Rect {
        Rect::new(
            self.x,
            self.gate_top + gap,
            self.x + width,
            viewport_height,
        )
    }

    /// Horizontal center line used for scoring
    pub fn center_x(&self, width: f32) -> f32 {
        self.x + width / 2.0
    }

    pub fn is_offscreen(&self, width: f32) -> bool {
        self.x + width < 0.0
    }
}

/// Valid `[min, max)` range for a gate top, or `None` when the viewport is
/// too short to fit a margin of half a gap above and below the gate
pub fn gate_range(gap: f32, viewport_height: f32) -> Option<(f32, f32)> {
    let min = gap * 0.5;
    let max = viewport_height - gap - min;
    (max > min).then_some((min, max))
}

/// Sample a gate top, collapsing to a centered gate on short viewports
pub fn sample_gate<R: Rng>(gap: f32, viewport_height: f32, rng: &mut R) -> f32 {
    match gate_range(gap, viewport_height) {
        Some((min, max)) => min + rng.random::<f32>() * (max - min),
        None => viewport_height / 2.0 - gap / 2.0,
    }
}

/// Horizontal distance between consecutive pipes for a viewport width
pub fn spacing_for(width: f32, viewport_width: f32) -> f32 {
    (width * 2.0).max(viewport_width / NUM_PIPES as f32)
}

/// The recycled pipe arena plus its geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePool {
    pipes: [Pipe; NUM_PIPES],
    width: f32,
    gap: f32,
    spacing: f32,
}

impl PipePool {
    pub fn new(width: f32, gap: f32) -> Self {
        Self {
            pipes: [Pipe::default(); NUM_PIPES],
            width,
            gap,
            spacing: width * 2.0,
        }
    }

    pub fn pipes(&self) -> &[Pipe; NUM_PIPES] {
        &self.pipes
    }

    pub(crate) fn pipes_mut(&mut self) -> &mut [Pipe; NUM_PIPES] {
        &mut self.pipes
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Rightmost pipe x, never less than the viewport's right edge
    pub fn farthest_x(&self, viewport_width: f32) -> f32 {
        self.pipes
            .iter()
            .map(|p| p.x)
            .fold(viewport_width, f32::max)
    }

    /// Tile the pool from the right edge of the viewport outward
    pub fn layout<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) {
        self.spacing = spacing_for(self.width, viewport.width);
        for (i, pipe) in self.pipes.iter_mut().enumerate() {
            pipe.x = viewport.width + i as f32 * self.spacing;
            pipe.gate_top = sample_gate(self.gap, viewport.height, rng);
            pipe.scored = false;
        }
    }

    /// Re-initialize one slot ahead of every other pipe
    fn recycle<R: Rng>(&mut self, index: usize, viewport: Viewport, rng: &mut R) {
        let farthest = self.farthest_x(viewport.width);
        let gate_top = sample_gate(self.gap, viewport.height, rng);
        let pipe = &mut self.pipes[index];
        pipe.x = farthest + self.spacing;
        pipe.gate_top = gate_top;
        pipe.scored = false;
    }

    /// Move every pipe left by `speed`, recycling any that left the screen.
    ///
    /// Slots are processed in index order and each recycle measures the
    /// farthest pipe at that instant, so slots later in the order have not
    /// moved yet. `on_recycle` receives the index of every recycled slot.
    pub fn scroll<R, F>(&mut self, speed: f32, viewport: Viewport, rng: &mut R, mut on_recycle: F)
    where
        R: Rng,
        F: FnMut(usize),
    {
        for index in 0..self.pipes.len() {
            self.pipes[index].x -= speed;
            if self.pipes[index].is_offscreen(self.width) {
                self.recycle(index, viewport, rng);
                on_recycle(index);
            }
        }
    }
}
