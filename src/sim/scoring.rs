//! Collision and scoring evaluation
//!
//! Runs once per tick over the bird's bounding box and every pipe in
//! document order. A collision anywhere short-circuits the tick and
//! overrides any point already pending; an honored point re-arms a global
//! wall-clock debounce so one traversal cannot score on consecutive ticks.

use glam::Vec2;

use super::signals::{Signal, SignalBus};
use crate::tuning::Tuning;

/// Axis-aligned box in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

#[inline]
fn in_range(value: f32, lo: f32, hi: f32) -> bool {
    value >= lo && value <= hi
}

/// Per-run scoring state: the debounce clock
#[derive(Debug, Clone)]
pub struct Scorer {
    last_point_ms: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self { last_point_ms: 0.0 }
    }

    /// Evaluate one tick.
    ///
    /// `pipes` yields `(body, gap)` rectangles in document order. The bird's
    /// right edge entering `[body.left, body.right + bird_width]` makes a
    /// pipe relevant; inside that band the bird's top edge must sit within
    /// the gap (with the configured tolerance on both edges) or it is a hit.
    /// The narrower band past the pipe's trailing edge marks a point, held
    /// pending until every pipe has been ruled out as a collision.
    pub fn on_tick<I>(&mut self, bird: Rect, pipes: I, now_ms: f64, bus: &mut SignalBus, tuning: &Tuning)
    where
        I: IntoIterator<Item = (Rect, Rect)>,
    {
        let mut point_pending = false;

        for (body, gap) in pipes {
            let x_overlap = in_range(bird.right(), body.left(), body.right() + bird.width());
            if !x_overlap {
                continue;
            }

            let tol = tuning.gap_tolerance_px;
            let y_safe = in_range(bird.top(), gap.top() + tol, gap.bottom() + tol);
            if !y_safe {
                bus.emit(Signal::Hit);
                return;
            }

            if in_range(bird.right(), body.right(), body.right() + bird.width() / 2.0) {
                point_pending = true;
            }
        }

        if point_pending && now_ms - self.last_point_ms > tuning.point_debounce_ms as f64 {
            self.last_point_ms = now_ms;
            bus.emit(Signal::Point);
        }
    }
}
