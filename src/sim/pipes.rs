//! Scrolling obstacle groups
//!
//! Two groups of three pipes scroll leftward forever. When the leading
//! group leaves the viewport the labels swap (the data stays put) and the
//! freed group rejoins on the right, so the field recycles two allocations
//! for the whole session. Gap placement re-rolls on every start.

use rand::Rng;

use super::scoring::Rect;
use super::units::{Coord, Pos, Unit};
use super::SimError;
use crate::tuning::Tuning;

/// Pipes per group
pub const PIPES_PER_GROUP: usize = 3;

/// Leading group offset on start, percent of container width
const LEAD_RESET_PCT: f32 = 100.0;
/// Trailing group offset on start and after a swap
const TRAIL_RESET_PCT: f32 = 120.0;
/// Offset at which the leading group is fully off-screen
const OFFSCREEN_PCT: f32 = -100.0;

/// Where a pipe's gap landed, and what that means for its segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapPlacement {
    /// Gap hugs the top: upper segments fully hidden
    NearTop,
    /// Gap hugs the bottom: lower segments fully hidden
    NearBottom,
    /// Gap in the open: lower filler clamped to an explicit height
    Mid { bottom_px: f32 },
}

/// Classify a gap-bottom offset against the hide thresholds.
pub fn classify_gap(gap_bottom_px: f32, tuning: &Tuning) -> GapPlacement {
    if gap_bottom_px > tuning.max_gap_px() - tuning.edge_hide_px {
        GapPlacement::NearTop
    } else if gap_bottom_px < tuning.edge_hide_px {
        GapPlacement::NearBottom
    } else {
        GapPlacement::Mid {
            bottom_px: gap_bottom_px,
        }
    }
}

/// One obstacle column: a top and bottom segment around a tracked gap
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Height of the solid mass below the gap
    pub gap_bottom_px: f32,
    pub placement: GapPlacement,
    last_gap_px: f32,
}

impl Pipe {
    fn new() -> Self {
        Self {
            gap_bottom_px: 0.0,
            placement: GapPlacement::NearBottom,
            last_gap_px: 0.0,
        }
    }

    /// Roll a fresh gap for this slot. Re-rolls while the new value lands
    /// within 10% (by ratio) of the slot's previous gap, so consecutive
    /// runs never look identical.
    fn randomize(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> Result<(), SimError> {
        let max_gap = tuning.max_gap_px();
        if max_gap <= 0.0 {
            return Err(SimError::GapUnderflow {
                container_px: tuning.container_height_px,
                gap_px: tuning.gap_height_px,
            });
        }

        let gap = loop {
            let candidate = rng.random_range(0..=max_gap as u32) as f32;
            if self.last_gap_px > 0.0 {
                let ratio = candidate / self.last_gap_px;
                if (0.9..=1.1).contains(&ratio) {
                    continue;
                }
            }
            break candidate;
        };

        self.last_gap_px = gap;
        self.gap_bottom_px = gap;
        self.placement = classify_gap(gap, tuning);
        Ok(())
    }

    /// Render flags for the segment above the gap
    pub fn top_hidden(&self) -> bool {
        matches!(self.placement, GapPlacement::NearTop)
    }

    /// Render flags for the segment below the gap
    pub fn bottom_hidden(&self) -> bool {
        matches!(self.placement, GapPlacement::NearBottom)
    }

    /// Whether the lower filler holds an explicit clamped height
    pub fn grow_disabled(&self) -> bool {
        matches!(self.placement, GapPlacement::Mid { .. })
    }
}

/// One scrolling column group
#[derive(Debug, Clone)]
pub struct PipeGroup {
    pub pos: Pos,
    pipes: [Pipe; PIPES_PER_GROUP],
}

impl PipeGroup {
    fn new(offset_pct: f32) -> Self {
        Self {
            pos: Pos::new(Coord::percent(offset_pct), Coord::default()),
            pipes: [Pipe::new(), Pipe::new(), Pipe::new()],
        }
    }

    pub fn pipes(&self) -> &[Pipe; PIPES_PER_GROUP] {
        &self.pipes
    }

    pub fn offset_pct(&self) -> f32 {
        self.pos.x.magnitude
    }
}

/// Both groups plus the leading/trailing labeling
#[derive(Debug, Clone)]
pub struct PipeField {
    groups: [PipeGroup; 2],
    leading: usize,
}

impl Default for PipeField {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeField {
    pub fn new() -> Self {
        Self {
            groups: [
                PipeGroup::new(LEAD_RESET_PCT),
                PipeGroup::new(TRAIL_RESET_PCT),
            ],
            leading: 0,
        }
    }

    pub fn leading(&self) -> &PipeGroup {
        &self.groups[self.leading]
    }

    pub fn trailing(&self) -> &PipeGroup {
        &self.groups[1 - self.leading]
    }

    /// All groups in document (storage) order, for rendering
    pub fn groups(&self) -> &[PipeGroup; 2] {
        &self.groups
    }

    /// Re-roll every gap and park the groups off-screen right. Runs on every
    /// `Start`.
    pub fn randomize(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> Result<(), SimError> {
        for group in &mut self.groups {
            for pipe in &mut group.pipes {
                pipe.randomize(rng, tuning)?;
            }
        }
        self.groups[self.leading].pos.x = Coord::percent(LEAD_RESET_PCT);
        self.groups[1 - self.leading].pos.x = Coord::percent(TRAIL_RESET_PCT);
        log::debug!("pipes randomized");
        Ok(())
    }

    /// One tick of scrolling: recycle the leading group once it is fully
    /// off-screen, then advance. The trailing group only starts moving once
    /// the leading group has crossed the left edge, which keeps the spacing
    /// between groups fixed.
    pub fn on_tick(&mut self, tuning: &Tuning) {
        if self.groups[self.leading].pos.x.magnitude < OFFSCREEN_PCT {
            let recycled = self.leading;
            self.leading = 1 - self.leading;
            self.groups[recycled].pos.x = Coord::percent(TRAIL_RESET_PCT);
        }

        let lead = self.leading;
        let trail = 1 - lead;
        if self.groups[lead].pos.x.magnitude <= 0.0 {
            self.groups[trail].pos.nudge_x(-tuning.scroll_pace, Unit::Percent);
        }
        self.groups[lead].pos.nudge_x(-tuning.scroll_pace, Unit::Percent);
    }

    /// Pixel-space `(body, gap)` rectangles for every pipe, document order.
    pub fn rects(&self, tuning: &Tuning) -> Vec<(Rect, Rect)> {
        let slot_w = tuning.container_width_px / PIPES_PER_GROUP as f32;
        let mut out = Vec::with_capacity(2 * PIPES_PER_GROUP);

        for group in &self.groups {
            let group_left = crate::percent_to_px(group.pos.x.magnitude, tuning.container_width_px);
            for (i, pipe) in group.pipes.iter().enumerate() {
                let left = group_left + i as f32 * slot_w;
                let body =
                    Rect::from_ltwh(left, 0.0, tuning.pipe_width_px, tuning.container_height_px);
                let gap_top =
                    tuning.container_height_px - (pipe.gap_bottom_px + tuning.gap_height_px);
                let gap = Rect::from_ltwh(left, gap_top, tuning.pipe_width_px, tuning.gap_height_px);
                out.push((body, gap));
            }
        }

        out
    }
}
