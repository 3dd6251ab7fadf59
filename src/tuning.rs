//! Data-driven game balance
//!
//! Every gameplay constant lives here so hosts can reshape the game from a
//! JSON blob without touching simulation code. Defaults reproduce the
//! reference layout: an 800x600 container, 25 ms tick, quarter-percent
//! scroll pace.

use serde::{Deserialize, Serialize};

use crate::sim::SimError;

/// Gameplay constants for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clock ===
    /// Simulation tick period in milliseconds
    pub tick_period_ms: f32,

    // === Container (pixel space for collision geometry) ===
    pub container_width_px: f32,
    pub container_height_px: f32,

    // === Pipes ===
    /// Horizontal scroll per tick, in percent of container width
    pub scroll_pace: f32,
    /// Width of one pipe body
    pub pipe_width_px: f32,
    /// Vertical extent of the traversable gap
    pub gap_height_px: f32,
    /// Gaps within this distance of either extreme hide the clamped segment
    pub edge_hide_px: f32,

    // === Bird ===
    pub bird_width_px: f32,
    pub bird_height_px: f32,
    /// Fixed horizontal position, percent of container width
    pub bird_left_percent: f32,
    /// Altitude on start, percent of container height
    pub start_height_percent: f32,
    /// Altitudes below this are lethal
    pub floor_percent: f32,

    // === Motion magnitudes (percent of container height) ===
    /// Involuntary per-drift descent
    pub drift_step: f32,
    /// Drift duration divider (larger = faster fall)
    pub drift_speed_factor: f32,
    /// Plain flap ascent
    pub flap_step: f32,
    /// Ascent when a flap interrupts an in-flight flap
    pub flap_boost_step: f32,
    /// Player-commanded descent
    pub dive_step: f32,

    // === Timing ===
    /// Base duration of one interpolation
    pub base_duration_ms: f32,
    /// Hold after an ascent before the bird levels out
    pub settle_ms: f32,
    /// Minimum wall-clock spacing between honored points
    pub point_debounce_ms: f32,

    // === Collision ===
    /// Slack applied to both gap edges
    pub gap_tolerance_px: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_period_ms: 25.0,
            container_width_px: 800.0,
            container_height_px: 600.0,
            scroll_pace: 0.25,
            pipe_width_px: 80.0,
            gap_height_px: 150.0,
            edge_hide_px: 20.0,
            bird_width_px: 50.0,
            bird_height_px: 38.0,
            bird_left_percent: 20.0,
            start_height_percent: 49.0,
            floor_percent: 4.0,
            drift_step: 5.0,
            drift_speed_factor: 3.0,
            flap_step: 10.0,
            flap_boost_step: 20.0,
            dive_step: 20.0,
            base_duration_ms: 200.0,
            settle_ms: 50.0,
            point_debounce_ms: 500.0,
            gap_tolerance_px: 2.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning blob. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("tick_period_ms", self.tick_period_ms),
            ("container_width_px", self.container_width_px),
            ("container_height_px", self.container_height_px),
            ("scroll_pace", self.scroll_pace),
            ("pipe_width_px", self.pipe_width_px),
            ("gap_height_px", self.gap_height_px),
            ("bird_width_px", self.bird_width_px),
            ("bird_height_px", self.bird_height_px),
            ("drift_speed_factor", self.drift_speed_factor),
            ("base_duration_ms", self.base_duration_ms),
            ("point_debounce_ms", self.point_debounce_ms),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SimError::InvalidTuning { field, value });
            }
        }

        if self.settle_ms < 0.0 {
            return Err(SimError::InvalidTuning {
                field: "settle_ms",
                value: self.settle_ms,
            });
        }

        if self.gap_height_px >= self.container_height_px {
            return Err(SimError::GapUnderflow {
                container_px: self.container_height_px,
                gap_px: self.gap_height_px,
            });
        }

        Ok(())
    }

    /// Largest legal gap-bottom offset, in whole pixels.
    pub fn max_gap_px(&self) -> f32 {
        self.container_height_px - self.gap_height_px
    }
}
