//! Avatar control
//!
//! The bird is a single [`Pos`] driven entirely by interpolations: player
//! flaps ascend it, dives and the involuntary drift descend it. Motion is an
//! explicit state machine (idle / ascending / descending / settling) instead
//! of chained completion callbacks, so rapid key input mid-animation cannot
//! race: each input resolves against exactly one current state.

use super::animate::{Animation, AnimationSpec};
use super::scoring::Rect;
use super::signals::{Signal, SignalBus};
use super::units::{Coord, Pos};
use super::SimError;
use crate::tuning::Tuning;

/// Ascent tilt while flapping, degrees
const ASCEND_TILT_DEG: f32 = -45.0;
/// Descent tilt, degrees
const DESCEND_TILT_DEG: f32 = 45.0;

/// The bird's current vertical motion intent
#[derive(Debug, Clone)]
pub enum Motion {
    /// No animation in flight; the next tick starts a drift
    Idle,
    /// A flap is carrying the bird up
    Ascending(Animation),
    /// A dive or drift is carrying the bird down
    Descending(Animation),
    /// Ascent finished; holding briefly before leveling out
    Settling { remaining_ms: f32 },
}

/// The player avatar
#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Pos,
    /// Presentational tilt; derived from motion, never read by gameplay
    pub rotation_deg: f32,
    motion: Motion,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Pos::new(
                Coord::percent(tuning.bird_left_percent),
                Coord::percent(tuning.start_height_percent),
            ),
            rotation_deg: 0.0,
            motion: Motion::Idle,
        }
    }

    /// Back to the start perch. Runs on every `Start`.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos.y = Coord::percent(tuning.start_height_percent);
        self.rotation_deg = 0.0;
        self.motion = Motion::Idle;
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Altitude above the container floor, percent
    pub fn altitude_pct(&self) -> f32 {
        self.pos.y.magnitude
    }

    /// Per-tick duties: floor check first (terminal, nothing else applies
    /// this tick), then the involuntary drift when no motion is in flight.
    pub fn on_tick(&mut self, bus: &mut SignalBus, tuning: &Tuning) -> Result<(), SimError> {
        if self.altitude_pct() < tuning.floor_percent {
            bus.emit(Signal::Die);
            return Ok(());
        }

        if matches!(self.motion, Motion::Idle) {
            self.descend(tuning.drift_step, tuning.drift_speed_factor, tuning)?;
        }

        Ok(())
    }

    /// Ascend-key input. A flap interrupting a flap goes higher; a flap out
    /// of a dive first cuts the dive short.
    pub fn flap(&mut self, tuning: &Tuning) -> Result<(), SimError> {
        let magnitude = match &mut self.motion {
            Motion::Ascending(anim) => {
                anim.stop();
                tuning.flap_boost_step
            }
            Motion::Descending(anim) => {
                anim.stop();
                tuning.flap_step
            }
            Motion::Idle | Motion::Settling { .. } => tuning.flap_step,
        };

        self.rotation_deg = ASCEND_TILT_DEG;
        let target = Coord::percent(self.pos.y.magnitude + magnitude);
        let spec = AnimationSpec::to_y(target).over_ms(tuning.base_duration_ms);
        self.motion = Motion::Ascending(Animation::new(&self.pos, &spec)?);
        Ok(())
    }

    /// Descend-key input: always a fresh full-size dive.
    pub fn dive(&mut self, tuning: &Tuning) -> Result<(), SimError> {
        if let Motion::Descending(anim) = &mut self.motion {
            anim.stop();
        }
        self.descend(tuning.dive_step, 1.0, tuning)
    }

    fn descend(&mut self, step: f32, speed_factor: f32, tuning: &Tuning) -> Result<(), SimError> {
        self.rotation_deg = DESCEND_TILT_DEG;
        let target = Coord::percent(self.pos.y.magnitude - step);
        let spec = AnimationSpec::to_y(target).over_ms(tuning.base_duration_ms / speed_factor);
        self.motion = Motion::Descending(Animation::new(&self.pos, &spec)?);
        Ok(())
    }

    /// Step whatever animation is in flight. Runs on wall time, not the game
    /// tick: in-flight motion keeps easing even while the clock is paused.
    pub fn advance_motion(&mut self, dt_ms: f32, tuning: &Tuning) {
        match &mut self.motion {
            Motion::Idle => {}
            Motion::Ascending(anim) => {
                if anim.advance(&mut self.pos, dt_ms) && anim.take_completion() {
                    self.motion = Motion::Settling {
                        remaining_ms: tuning.settle_ms,
                    };
                }
            }
            Motion::Descending(anim) => {
                if anim.advance(&mut self.pos, dt_ms) && anim.take_completion() {
                    // tilt holds until the next flap or reset
                    self.motion = Motion::Idle;
                }
            }
            Motion::Settling { remaining_ms } => {
                *remaining_ms -= dt_ms;
                if *remaining_ms <= 0.0 {
                    self.motion = Motion::Idle;
                    self.rotation_deg = 0.0;
                }
            }
        }
    }

    /// Bounding box in screen pixels (y down), for the evaluator
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        let left = crate::percent_to_px(self.pos.x.magnitude, tuning.container_width_px);
        let bottom_px = crate::percent_to_px(self.pos.y.magnitude, tuning.container_height_px);
        let top = tuning.container_height_px - (bottom_px + tuning.bird_height_px);
        Rect::from_ltwh(left, top, tuning.bird_width_px, tuning.bird_height_px)
    }
}
