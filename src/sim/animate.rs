//! Time-sliced position animation
//!
//! All visual motion (bird altitude, pipe scrolling) is a linear
//! interpolation applied in discrete steps on a fixed cadence. An
//! [`Animation`] owns no timer of its own; the host feeds it elapsed wall
//! time through `advance` and it applies however many whole steps fit.
//! Cancellation is cooperative: `stop` drops the remaining steps and the
//! completion fires exactly once either way, so chained logic cannot tell
//! "stopped early" from "ran to completion".

use super::units::{Coord, Pos, Unit};
use super::SimError;

/// Default interpolation duration in milliseconds
pub const DEFAULT_DURATION_MS: f32 = 200.0;

/// Target and timing for one interpolation request
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    /// Target horizontal coordinate; `None` holds the current value
    pub to_x: Option<Coord>,
    /// Target vertical coordinate; `None` holds the current value
    pub to_y: Option<Coord>,
    /// Total duration over which the full distance is covered
    pub duration_ms: f32,
    /// Step multiplier: steps = distance * smoothness
    pub smoothness: f32,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            to_x: None,
            to_y: None,
            duration_ms: DEFAULT_DURATION_MS,
            smoothness: 1.0,
        }
    }
}

impl AnimationSpec {
    pub fn to_y(target: Coord) -> Self {
        Self {
            to_y: Some(target),
            ..Default::default()
        }
    }

    pub fn to_x(target: Coord) -> Self {
        Self {
            to_x: Some(target),
            ..Default::default()
        }
    }

    pub fn over_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    fn validate(&self) -> Result<(), SimError> {
        if !(self.duration_ms > 0.0) {
            return Err(SimError::InvalidAnimation {
                field: "duration_ms",
                value: self.duration_ms,
            });
        }
        if !(self.smoothness > 0.0) {
            return Err(SimError::InvalidAnimation {
                field: "smoothness",
                value: self.smoothness,
            });
        }
        Ok(())
    }
}

/// One in-flight interpolation
#[derive(Debug, Clone)]
pub struct Animation {
    pace_x: f32,
    pace_y: f32,
    /// Unit adopted by an axis that has none yet, taken from whichever side
    /// of the request supplied one
    default_unit: Unit,
    steps_done: u32,
    total_steps: u32,
    period_ms: f32,
    accum_ms: f32,
    finished: bool,
    completion_taken: bool,
}

impl Animation {
    /// Resolve a spec against the entity's current position.
    ///
    /// Step count is the larger per-axis distance times smoothness, rounded,
    /// floored at 1 so a zero-distance request still terminates. Both axes
    /// pace on their delta; the original's target-relative horizontal pace
    /// was never exercised and is not reproduced.
    pub fn new(pos: &Pos, spec: &AnimationSpec) -> Result<Self, SimError> {
        spec.validate()?;
        Ok(Self::from_validated(pos, spec))
    }

    fn from_validated(pos: &Pos, spec: &AnimationSpec) -> Self {
        let target_x = spec.to_x.unwrap_or(pos.x);
        let target_y = spec.to_y.unwrap_or(pos.y);

        let default_unit = match target_x.unit {
            Unit::Unspecified => target_y.unit,
            unit => unit,
        };

        let dx = target_x.magnitude - pos.x.magnitude;
        let dy = target_y.magnitude - pos.y.magnitude;

        let total_steps = (dx.abs().max(dy.abs()) * spec.smoothness)
            .round()
            .max(1.0) as u32;

        Self {
            pace_x: dx / total_steps as f32,
            pace_y: dy / total_steps as f32,
            default_unit,
            steps_done: 0,
            total_steps,
            period_ms: spec.duration_ms / total_steps as f32,
            accum_ms: 0.0,
            finished: false,
            completion_taken: false,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed elapsed wall time; applies every whole step that fits.
    /// Returns true once the animation has terminated.
    pub fn advance(&mut self, pos: &mut Pos, dt_ms: f32) -> bool {
        if self.finished {
            return true;
        }

        self.accum_ms += dt_ms;
        while self.accum_ms >= self.period_ms && !self.finished {
            self.accum_ms -= self.period_ms;
            self.apply_step(pos);
            self.steps_done += 1;
            if self.steps_done >= self.total_steps {
                self.finished = true;
            }
        }

        self.finished
    }

    fn apply_step(&self, pos: &mut Pos) {
        if self.pace_x != 0.0 {
            pos.x.unit = pos.x.unit_or(self.default_unit);
            pos.x.magnitude += self.pace_x;
        }
        if self.pace_y != 0.0 {
            pos.y.unit = pos.y.unit_or(self.default_unit);
            pos.y.magnitude += self.pace_y;
        }
    }

    /// Drop any remaining steps. The completion still fires, once.
    pub fn stop(&mut self) {
        self.finished = true;
    }

    /// Observe the completion notification. True exactly once, on the first
    /// call after the animation terminated (by running out or by `stop`).
    pub fn take_completion(&mut self) -> bool {
        if self.finished && !self.completion_taken {
            self.completion_taken = true;
            true
        } else {
            false
        }
    }
}

/// Auto-repeating animation: each completed cycle restarts the spec from the
/// entity's live position. An iterative restart, not recursion, so long
/// sessions cannot grow a call stack.
#[derive(Debug, Clone)]
pub struct LoopingAnimation {
    spec: AnimationSpec,
    current: Animation,
    cancelled: bool,
}

impl LoopingAnimation {
    pub fn new(pos: &Pos, spec: AnimationSpec) -> Result<Self, SimError> {
        let current = Animation::new(pos, &spec)?;
        Ok(Self {
            spec,
            current,
            cancelled: false,
        })
    }

    /// Advance the inner animation; on completion, start the next cycle
    /// unless cancelled. The cancel flag is only consulted here, at the
    /// completion boundary. Returns true once the loop has halted.
    pub fn advance(&mut self, pos: &mut Pos, dt_ms: f32) -> bool {
        if self.current.advance(pos, dt_ms) {
            if self.cancelled {
                return true;
            }
            // Spec was validated at construction; restart cannot fail.
            self.current = Animation::from_validated(pos, &self.spec);
        }
        false
    }

    /// Request the loop to halt at the next completion boundary. The cycle
    /// in flight runs out normally.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Halt hard: cancel the loop and cut the in-flight cycle short.
    pub fn stop(&mut self) {
        self.cancelled = true;
        self.current.stop();
    }

    pub fn is_halted(&self) -> bool {
        self.cancelled && self.current.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_at(y: f32) -> Pos {
        Pos::new(Coord::percent(0.0), Coord::percent(y))
    }

    #[test]
    fn test_step_count_matches_distance() {
        let pos = pos_at(10.0);
        let anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(20.0))).unwrap();
        assert_eq!(anim.total_steps(), 10);
    }

    #[test]
    fn test_smoothness_scales_steps() {
        let pos = pos_at(10.0);
        let mut spec = AnimationSpec::to_y(Coord::percent(20.0));
        spec.smoothness = 2.0;
        let anim = Animation::new(&pos, &spec).unwrap();
        assert_eq!(anim.total_steps(), 20);
    }

    #[test]
    fn test_runs_to_target() {
        let mut pos = pos_at(10.0);
        let mut anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(20.0))).unwrap();

        // 10 steps over 200ms -> one step per 20ms
        let mut elapsed = 0.0;
        while !anim.advance(&mut pos, 5.0) {
            elapsed += 5.0;
            assert!(elapsed < 1000.0, "animation failed to terminate");
        }
        assert!((pos.y.magnitude - 20.0).abs() < 1e-3);
        assert_eq!(pos.y.unit, Unit::Percent);
    }

    #[test]
    fn test_zero_distance_terminates() {
        let mut pos = pos_at(10.0);
        let mut anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(10.0))).unwrap();
        assert_eq!(anim.total_steps(), 1);
        assert!(anim.advance(&mut pos, DEFAULT_DURATION_MS));
        assert!((pos.y.magnitude - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_unit_fallback_from_target() {
        let mut pos = Pos::new(
            Coord::default(),
            Coord::new(10.0, Unit::Unspecified),
        );
        let mut anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(15.0))).unwrap();
        anim.advance(&mut pos, 1000.0);
        assert_eq!(pos.y.unit, Unit::Percent);
    }

    #[test]
    fn test_stop_fires_completion_once() {
        let mut pos = pos_at(10.0);
        let mut anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(20.0))).unwrap();

        anim.advance(&mut pos, 40.0); // two steps in
        anim.stop();
        assert!(anim.is_finished());
        assert!(anim.take_completion());
        assert!(!anim.take_completion());

        // stopped early: position stays where it was
        assert!((pos.y.magnitude - 12.0).abs() < 1e-3);

        // advancing a finished animation moves nothing
        anim.advance(&mut pos, 100.0);
        assert!((pos.y.magnitude - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_completion_fires_once_on_natural_end() {
        let mut pos = pos_at(10.0);
        let mut anim = Animation::new(&pos, &AnimationSpec::to_y(Coord::percent(12.0))).unwrap();
        anim.advance(&mut pos, 1000.0);
        assert!(anim.take_completion());
        assert!(!anim.take_completion());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let pos = pos_at(10.0);
        let spec = AnimationSpec::to_y(Coord::percent(20.0)).over_ms(0.0);
        assert!(matches!(
            Animation::new(&pos, &spec),
            Err(SimError::InvalidAnimation { field: "duration_ms", .. })
        ));
    }

    #[test]
    fn test_invalid_smoothness_rejected() {
        let pos = pos_at(10.0);
        let mut spec = AnimationSpec::to_y(Coord::percent(20.0));
        spec.smoothness = -1.0;
        assert!(matches!(
            Animation::new(&pos, &spec),
            Err(SimError::InvalidAnimation { field: "smoothness", .. })
        ));
    }

    #[test]
    fn test_loop_restarts_from_live_position() {
        let mut pos = pos_at(0.0);
        // Relative-looking target: each cycle aims at 5%, so only the first
        // cycle moves; later cycles are 1-step no-ops from 5% to 5%.
        let mut lp =
            LoopingAnimation::new(&pos, AnimationSpec::to_y(Coord::percent(5.0))).unwrap();
        for _ in 0..10 {
            assert!(!lp.advance(&mut pos, 200.0));
        }
        assert!((pos.y.magnitude - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_loop_cancel_lets_cycle_finish() {
        let mut pos = pos_at(0.0);
        let mut lp =
            LoopingAnimation::new(&pos, AnimationSpec::to_y(Coord::percent(10.0))).unwrap();

        lp.advance(&mut pos, 40.0); // mid-cycle
        lp.cancel();
        assert!(!lp.is_halted());

        // The in-flight cycle still runs out and reaches its target...
        let halted = lp.advance(&mut pos, 200.0);
        assert!(halted);
        assert!((pos.y.magnitude - 10.0).abs() < 1e-3);

        // ...but no next cycle is scheduled.
        assert!(lp.advance(&mut pos, 1000.0));
        assert!((pos.y.magnitude - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_loop_stop_cuts_cycle_short() {
        let mut pos = pos_at(0.0);
        let mut lp =
            LoopingAnimation::new(&pos, AnimationSpec::to_y(Coord::percent(10.0))).unwrap();
        lp.advance(&mut pos, 40.0);
        lp.stop();
        assert!(lp.is_halted());
        assert!((pos.y.magnitude - 2.0).abs() < 1e-3);
    }
}
