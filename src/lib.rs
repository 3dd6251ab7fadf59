//! Wingbeat - a tick-driven Flappy Bird simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (animation engine, signal bus, pipes,
//!   bird, collision/scoring, world orchestration)
//! - `audio`: Sound cue surface for host playback
//! - `tuning`: Data-driven game balance
//!
//! Hosts own rendering and input devices; they feed elapsed time and key
//! events into [`sim::World`] and drain signals/cues back out.

pub mod audio;
pub mod sim;
pub mod tuning;

pub use sim::{SimError, World};
pub use tuning::Tuning;

/// Convert a percent magnitude to pixels against a container dimension
#[inline]
pub fn percent_to_px(pct: f32, dimension_px: f32) -> f32 {
    pct / 100.0 * dimension_px
}

/// Convert pixels back to a percent magnitude
#[inline]
pub fn px_to_percent(px: f32, dimension_px: f32) -> f32 {
    px / dimension_px * 100.0
}
