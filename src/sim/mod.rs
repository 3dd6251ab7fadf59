//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed 25 ms tick, fed elapsed time by the host
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The render surface is the typed state itself: hosts read positions as
//! [`units::Coord`] values and format them at the boundary.

pub mod animate;
pub mod bird;
pub mod pipes;
pub mod scoring;
pub mod signals;
pub mod units;
pub mod world;

use thiserror::Error;

pub use animate::{Animation, AnimationSpec, LoopingAnimation};
pub use bird::{Bird, Motion};
pub use pipes::{GapPlacement, Pipe, PipeField, PipeGroup};
pub use scoring::{Rect, Scorer};
pub use signals::{Signal, SignalBus};
pub use units::{Coord, Pos, Unit, split_number};
pub use world::{GameEvent, Key, World};

/// Errors the simulation can raise.
///
/// Malformed coordinate strings are not errors (they degrade to zero); these
/// cover genuinely invalid configuration plus the defensively-checked gap
/// derivation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Zero or negative timing parameter handed to the animation engine
    #[error("invalid animation parameter {field} = {value}")]
    InvalidAnimation { field: &'static str, value: f32 },

    /// A tuning field fails its positivity check
    #[error("invalid tuning value {field} = {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    /// Container too small to carve the configured gap out of
    #[error("gap of {gap_px}px cannot fit a {container_px}px container")]
    GapUnderflow { container_px: f32, gap_px: f32 },

    /// Tuning JSON failed to parse
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
