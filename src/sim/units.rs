//! Unit-tagged coordinates and the number/suffix splitter
//!
//! Positions in the original layout are strings like "49%" or "-12.5px".
//! The simulation keeps them as typed (magnitude, unit) pairs and only
//! re-synthesizes the string form at the render boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit of a single coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Percentage of the container dimension
    Percent,
    /// Absolute pixels
    Pixel,
    /// No suffix was present (or it was unrecognized)
    #[default]
    Unspecified,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Pixel => "px",
            Unit::Unspecified => "",
        }
    }

    pub fn from_suffix(s: &str) -> Self {
        match s {
            "%" => Unit::Percent,
            "px" => Unit::Pixel,
            _ => Unit::Unspecified,
        }
    }
}

/// Split a mixed numeric+unit string into its magnitude and suffix.
///
/// Scans left to right: digits, `.` and `-` accumulate into the number
/// buffer, everything else into the suffix buffer. Malformed input degrades
/// to `0.0` and whatever suffix was collected; this is tolerated, not an
/// error.
pub fn split_number(s: &str) -> (f32, String) {
    let mut number = String::new();
    let mut suffix = String::new();

    for ch in s.chars() {
        if ch.is_ascii_digit() || ch == '.' || ch == '-' {
            number.push(ch);
        } else {
            suffix.push(ch);
        }
    }

    (number.parse().unwrap_or(0.0), suffix)
}

/// One coordinate axis: magnitude plus unit.
///
/// The unit is stable for the lifetime of a run once set; magnitudes may go
/// negative (off-screen) or exceed 100 (past the container edge).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub magnitude: f32,
    pub unit: Unit,
}

impl Coord {
    pub fn new(magnitude: f32, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn percent(magnitude: f32) -> Self {
        Self::new(magnitude, Unit::Percent)
    }

    pub fn pixels(magnitude: f32) -> Self {
        Self::new(magnitude, Unit::Pixel)
    }

    /// Parse a coordinate string like "49%".
    pub fn parse(s: &str) -> Self {
        let (magnitude, suffix) = split_number(s);
        Self::new(magnitude, Unit::from_suffix(&suffix))
    }

    /// Borrow the other axis's unit when this one has none (the animation
    /// engine's stated fallback).
    pub fn unit_or(&self, fallback: Unit) -> Unit {
        if self.unit == Unit::Unspecified {
            fallback
        } else {
            self.unit
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

/// A placed entity's 2D position. `x` tracks horizontal offset (pipe
/// scrolling), `y` tracks height above the container floor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: Coord,
    pub y: Coord,
}

impl Pos {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Shift the horizontal coordinate in place, adopting `default_unit` if
    /// the axis has no unit yet. Pipe scrolling applies its fixed decrement
    /// through this rather than a full interpolation.
    pub fn nudge_x(&mut self, delta: f32, default_unit: Unit) {
        if delta != 0.0 {
            self.x.unit = self.x.unit_or(default_unit);
            self.x.magnitude += delta;
        }
    }
}
