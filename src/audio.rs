//! Sound cue surface
//!
//! The simulation never touches an audio device; it names cues and the host
//! plays them. Playback is fire-and-forget: a sink that cannot play simply
//! swallows the cue.

use crate::sim::Signal;

/// The four named cues of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Flap or dive input accepted
    Wing,
    /// Gap traversed
    Point,
    /// Obstacle collision
    Hit,
    /// Floor death
    Die,
}

impl SoundCue {
    /// Asset identifier for hosts that map cues to files
    pub fn asset_id(&self) -> &'static str {
        match self {
            SoundCue::Wing => "sfx-wing",
            SoundCue::Point => "sfx-point",
            SoundCue::Hit => "sfx-hit",
            SoundCue::Die => "sfx-die",
        }
    }
}

/// Which cue, if any, accompanies a signal
pub fn cue_for_signal(signal: Signal) -> Option<SoundCue> {
    match signal {
        Signal::Point => Some(SoundCue::Point),
        Signal::Hit => Some(SoundCue::Hit),
        Signal::Die => Some(SoundCue::Die),
        Signal::Start | Signal::Tick | Signal::Over => None,
    }
}

/// Best-effort playback collaborator
pub trait AudioSink {
    /// Play a cue. Failures are the sink's problem; callers never hear
    /// about them.
    fn play(&mut self, cue: SoundCue);
}

/// Sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Sink that logs cues, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sfx: {}", cue.asset_id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(cue_for_signal(Signal::Point), Some(SoundCue::Point));
        assert_eq!(cue_for_signal(Signal::Hit), Some(SoundCue::Hit));
        assert_eq!(cue_for_signal(Signal::Die), Some(SoundCue::Die));
        assert_eq!(cue_for_signal(Signal::Tick), None);
        assert_eq!(cue_for_signal(Signal::Start), None);
        assert_eq!(cue_for_signal(Signal::Over), None);
    }

    #[test]
    fn test_null_sink_swallows() {
        NullAudio.play(SoundCue::Wing);
    }
}
