//! Game signal bus and the paused/score state it owns
//!
//! Six named signals drive everything; no component polls its own clock.
//! The bus applies state transitions inline on emit and records every signal
//! (cascades included, in causal order) in an outbox the host drains once
//! per frame. Components never write `paused` or `score` directly.

use serde::{Deserialize, Serialize};

/// Named game signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// New run begins: score resets, clock unpauses
    Start,
    /// Fixed-period advancement of the simulation (25 ms while unpaused)
    Tick,
    /// A gap was traversed (already debounced by the evaluator)
    Point,
    /// Bird overlapped obstacle mass
    Hit,
    /// Bird fell below the floor threshold
    Die,
    /// Run ended; cascaded from `Hit`/`Die`
    Over,
}

/// Owner of the shared game state and sole place transitions happen
#[derive(Debug, Clone)]
pub struct SignalBus {
    paused: bool,
    score: u32,
    outbox: Vec<Signal>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBus {
    /// Starts paused; nothing moves until the first `Start`.
    pub fn new() -> Self {
        Self {
            paused: true,
            score: 0,
            outbox: Vec::new(),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Emit a signal: apply its transition, record it, cascade `Over` from
    /// the terminal signals.
    pub fn emit(&mut self, signal: Signal) {
        match signal {
            Signal::Start => {
                self.score = 0;
                self.paused = false;
                log::info!("run started");
            }
            Signal::Point => {
                self.score += 1;
                log::debug!("score: {}", self.score);
            }
            Signal::Over => {
                self.paused = true;
                log::info!("game over, final score {}", self.score);
            }
            Signal::Tick | Signal::Hit | Signal::Die => {}
        }

        self.outbox.push(signal);

        if matches!(signal, Signal::Hit | Signal::Die) {
            self.emit(Signal::Over);
        }
    }

    /// Take everything emitted since the last drain, in causal order.
    pub fn drain(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_paused() {
        let bus = SignalBus::new();
        assert!(bus.paused());
        assert_eq!(bus.score(), 0);
    }

    #[test]
    fn test_start_resets_and_unpauses() {
        let mut bus = SignalBus::new();
        bus.emit(Signal::Point);
        bus.emit(Signal::Start);
        assert!(!bus.paused());
        assert_eq!(bus.score(), 0);
    }

    #[test]
    fn test_point_increments_score() {
        let mut bus = SignalBus::new();
        bus.emit(Signal::Start);
        bus.emit(Signal::Point);
        bus.emit(Signal::Point);
        assert_eq!(bus.score(), 2);
    }

    #[test]
    fn test_hit_cascades_over_and_pauses() {
        let mut bus = SignalBus::new();
        bus.emit(Signal::Start);
        bus.drain();
        bus.emit(Signal::Hit);
        assert!(bus.paused());
        assert_eq!(bus.drain(), vec![Signal::Hit, Signal::Over]);
    }

    #[test]
    fn test_die_cascades_over() {
        let mut bus = SignalBus::new();
        bus.emit(Signal::Start);
        bus.drain();
        bus.emit(Signal::Die);
        assert!(bus.paused());
        assert_eq!(bus.drain(), vec![Signal::Die, Signal::Over]);
    }

    #[test]
    fn test_drain_empties_outbox() {
        let mut bus = SignalBus::new();
        bus.emit(Signal::Start);
        assert_eq!(bus.drain(), vec![Signal::Start]);
        assert!(bus.drain().is_empty());
    }
}
