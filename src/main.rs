//! Wingbeat entry point
//!
//! Headless demo: runs one autopiloted session in real time and logs what a
//! rendering host would draw and play.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use wingbeat::audio::{AudioSink, LogAudio};
use wingbeat::sim::{GameEvent, Key, Signal, SimError, World};
use wingbeat::Tuning;

fn main() -> Result<(), SimError> {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| rand::rng().random());
    log::info!("wingbeat demo, seed {seed}");

    let mut world = World::new(seed, Tuning::default())?;
    let mut audio = LogAudio;
    // autopilot gets its own stream so it never perturbs the world's RNG
    let mut pilot = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    world.start()?;

    let mut last = Instant::now();
    loop {
        std::thread::sleep(Duration::from_millis(5));
        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;

        // flap when sinking low, with some jitter so runs differ
        if world.bird().altitude_pct() < 45.0 && pilot.random_bool(0.15) {
            world.handle_key(Key::Flap)?;
        }

        world.advance(dt_ms)?;

        for event in world.drain_events() {
            match event {
                GameEvent::Sound(cue) => audio.play(cue),
                GameEvent::Signal(Signal::Point) => {
                    log::info!("score: {}", world.score());
                }
                GameEvent::Signal(Signal::Over) => {
                    println!("final score: {}", world.score());
                    return Ok(());
                }
                GameEvent::Signal(_) => {}
            }
        }
    }
}
