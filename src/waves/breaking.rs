//! Breaking-wave lifecycle: grow, hold, shrink, done.

use crate::params::WaveParams;

/// Barrel highlight start, as a fraction of the crest
const BARREL_INSET: f32 = 0.1;

/// Lifecycle phase; ordered so later phases compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Growing,
    Steady,
    Shrinking,
    Done,
}

/// Foam crest riding one wavefront
#[derive(Debug, Clone)]
pub struct BreakingWave {
    pub spawn_time_s: f32,
    pub duration_s: f32,
    pub phase: Phase,
    pub length_m: f32,
    pub max_length_m: f32,
    /// Barrel highlight position along the crest, in [0.1, 1]
    pub barrel_pos: f32,
    pub barrel_speed: f32,
}

impl BreakingWave {
    pub fn new(spawn_time_s: f32, duration_s: f32, max_length_m: f32, barrel_speed: f32) -> Self {
        Self {
            spawn_time_s,
            duration_s,
            phase: Phase::Growing,
            length_m: 0.0,
            max_length_m,
            barrel_pos: BARREL_INSET,
            barrel_speed,
        }
    }

    /// Recompute phase, length and barrel position for `time_s`
    pub fn update(&mut self, time_s: f32, params: &WaveParams) {
        let elapsed = (time_s - self.spawn_time_s).max(0.0);
        let (phase, length) = phase_at(
            elapsed,
            self.duration_s,
            params.grow_fraction,
            params.shrink_fraction,
            self.max_length_m,
        );
        self.phase = phase;
        self.length_m = length;
        self.barrel_pos = barrel_position(elapsed, self.duration_s, self.barrel_speed);
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}

/// Phase and crest length after `elapsed` seconds of a `duration` lifetime
pub fn phase_at(
    elapsed: f32,
    duration: f32,
    grow_fraction: f32,
    shrink_fraction: f32,
    max_length: f32,
) -> (Phase, f32) {
    let grow_end = duration * grow_fraction;
    let shrink_start = duration * (1.0 - shrink_fraction);

    if elapsed >= duration {
        (Phase::Done, 0.0)
    } else if elapsed < grow_end {
        (Phase::Growing, elapsed / grow_end * max_length)
    } else if elapsed < shrink_start {
        (Phase::Steady, max_length)
    } else {
        let t = (elapsed - shrink_start) / (duration * shrink_fraction);
        (Phase::Shrinking, ((1.0 - t) * max_length).max(0.0))
    }
}

/// Barrel highlight position; starts inset and never resets
pub fn barrel_position(elapsed: f32, duration: f32, barrel_speed: f32) -> f32 {
    let progress = (elapsed / duration).clamp(0.0, 1.0);
    (progress * barrel_speed + BARREL_INSET).min(1.0)
}
