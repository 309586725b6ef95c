//! Frame clock turning wall-clock timestamps into simulation time.

/// Largest step handed to the simulation (seconds); longer gaps are truncated
pub const DEFAULT_MAX_STEP_S: f32 = 0.1;

/// Time of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Simulation time since the first tick (seconds)
    pub time_s: f32,
    /// Step since the previous tick (seconds)
    pub dt_s: f32,
}

/// Accumulates clamped wall-clock deltas.
///
/// A stall (window drag, breakpoint) advances the simulation by at most
/// `max_step_s`, so wave ages and boat integration never jump. The running
/// total is kept in f64; small steps vanish when added to a large f32.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_wall_s: Option<f64>,
    time_s: f64,
    max_step_s: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEP_S)
    }
}

impl FrameClock {
    pub fn new(max_step_s: f32) -> Self {
        Self {
            last_wall_s: None,
            time_s: 0.0,
            max_step_s,
        }
    }

    /// Advance to wall-clock time `now_s`; the first tick has zero step
    pub fn tick(&mut self, now_s: f64) -> FrameTime {
        let dt_s = match self.last_wall_s {
            Some(last) => (now_s - last).max(0.0).min(f64::from(self.max_step_s)),
            None => 0.0,
        };
        self.last_wall_s = Some(now_s);
        self.time_s += dt_s;
        FrameTime {
            time_s: self.time_s as f32,
            dt_s: dt_s as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(123.0), FrameTime { time_s: 0.0, dt_s: 0.0 });
    }

    #[test]
    fn test_accumulates_deltas() {
        let mut clock = FrameClock::default();
        clock.tick(1.0);
        let frame = clock.tick(1.05);
        assert!((frame.dt_s - 0.05).abs() < 1e-6);
        let frame = clock.tick(1.08);
        assert!((frame.time_s - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped_and_backwards_time_ignored() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(0.0);
        assert_eq!(clock.tick(5.0).dt_s, 0.1);
        assert_eq!(clock.tick(4.0).dt_s, 0.0);
    }

    #[test]
    fn test_long_session_keeps_small_steps() {
        let mut clock = FrameClock::default();
        let frames_per_hour = 60 * 60 * 60;
        let mut frame = clock.tick(0.0);
        for n in 1..=3 * frames_per_hour {
            frame = clock.tick(n as f64 / 60.0);
        }
        assert!((frame.time_s - 3.0 * 3600.0).abs() < 0.01);
        assert!((frame.dt_s - 1.0 / 60.0).abs() < 1e-6);
    }
}
