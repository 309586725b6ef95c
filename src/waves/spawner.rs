//! Periodic spawner of wavefront sets.

use std::f32::consts::TAU;

use glam::Vec2;
use log::{info, warn};
use rand::Rng;

use super::{BreakingWave, WaveId, WaveRegistry, Wavefront};
use crate::params::{ExpiryPolicy, SetLayout, SpawnerParams, WaveParams};

/// Upper bound on direction resampling before falling back to +X
const MAX_DIRECTION_ATTEMPTS: usize = 8;

/// Emits a set of parallel wavefronts every interval, or on demand
#[derive(Debug, Default)]
pub struct WaveSpawner {
    last_spawn_s: Option<f32>,
    manual_pending: bool,
}

impl WaveSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a set on the next update regardless of the interval
    pub fn trigger(&mut self) {
        self.manual_pending = true;
    }

    /// Spawn a set if the interval elapsed or a manual trigger is pending
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        time_s: f32,
        registry: &mut WaveRegistry,
        rng: &mut R,
        waves: &WaveParams,
        spawner: &SpawnerParams,
    ) -> Vec<WaveId> {
        let due = match self.last_spawn_s {
            Some(last) => time_s - last >= spawner.interval_s,
            None if spawner.spawn_on_start => true,
            None => {
                self.last_spawn_s = Some(time_s);
                false
            }
        };

        if !(due || self.manual_pending) {
            return Vec::new();
        }

        self.manual_pending = false;
        self.last_spawn_s = Some(time_s);
        spawn_set(time_s, registry, rng, waves, spawner)
    }
}

/// Create one set of parallel wavefronts sharing a random direction.
///
/// Members are `spacing_m` apart, either side by side along the crest
/// (`SetLayout::Lateral`) or one behind another (`SetLayout::Trailing`).
pub fn spawn_set<R: Rng + ?Sized>(
    time_s: f32,
    registry: &mut WaveRegistry,
    rng: &mut R,
    waves: &WaveParams,
    spawner: &SpawnerParams,
) -> Vec<WaveId> {
    let (min_count, max_count) = spawner.set_size_range;
    let count = rng.gen_range(min_count..=max_count.max(min_count));
    let direction = random_direction(rng);
    let base_origin = -direction * spawner.origin_distance_m;

    let mut ids = Vec::with_capacity(count as usize);
    for member in 0..count {
        let origin = base_origin + member_offset(member, count, direction, spawner);
        let Some(front) = Wavefront::new(origin, direction, time_s, waves.front_lifetime_s) else {
            continue;
        };

        let (min_d, max_d) = waves.breaker_duration_range_s;
        let mut duration = rng.gen_range(min_d..=max_d);
        if waves.expiry == ExpiryPolicy::ClampBreakerToFront {
            duration = duration.min(waves.front_lifetime_s);
        }
        let (min_b, max_b) = waves.barrel_speed_range;
        let barrel_speed = rng.gen_range(min_b..=max_b);

        let breaker =
            BreakingWave::new(time_s, duration, waves.breaker_max_length_m, barrel_speed);
        ids.push(registry.insert(front, breaker));
    }

    info!(
        "Spawned set of {} wavefronts heading {:.0} deg",
        ids.len(),
        direction.y.atan2(direction.x).to_degrees()
    );
    ids
}

/// Offset of one set member from the shared base origin
fn member_offset(member: u32, count: u32, direction: Vec2, spawner: &SpawnerParams) -> Vec2 {
    match spawner.layout {
        SetLayout::Lateral => {
            let slot = member as f32 - (count as f32 - 1.0) * 0.5;
            direction.perp() * (spawner.spacing_m * slot)
        }
        SetLayout::Trailing => -direction * (spawner.spacing_m * member as f32),
    }
}

/// Unit direction with an angle uniform in [0, 2π)
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    resample_direction(|| Vec2::from_angle(rng.gen_range(0.0..TAU)))
}

/// Draw from `sample` until it yields a normalizable vector
fn resample_direction(mut sample: impl FnMut() -> Vec2) -> Vec2 {
    for _ in 0..MAX_DIRECTION_ATTEMPTS {
        if let Some(direction) = sample().try_normalize() {
            return direction;
        }
    }
    warn!("Could not draw a valid wave direction, falling back to +X");
    Vec2::X
}
