//! Boat physics: thrust, turning, drag, wave impacts, bob and tilt, wake.

mod wake;

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use log::debug;
use rand::Rng;

use crate::params::{BoatTuning, WaveParams, REFERENCE_FRAME_S};
use crate::waves::CollisionVolume;

pub use wake::{Wake, WakeParticle};

/// Hull dimensions (meters): beam, height, length
pub const HULL_SIZE: Vec3 = Vec3::new(1.0, 0.5, 2.0);

/// Snapshot of the player's steering flags for one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Dynamic state of the player's boat
#[derive(Debug, Clone, Default)]
pub struct BoatState {
    /// World XZ position
    pub position: Vec2,
    /// Horizontal velocity (meters per second)
    pub velocity: Vec2,
    /// Yaw rate (radians per second)
    pub angular_velocity: f32,
    /// Yaw (radians); 0 faces world -Z, positive turns left
    pub heading: f32,
    pub bob_offset: f32,
    pub roll: f32,
    pub pitch: f32,
    /// Time left before another wave hit can register (seconds)
    pub impact_cooldown_s: f32,
    /// Raised on a hit, cleared when the cooldown runs out
    pub just_hit: bool,
    bob_impulse: f32,
    pub wake: Wake,
}

/// Fraction of a per-reference-frame factor applied over `dt_s`
fn per_frame(factor: f32, dt_s: f32) -> f32 {
    factor.powf(dt_s / REFERENCE_FRAME_S)
}

impl BoatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit vector the bow points at
    pub fn forward(&self) -> Vec2 {
        Vec2::new(-self.heading.sin(), -self.heading.cos())
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Point tested against collision volumes
    pub fn hull_center(&self, tuning: &BoatTuning) -> Vec3 {
        Vec3::new(self.position.x, tuning.draft_m, self.position.y)
    }

    /// Advance the boat by one frame.
    ///
    /// # Arguments
    /// * `time_s` - Current simulation time in seconds
    /// * `dt_s` - Step length in seconds
    /// * `intent` - Steering flags captured for this frame
    /// * `volumes` - Collision volumes already advanced to `time_s`
    ///
    /// # Returns
    /// * Number of wave hits applied (0 or 1)
    #[allow(clippy::too_many_arguments)]
    pub fn update<'v, R: Rng + ?Sized>(
        &mut self,
        time_s: f32,
        dt_s: f32,
        intent: ControlIntent,
        volumes: impl IntoIterator<Item = &'v CollisionVolume>,
        tuning: &BoatTuning,
        waves: &WaveParams,
        rng: &mut R,
    ) -> usize {
        // 1. Cooldown
        self.impact_cooldown_s = (self.impact_cooldown_s - dt_s).max(0.0);
        if self.impact_cooldown_s <= 0.0 {
            self.just_hit = false;
        }

        // 2. Wave impacts
        let hull = self.hull_center(tuning);
        let mut hits = 0;
        for volume in volumes {
            if self.impact_cooldown_s > 0.0 || !volume.check_collision(hull, tuning.hull_radius_m)
            {
                continue;
            }
            let force = volume.impact_force(waves);
            self.velocity += Vec2::new(force.x, force.z);
            let kick = tuning.impact_yaw_kick_rad_per_s;
            self.angular_velocity += rng.gen_range(-kick..=kick);
            self.just_hit = true;
            self.impact_cooldown_s = tuning.impact_cooldown_s;
            self.bob_impulse += force.y;
            hits += 1;
            debug!("Wave hit at {:?}, impulse {:?}", self.position, force);
        }

        // 3. Turning
        if intent.left {
            self.angular_velocity += tuning.turn_accel_rad_per_s2 * dt_s;
        }
        if intent.right {
            self.angular_velocity -= tuning.turn_accel_rad_per_s2 * dt_s;
        }
        self.heading += self.angular_velocity * dt_s;
        self.angular_velocity *= per_frame(tuning.angular_damping, dt_s);

        // 4. Thrust
        let mut thrust = 0.0;
        if intent.forward {
            thrust += tuning.thrust_m_per_s2;
        }
        if intent.backward {
            thrust -= tuning.thrust_m_per_s2 * tuning.backward_scale;
        }
        self.velocity += self.forward() * thrust * dt_s;

        // 5. Speed clamp
        self.velocity = self.velocity.clamp_length_max(tuning.max_speed_m_per_s);

        // 6. Drag, heavier while recovering from a hit
        let damping = if self.just_hit {
            tuning.impact_damping
        } else {
            tuning.calm_damping
        };
        self.velocity *= per_frame(damping, dt_s);

        // 7. Position
        self.position += self.velocity * dt_s;

        // 8. Bob and tilt
        self.update_attitude(time_s, dt_s, tuning);

        // 9. Wake
        self.update_wake(dt_s, tuning, rng);

        hits
    }

    fn update_attitude(&mut self, time_s: f32, dt_s: f32, tuning: &BoatTuning) {
        let speed_fraction = self.speed() / tuning.max_speed_m_per_s;
        self.bob_impulse *= per_frame(tuning.bob_impulse_decay, dt_s);

        let mut target_bob = (time_s * tuning.bob_freq_rad_per_s).sin()
            * tuning.bob_amplitude_m
            * (1.0 + tuning.bob_speed_gain * speed_fraction)
            + self.bob_impulse;
        let mut target_pitch = tuning.pitch_per_speed_rad * speed_fraction;
        let mut target_roll = -self.angular_velocity * tuning.roll_per_yaw_rate;

        if self.just_hit {
            let wobble = time_s * tuning.hit_wobble_freq_rad_per_s;
            target_roll += wobble.sin() * tuning.hit_wobble_rad;
            target_pitch += wobble.cos() * tuning.hit_wobble_rad * 0.5;
            target_bob += wobble.sin() * self.bob_impulse * 0.5;
        }

        let blend = 1.0 - per_frame(1.0 - tuning.tilt_smoothing, dt_s);
        self.bob_offset += (target_bob - self.bob_offset) * blend;
        self.pitch += (target_pitch - self.pitch) * blend;
        self.roll += (target_roll - self.roll) * blend;
    }

    fn update_wake<R: Rng + ?Sized>(&mut self, dt_s: f32, tuning: &BoatTuning, rng: &mut R) {
        self.wake.age(dt_s);

        let speed_fraction = self.speed() / tuning.max_speed_m_per_s;
        if speed_fraction <= f32::EPSILON {
            return;
        }
        let chance = speed_fraction * tuning.wake_rate * (dt_s / REFERENCE_FRAME_S);
        if rng.gen::<f32>() >= chance {
            return;
        }

        let jitter = rng.gen_range(-tuning.wake_jitter_m..=tuning.wake_jitter_m);
        let position = self.position - self.forward() * tuning.wake_stern_offset_m
            + self.forward().perp() * jitter;
        self.wake
            .emit(position, tuning.wake_lifetime_s, tuning.wake_max_particles);
    }

    /// Model transform for rendering, riding a surface at `surface_height`
    pub fn model_matrix(&self, surface_height: f32, tuning: &BoatTuning) -> Mat4 {
        let translation = Vec3::new(
            self.position.x,
            surface_height + tuning.draft_m + self.bob_offset,
            self.position.y,
        );
        let rotation = Quat::from_euler(EulerRot::YXZ, self.heading, self.pitch, self.roll);
        Mat4::from_rotation_translation(rotation, translation)
    }
}
