//! Boat handling, bobbing and wake parameters.
//!
//! Per-frame factors (damping, smoothing, wake chance) are expressed against a
//! 60 Hz reference frame and rescaled by the integrator for the actual step.

use serde::{Deserialize, Serialize};

/// Duration of the reference frame the per-frame factors are tuned for (seconds)
pub const REFERENCE_FRAME_S: f32 = 1.0 / 60.0;

/// Boat physics tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatTuning {
    /// Forward thrust acceleration (meters per second squared)
    pub thrust_m_per_s2: f32,

    /// Reverse thrust as a fraction of forward thrust
    pub backward_scale: f32,

    /// Yaw acceleration while a turn flag is held (radians per second squared)
    pub turn_accel_rad_per_s2: f32,

    /// Yaw velocity retained per reference frame
    pub angular_damping: f32,

    /// Speed clamp (meters per second)
    pub max_speed_m_per_s: f32,

    /// Velocity retained per reference frame in calm water
    pub calm_damping: f32,

    /// Velocity retained per reference frame right after a wave hit
    pub impact_damping: f32,

    /// Minimum time between two wave hits (seconds)
    pub impact_cooldown_s: f32,

    /// Maximum random yaw kick on a hit (radians per second, ±)
    pub impact_yaw_kick_rad_per_s: f32,

    /// Sphere radius used against collision volumes (meters)
    pub hull_radius_m: f32,

    /// Rest height of the hull center above the surface (meters)
    pub draft_m: f32,

    // === Bob and tilt ===
    /// Idle bob amplitude (meters)
    pub bob_amplitude_m: f32,

    /// Idle bob angular frequency (radians per second)
    pub bob_freq_rad_per_s: f32,

    /// Extra bob amplitude at full speed (fraction of idle amplitude)
    pub bob_speed_gain: f32,

    /// Bob impulse retained per reference frame
    pub bob_impulse_decay: f32,

    /// Nose-up pitch at full speed (radians)
    pub pitch_per_speed_rad: f32,

    /// Roll per unit of yaw velocity (dimensionless)
    pub roll_per_yaw_rate: f32,

    /// Oscillation added to roll and pitch while just hit (radians)
    pub hit_wobble_rad: f32,

    /// Angular frequency of the hit wobble (radians per second)
    pub hit_wobble_freq_rad_per_s: f32,

    /// Fraction of the remaining gap closed per reference frame
    pub tilt_smoothing: f32,

    // === Wake ===
    /// Emission chance per reference frame at full speed
    pub wake_rate: f32,

    /// Lifetime of a wake particle (seconds)
    pub wake_lifetime_s: f32,

    /// Upper bound on live wake particles
    pub wake_max_particles: usize,

    /// Distance behind the hull center where particles appear (meters)
    pub wake_stern_offset_m: f32,

    /// Lateral jitter of the emission point (meters, ±)
    pub wake_jitter_m: f32,

    /// Scale growth over a particle's life (final scale = 1 + growth)
    pub wake_growth: f32,
}

impl Default for BoatTuning {
    fn default() -> Self {
        Self {
            thrust_m_per_s2: 40.0,
            backward_scale: 0.7,
            turn_accel_rad_per_s2: 3.8,
            angular_damping: 0.85,
            max_speed_m_per_s: 9.0,
            calm_damping: 0.94,
            impact_damping: 0.90,
            impact_cooldown_s: 0.5,
            impact_yaw_kick_rad_per_s: 0.6,
            hull_radius_m: 1.0,
            draft_m: 0.27,

            bob_amplitude_m: 0.06,
            bob_freq_rad_per_s: 2.2,
            bob_speed_gain: 0.5,
            bob_impulse_decay: 0.92,
            pitch_per_speed_rad: 0.06,
            roll_per_yaw_rate: 0.12,
            hit_wobble_rad: 0.08,
            hit_wobble_freq_rad_per_s: 18.0,
            tilt_smoothing: 0.1,

            wake_rate: 0.6,
            wake_lifetime_s: 1.2,
            wake_max_particles: 96,
            wake_stern_offset_m: 1.1,
            wake_jitter_m: 0.3,
            wake_growth: 2.0,
        }
    }
}

impl BoatTuning {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_speed_m_per_s <= 0.0 {
            return Err("max_speed_m_per_s must be > 0".to_string());
        }
        for (name, factor) in [
            ("angular_damping", self.angular_damping),
            ("calm_damping", self.calm_damping),
            ("impact_damping", self.impact_damping),
            ("bob_impulse_decay", self.bob_impulse_decay),
            ("tilt_smoothing", self.tilt_smoothing),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(format!("{} must be in [0, 1], got {}", name, factor));
            }
        }
        if self.wake_lifetime_s <= 0.0 {
            return Err("wake_lifetime_s must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_smoothing_outside_unit_range_rejected() {
        for tilt_smoothing in [-0.1, 1.5] {
            let tuning = BoatTuning {
                tilt_smoothing,
                ..BoatTuning::default()
            };
            assert!(tuning.validate().is_err(), "accepted {}", tilt_smoothing);
        }
        let snappy = BoatTuning {
            tilt_smoothing: 1.0,
            ..BoatTuning::default()
        };
        assert!(snappy.validate().is_ok());
    }
}
