//! Wavefront, breaking-wave and spawner parameters.

use serde::{Deserialize, Serialize};

/// Which timer governs cleanup when a wavefront and its breaking wave disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpiryPolicy {
    /// Both timers run independently; wavefront expiry removes whatever is left.
    #[default]
    Independent,

    /// Breaking-wave duration is clamped to the wavefront lifetime at spawn.
    ClampBreakerToFront,
}

/// How members of one set are placed around the base origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SetLayout {
    /// Side by side along the crest, centered on the base origin.
    #[default]
    Lateral,

    /// One behind another along the travel direction, leader at the base origin.
    Trailing,
}

/// Traveling wavefront and breaking-wave parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    // === Wavefront (ripple) ===
    /// Travel speed of every wavefront (meters per second)
    pub front_speed_m_per_s: f32,

    /// Nominal crest length (meters). Half of it offsets the initial front.
    pub crest_length_m: f32,

    /// Lifetime of every wavefront (seconds)
    pub front_lifetime_s: f32,

    /// Half-width of the displaced band around the front (meters)
    pub crest_width_m: f32,

    /// Peak vertical displacement of a front (meters)
    pub amplitude_m: f32,

    // === Breaking wave ===
    /// Breaking-wave duration range (seconds)
    pub breaker_duration_range_s: (f32, f32),

    /// Fraction of the duration spent growing (dimensionless)
    pub grow_fraction: f32,

    /// Fraction of the duration spent shrinking (dimensionless)
    pub shrink_fraction: f32,

    /// Maximum crest length of a breaking wave (meters)
    pub breaker_max_length_m: f32,

    /// Foam band thickness (meters)
    pub breaker_height_m: f32,

    /// Barrel highlight width (meters along the crest)
    pub barrel_width_m: f32,

    /// Barrel traversal speed range (crest fractions per lifetime)
    pub barrel_speed_range: (f32, f32),

    // === Collision volume ===
    /// Volumes shorter than this never collide (meters)
    pub collision_min_length_m: f32,

    /// Vertical extent of a volume (meters)
    pub collision_height_m: f32,

    /// Height of the volume center above the rest surface (meters)
    pub collision_center_height_m: f32,

    /// Thickness as a fraction of `breaker_height_m`
    pub collision_thickness_fraction: f32,

    /// Horizontal impulse along the travel direction (meters per second)
    pub impact_push_m_per_s: f32,

    /// Upward impulse fed into the boat bob (meters)
    pub impact_lift_m: f32,

    /// Impulse multiplier while the breaking wave is shrinking
    pub shrinking_impact_scale: f32,

    /// Coupling between wavefront and breaking-wave expiry
    pub expiry: ExpiryPolicy,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            front_speed_m_per_s: 8.4, // 0.14 m per 60 Hz frame: crosses the field in one lifetime
            crest_length_m: 260.0,
            front_lifetime_s: 40.0,
            crest_width_m: 15.0,
            amplitude_m: 2.0,

            breaker_duration_range_s: (32.0, 42.0),
            grow_fraction: 0.22,
            shrink_fraction: 0.22,
            breaker_max_length_m: 475.0, // 95% of the water surface
            breaker_height_m: 12.0,
            barrel_width_m: 18.0,
            barrel_speed_range: (0.55, 0.80),

            collision_min_length_m: 10.0,
            collision_height_m: 4.0,
            collision_center_height_m: 1.0,
            collision_thickness_fraction: 0.5,
            impact_push_m_per_s: 3.0,
            impact_lift_m: 0.35,
            shrinking_impact_scale: 0.5,

            expiry: ExpiryPolicy::Independent,
        }
    }
}

impl WaveParams {
    /// Fraction of the duration spent at full length
    pub fn steady_fraction(&self) -> f32 {
        1.0 - self.grow_fraction - self.shrink_fraction
    }

    /// Collision volume thickness along the travel direction (meters)
    pub fn collision_thickness_m(&self) -> f32 {
        self.breaker_height_m * self.collision_thickness_fraction
    }

    /// Validate phase fractions and ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.grow_fraction < 0.0 || self.shrink_fraction < 0.0 {
            return Err("Phase fractions must be >= 0".to_string());
        }
        if self.grow_fraction + self.shrink_fraction >= 1.0 {
            return Err(format!(
                "grow_fraction + shrink_fraction must be < 1, got {}",
                self.grow_fraction + self.shrink_fraction
            ));
        }
        if self.front_lifetime_s <= 0.0 || self.breaker_duration_range_s.0 <= 0.0 {
            return Err("Durations must be > 0".to_string());
        }
        if self.crest_width_m <= 0.0 {
            return Err("Crest width must be > 0".to_string());
        }
        if self.front_speed_m_per_s < 0.0 {
            return Err("front_speed_m_per_s must be >= 0".to_string());
        }
        check_range("breaker_duration_range_s", self.breaker_duration_range_s)?;
        check_range("barrel_speed_range", self.barrel_speed_range)?;
        // A negative speed would move the barrel backwards below its inset
        if self.barrel_speed_range.0 < 0.0 {
            return Err(format!(
                "barrel_speed_range must be >= 0, got {:?}",
                self.barrel_speed_range
            ));
        }
        Ok(())
    }
}

/// Wavefront set spawner parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerParams {
    /// Time between automatic sets (seconds)
    pub interval_s: f32,

    /// Inclusive range of wavefronts per set
    pub set_size_range: (u32, u32),

    /// Distance between consecutive members of a set (meters)
    pub spacing_m: f32,

    /// Placement of set members relative to each other
    pub layout: SetLayout,

    /// Distance of the base origin behind the field center (meters)
    pub origin_distance_m: f32,

    /// Spawn one set on the first frame instead of waiting a full interval
    pub spawn_on_start: bool,
}

impl Default for SpawnerParams {
    fn default() -> Self {
        Self {
            interval_s: 12.0,
            set_size_range: (1, 3),
            spacing_m: 30.0,
            layout: SetLayout::Lateral,
            origin_distance_m: 225.0, // 45% of the water surface
            spawn_on_start: true,
        }
    }
}

impl SpawnerParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_s <= 0.0 {
            return Err("Spawn interval must be > 0".to_string());
        }
        let (min, max) = self.set_size_range;
        if min == 0 || min > max {
            return Err(format!("Invalid set_size_range ({}, {})", min, max));
        }
        if self.spacing_m < 0.0 {
            return Err("spacing_m must be >= 0".to_string());
        }
        Ok(())
    }
}

fn check_range(name: &str, (min, max): (f32, f32)) -> Result<(), String> {
    if min > max {
        return Err(format!("{} is inverted: ({}, {})", name, min, max));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fractions_leave_steady_phase() {
        let params = WaveParams::default();
        assert!(params.steady_fraction() > 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_overlapping_fractions_rejected() {
        let params = WaveParams {
            grow_fraction: 0.6,
            shrink_fraction: 0.4,
            ..WaveParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_speeds_rejected() {
        let backwards_barrel = WaveParams {
            barrel_speed_range: (-0.8, -0.5),
            ..WaveParams::default()
        };
        assert!(backwards_barrel.validate().is_err());

        let backwards_front = WaveParams {
            front_speed_m_per_s: -1.0,
            ..WaveParams::default()
        };
        assert!(backwards_front.validate().is_err());

        let still_barrel = WaveParams {
            barrel_speed_range: (0.0, 0.0),
            ..WaveParams::default()
        };
        assert!(still_barrel.validate().is_ok());
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let spawner = SpawnerParams {
            spacing_m: -5.0,
            ..SpawnerParams::default()
        };
        assert!(spawner.validate().is_err());
    }

    #[test]
    fn test_empty_set_range_rejected() {
        let params = SpawnerParams {
            set_size_range: (0, 2),
            ..SpawnerParams::default()
        };
        assert!(params.validate().is_err());
    }
}
