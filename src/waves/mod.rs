//! Traveling wavefronts with breaking-wave foam and collision volumes.
//!
//! Axis convention: a horizontal `Vec2 (x, y)` maps to world `(x, 0, y)`, so a
//! direction of `(1, 0)` travels toward world +X.

mod breaking;
mod collision;
mod registry;
mod spawner;

use glam::{Vec2, Vec3};

use crate::params::WaveParams;

pub use breaking::{BreakingWave, Phase};
pub use collision::CollisionVolume;
pub use registry::{Wave, WaveId, WaveRegistry};
pub use spawner::{random_direction, spawn_set, WaveSpawner};

/// Lift a horizontal vector into world space at height `y`
pub fn to_world(v: Vec2, y: f32) -> Vec3 {
    Vec3::new(v.x, y, v.y)
}

/// One linear wave crest spanning the field
#[derive(Debug, Clone)]
pub struct Wavefront {
    /// World XZ position the front is measured from
    pub origin: Vec2,

    /// Unit travel direction in the horizontal plane
    direction: Vec2,

    /// Simulation time of creation (seconds)
    pub spawn_time_s: f32,

    /// Fixed lifetime (seconds)
    lifetime_s: f32,
}

impl Wavefront {
    /// Create a wavefront; returns `None` for a degenerate direction
    pub fn new(origin: Vec2, direction: Vec2, spawn_time_s: f32, lifetime_s: f32) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self {
            origin,
            direction,
            spawn_time_s,
            lifetime_s,
        })
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn lifetime_s(&self) -> f32 {
        self.lifetime_s
    }

    pub fn age(&self, time_s: f32) -> f32 {
        time_s - self.spawn_time_s
    }

    pub fn is_expired(&self, time_s: f32) -> bool {
        self.age(time_s) >= self.lifetime_s
    }

    /// Distance of the leading edge from `origin` along `direction`.
    ///
    /// Shared by the height field, the collision volumes and the overlay so
    /// that visuals and physics agree on where the crest is.
    pub fn front_offset(&self, time_s: f32, params: &WaveParams) -> f32 {
        self.age(time_s) * params.front_speed_m_per_s + params.crest_length_m / 2.0
    }

    /// Horizontal world position of the crest centerline
    pub fn front_center(&self, time_s: f32, params: &WaveParams) -> Vec2 {
        self.origin + self.direction * self.front_offset(time_s, params)
    }

    /// Signed distance of a horizontal point ahead of the front
    pub fn distance_to_front(&self, point: Vec2, time_s: f32, params: &WaveParams) -> f32 {
        (point - self.origin).dot(self.direction) - self.front_offset(time_s, params)
    }

    /// Unit vector along the crest (perpendicular to travel)
    pub fn crest_axis(&self) -> Vec2 {
        self.direction.perp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Wavefront::new(Vec2::ZERO, Vec2::ZERO, 0.0, 40.0).is_none());
    }

    #[test]
    fn test_direction_normalized() {
        let front = Wavefront::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.0, 40.0).unwrap();
        assert!((front.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_front_starts_half_crest_ahead() {
        let params = WaveParams::default();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 2.0, 40.0).unwrap();
        assert_eq!(front.front_offset(2.0, &params), params.crest_length_m / 2.0);

        let later = front.front_offset(3.0, &params);
        assert!((later - (params.crest_length_m / 2.0 + params.front_speed_m_per_s)).abs() < 1e-4);
    }

    #[test]
    fn test_positive_x_direction_travels_toward_positive_x() {
        let params = WaveParams::default();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let start = to_world(front.front_center(0.0, &params), 0.0);
        let end = to_world(front.front_center(10.0, &params), 0.0);
        assert!(end.x > start.x);
        assert_eq!(end.z, 0.0);
    }

    #[test]
    fn test_expiry_boundary() {
        let front = Wavefront::new(Vec2::ZERO, Vec2::Y, 1.0, 40.0).unwrap();
        assert!(!front.is_expired(1.0));
        assert!(!front.is_expired(40.999));
        assert!(front.is_expired(41.0));
    }
}
