//! Oriented collision volume derived from an active breaking wave.

use glam::{Quat, Vec2, Vec3};

use super::{to_world, BreakingWave, Phase, Wavefront};
use crate::params::WaveParams;

/// Oriented box riding the wavefront crest.
///
/// Local frame: +X along the crest, +Y up, +Z along the travel direction.
#[derive(Debug, Clone)]
pub struct CollisionVolume {
    pub center: Vec3,
    /// Rotation about world Y taking local +Z onto the travel direction
    pub yaw: f32,
    /// Full extents (crest length, height, thickness)
    pub extents: Vec3,
    active: bool,
    shrinking: bool,
    direction: Vec2,
}

impl CollisionVolume {
    /// Inert volume aligned with `front`
    pub fn new(front: &Wavefront) -> Self {
        let direction = front.direction();
        Self {
            center: to_world(front.origin, 0.0),
            yaw: direction.x.atan2(direction.y),
            extents: Vec3::ZERO,
            active: false,
            shrinking: false,
            direction,
        }
    }

    /// Track the wavefront and breaking wave for `time_s`
    pub fn update(
        &mut self,
        time_s: f32,
        front: &Wavefront,
        breaker: &BreakingWave,
        params: &WaveParams,
    ) {
        self.direction = front.direction();
        self.yaw = self.direction.x.atan2(self.direction.y);
        self.shrinking = breaker.phase == Phase::Shrinking;
        self.active = matches!(breaker.phase, Phase::Steady | Phase::Shrinking)
            && breaker.length_m > params.collision_min_length_m;

        if !self.active {
            self.extents = Vec3::ZERO;
            return;
        }

        self.center = to_world(
            front.front_center(time_s, params),
            params.collision_center_height_m,
        );
        self.extents = Vec3::new(
            breaker.length_m,
            params.collision_height_m,
            params.collision_thickness_m(),
        );
    }

    /// Make the volume inert (its wavefront or breaking wave is gone)
    pub fn deactivate(&mut self) {
        self.active = false;
        self.shrinking = false;
        self.extents = Vec3::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// World point expressed in the volume's local frame
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        Quat::from_rotation_y(-self.yaw) * (point - self.center)
    }

    /// Oriented box vs sphere overlap (per-axis, approximate at corners)
    pub fn check_collision(&self, point: Vec3, radius: f32) -> bool {
        if !self.active {
            return false;
        }
        let local = self.to_local(point).abs();
        let reach = self.extents / 2.0 + Vec3::splat(radius);
        local.x <= reach.x && local.y <= reach.y && local.z <= reach.z
    }

    /// Impulse handed to a boat caught by this volume
    pub fn impact_force(&self, params: &WaveParams) -> Vec3 {
        if !self.active {
            return Vec3::ZERO;
        }
        let push = self.direction * params.impact_push_m_per_s;
        let force = Vec3::new(push.x, params.impact_lift_m, push.y);
        if self.shrinking {
            force * params.shrinking_impact_scale
        } else {
            force
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(elapsed: f32) -> (Wavefront, BreakingWave, CollisionVolume, WaveParams) {
        let params = WaveParams::default();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let mut breaker = BreakingWave::new(0.0, 40.0, params.breaker_max_length_m, 0.6);
        breaker.update(elapsed, &params);
        let mut volume = CollisionVolume::new(&front);
        volume.update(elapsed, &front, &breaker, &params);
        (front, breaker, volume, params)
    }

    #[test]
    fn test_inactive_while_growing_regardless_of_position() {
        let (front, _, volume, params) = setup(1.0);
        assert!(!volume.is_active());
        let center = to_world(front.front_center(1.0, &params), params.collision_center_height_m);
        assert!(!volume.check_collision(center, 100.0));
        assert_eq!(volume.impact_force(&params), Vec3::ZERO);
    }

    #[test]
    fn test_inactive_when_done() {
        let (_, breaker, volume, _) = setup(40.0);
        assert!(breaker.is_done());
        assert!(!volume.is_active());
    }

    #[test]
    fn test_active_when_steady_and_tracks_front() {
        let (front, _, volume, params) = setup(20.0);
        assert!(volume.is_active());
        let expected = front.front_center(20.0, &params);
        assert!((volume.center.x - expected.x).abs() < 1e-3);
        assert!((volume.center.z - expected.y).abs() < 1e-3);
        assert_eq!(volume.center.y, params.collision_center_height_m);
        assert_eq!(volume.extents.x, params.breaker_max_length_m);
    }

    #[test]
    fn test_short_crest_stays_inert() {
        let params = WaveParams {
            collision_min_length_m: 1000.0,
            ..WaveParams::default()
        };
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let mut breaker = BreakingWave::new(0.0, 40.0, params.breaker_max_length_m, 0.6);
        breaker.update(20.0, &params);
        let mut volume = CollisionVolume::new(&front);
        volume.update(20.0, &front, &breaker, &params);
        assert!(!volume.is_active());
    }

    #[test]
    fn test_oriented_containment() {
        let (_, _, volume, params) = setup(20.0);
        let center = volume.center;
        let half_thickness = params.collision_thickness_m() / 2.0;

        // Direction +X: the crest runs along world Z, thickness along world X
        assert!(volume.check_collision(center + Vec3::new(0.0, 0.0, 200.0), 0.5));
        assert!(!volume.check_collision(center + Vec3::new(0.0, 0.0, 300.0), 0.5));
        assert!(volume.check_collision(center + Vec3::new(half_thickness + 0.4, 0.0, 0.0), 0.5));
        assert!(!volume.check_collision(center + Vec3::new(half_thickness + 0.6, 0.0, 0.0), 0.5));
    }

    #[test]
    fn test_impulse_follows_travel_and_halves_when_shrinking() {
        let (_, _, steady, params) = setup(20.0);
        let force = steady.impact_force(&params);
        assert!(force.x > 0.0);
        assert!(force.z.abs() < 1e-6);
        assert!(force.y > 0.0);

        let (_, breaker, shrinking, _) = setup(35.0);
        assert_eq!(breaker.phase, Phase::Shrinking);
        let weaker = shrinking.impact_force(&params);
        assert!((weaker.x - force.x * params.shrinking_impact_scale).abs() < 1e-5);
    }

    #[test]
    fn test_deactivate_clears_activity() {
        let (_, _, mut volume, params) = setup(20.0);
        volume.deactivate();
        assert!(!volume.check_collision(volume.center, 1.0));
        assert_eq!(volume.impact_force(&params), Vec3::ZERO);
    }
}
