//! Height-field evaluation: ambient swell plus traveling wavefront bands.

use std::f32::consts::PI;

use glam::Vec2;

use super::WaterGrid;
use crate::params::{WaterParams, WaveParams};
use crate::waves::Wavefront;

/// Displacement of a single front at signed distance `dist` ahead of it.
///
/// One sine period across the band `(-width, width)`; zero on and beyond
/// the band edges.
pub fn front_contribution(dist: f32, width: f32, amplitude: f32) -> f32 {
    if dist.abs() < width {
        (dist / width * PI).sin() * amplitude
    } else {
        0.0
    }
}

/// Slow two-term swell independent of wavefronts
pub fn swell_height(x: f32, z: f32, time_s: f32, water: &WaterParams) -> f32 {
    if !water.swell_enabled {
        return 0.0;
    }
    let phase = time_s * water.swell_speed;
    (x * water.swell_frequency + phase).sin() * water.swell_amplitude_m
        + (z * water.swell_frequency + phase).cos() * water.swell_amplitude_m
}

/// Frozen snapshot of every height contributor at one instant.
///
/// Pure: the same fronts and time always produce the same surface.
#[derive(Debug, Clone)]
pub struct HeightField<'a> {
    time_s: f32,
    fronts: Vec<Wavefront>,
    waves: &'a WaveParams,
    water: &'a WaterParams,
}

impl<'a> HeightField<'a> {
    pub fn new<'f>(
        time_s: f32,
        fronts: impl IntoIterator<Item = &'f Wavefront>,
        waves: &'a WaveParams,
        water: &'a WaterParams,
    ) -> Self {
        let fronts = fronts
            .into_iter()
            .filter(|front| !front.is_expired(time_s))
            .cloned()
            .collect();

        Self {
            time_s,
            fronts,
            waves,
            water,
        }
    }

    /// Surface height at world (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let point = Vec2::new(x, z);
        let waves: f32 = self
            .fronts
            .iter()
            .map(|front| {
                let dist = front.distance_to_front(point, self.time_s, self.waves);
                front_contribution(dist, self.waves.crest_width_m, self.waves.amplitude_m)
            })
            .sum();
        swell_height(x, z, self.time_s, self.water) + waves
    }

    /// Displace every grid vertex and refresh its normals
    pub fn apply(&self, grid: &mut WaterGrid) {
        grid.displace(|x, z| self.height_at(x, z));
    }

    pub fn front_count(&self) -> usize {
        self.fronts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_water() -> WaterParams {
        WaterParams {
            swell_enabled: false,
            ..WaterParams::default()
        }
    }

    #[test]
    fn test_contribution_zero_outside_and_on_band_edge() {
        assert_eq!(front_contribution(15.0, 15.0, 2.0), 0.0);
        assert_eq!(front_contribution(-15.0, 15.0, 2.0), 0.0);
        assert_eq!(front_contribution(40.0, 15.0, 2.0), 0.0);
        // Continuous approaching the edge
        assert!(front_contribution(14.999, 15.0, 2.0).abs() < 1e-3);
        assert!(front_contribution(-14.999, 15.0, 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_contribution_peaks_mid_band() {
        let peak = front_contribution(7.5, 15.0, 2.0);
        assert!((peak - 2.0).abs() < 1e-5);
        let trough = front_contribution(-7.5, 15.0, 2.0);
        assert!((trough + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_fronts_gives_baseline() {
        let waves = WaveParams::default();
        let water = calm_water();
        let field = HeightField::new(3.0, std::iter::empty(), &waves, &water);
        assert_eq!(field.front_count(), 0);
        assert_eq!(field.height_at(12.0, -40.0), 0.0);

        let swell = WaterParams::default();
        let field = HeightField::new(3.0, std::iter::empty(), &waves, &swell);
        assert_eq!(field.height_at(12.0, -40.0), swell_height(12.0, -40.0, 3.0, &swell));
    }

    #[test]
    fn test_single_front_band() {
        let waves = WaveParams::default();
        let water = calm_water();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let field = HeightField::new(10.0, [&front], &waves, &water);

        let at_front = front.front_offset(10.0, &waves);
        let quarter = waves.crest_width_m / 2.0;
        assert!((field.height_at(at_front + quarter, 0.0) - waves.amplitude_m).abs() < 1e-3);
        // Uniform along the crest
        assert!((field.height_at(at_front + quarter, 180.0) - waves.amplitude_m).abs() < 1e-3);
        assert_eq!(field.height_at(at_front + waves.crest_width_m + 1.0, 0.0), 0.0);
        assert_eq!(field.height_at(at_front - waves.crest_width_m - 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_diagonal_front_follows_distance_to_front() {
        let waves = WaveParams::default();
        let water = calm_water();
        let direction = Vec2::new(1.0, 1.0).normalize();
        let front = Wavefront::new(Vec2::new(-50.0, 20.0), direction, 0.0, 40.0).unwrap();
        let field = HeightField::new(6.0, [&front], &waves, &water);

        for along_crest in [-100.0, 0.0, 75.0] {
            let point = front.front_center(6.0, &waves)
                + direction * (waves.crest_width_m / 2.0)
                + front.crest_axis() * along_crest;
            let dist = front.distance_to_front(point, 6.0, &waves);
            assert!((dist - waves.crest_width_m / 2.0).abs() < 1e-3);
            assert!((field.height_at(point.x, point.y) - waves.amplitude_m).abs() < 1e-3);
        }
    }

    #[test]
    fn test_overlapping_fronts_sum() {
        let waves = WaveParams::default();
        let water = calm_water();
        let a = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let b = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let single = HeightField::new(5.0, [&a], &waves, &water);
        let double = HeightField::new(5.0, [&a, &b], &waves, &water);
        let x = a.front_offset(5.0, &waves) + 3.0;
        assert!((double.height_at(x, 0.0) - 2.0 * single.height_at(x, 0.0)).abs() < 1e-5);
    }

    #[test]
    fn test_expired_front_ignored() {
        let waves = WaveParams::default();
        let water = calm_water();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, 40.0).unwrap();
        let field = HeightField::new(40.0, [&front], &waves, &water);
        assert_eq!(field.front_count(), 0);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let waves = WaveParams::default();
        let water = WaterParams::default();
        let front = Wavefront::new(Vec2::new(-225.0, 0.0), Vec2::X, 0.0, 40.0).unwrap();

        let mut first = WaterGrid::new(&water);
        let mut second = WaterGrid::new(&water);
        HeightField::new(7.0, [&front], &waves, &water).apply(&mut first);
        HeightField::new(7.0, [&front], &waves, &water).apply(&mut second);

        for (a, b) in first.vertices.iter().zip(&second.vertices) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.normal, b.normal);
        }
        assert!(first.vertices.iter().any(|v| v.position[1].abs() > 1.0));
    }
}
