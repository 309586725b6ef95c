//! Screen-space overlay: breaking-wave foam, barrels, wake and control buttons.
//!
//! Rebuilt from scratch every frame as a flat triangle list in pixel
//! coordinates (origin top-left); the overlay shader maps pixels to NDC.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};

use crate::boat::Wake;
use crate::params::{BoatTuning, WaveParams};
use crate::waves::{to_world, Phase, Wave, WaveRegistry};

/// Overlay vertex in pixel space
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

const FOAM_COLOR: u32 = 0xeaf7ff;
const FOAM_ALPHA: f32 = 0.81;
const BARREL_COLOR: u32 = 0xb4e1ff;
const BARREL_ALPHA: f32 = 0.9;
const WAKE_COLOR: u32 = 0xffffff;
const WAKE_ALPHA: f32 = 0.7;
const WAKE_SIZE_M: f32 = 0.6;
/// Lifts overlay geometry off the water so it is not hidden by the crest
const OVERLAY_LIFT_M: f32 = 0.05;

const BUTTON_SIZE_PX: f32 = 64.0;
const BUTTON_GAP_PX: f32 = 8.0;
const BUTTON_MARGIN_PX: f32 = 24.0;

/// Convert an sRGB hex color to linear RGBA for an sRGB render target
pub fn hex_color(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| (((rgb >> shift) & 0xff) as f32 / 255.0).powf(2.2);
    [channel(16), channel(8), channel(0), alpha]
}

/// Map a clip-space point in front of the camera to pixels
fn clip_to_screen(clip: Vec4, screen: Vec2) -> Vec2 {
    let ndc = clip.truncate() / clip.w;
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * screen.x,
        (1.0 - ndc.y) * 0.5 * screen.y,
    )
}

/// Clip a convex clip-space polygon to the near plane (`z >= 0`).
///
/// What remains lies in front of the camera with `w >= near`, so the
/// perspective divide is safe for every returned vertex.
pub fn clip_near(polygon: &[Vec4]) -> Vec<Vec4> {
    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let current_in = current.z >= 0.0;
        if current_in {
            out.push(current);
        }
        if current_in != (next.z >= 0.0) {
            let t = current.z / (current.z - next.z);
            out.push(current.lerp(next, t));
        }
    }
    out
}

/// On-screen control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Forward,
    Backward,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Forward, Button::Backward, Button::Left, Button::Right];

    /// Pixel rectangle of this button for a given screen size (D-pad, bottom-left)
    pub fn rect(self, screen: Vec2) -> Rect {
        let step = BUTTON_SIZE_PX + BUTTON_GAP_PX;
        let bottom_row = screen.y - BUTTON_MARGIN_PX - BUTTON_SIZE_PX;
        let (col, row_y) = match self {
            Button::Left => (0.0, bottom_row),
            Button::Backward => (1.0, bottom_row),
            Button::Right => (2.0, bottom_row),
            Button::Forward => (1.0, bottom_row - step),
        };
        Rect {
            min: Vec2::new(BUTTON_MARGIN_PX + col * step, row_y),
            size: Vec2::splat(BUTTON_SIZE_PX),
        }
    }

    /// Button under a pixel position, if any
    pub fn at(point: Vec2, screen: Vec2) -> Option<Button> {
        Self::ALL
            .into_iter()
            .find(|button| button.rect(screen).contains(point))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        point.x >= self.min.x && point.y >= self.min.y && point.x < max.x && point.y < max.y
    }

    fn corners(&self) -> [Vec2; 4] {
        let max = self.min + self.size;
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }
}

/// Per-frame overlay geometry
#[derive(Debug, Default)]
pub struct Overlay {
    pub vertices: Vec<OverlayVertex>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Number of triangles currently queued
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Push a convex polygon (pixels, perimeter order) as a triangle fan
    fn push_polygon(&mut self, corners: &[Vec2], color: [f32; 4]) {
        for i in 1..corners.len().saturating_sub(1) {
            for corner in [corners[0], corners[i], corners[i + 1]] {
                self.vertices.push(OverlayVertex {
                    position: corner.to_array(),
                    color,
                });
            }
        }
    }

    /// Project a quad lying on the water plane, keeping only the part in
    /// front of the near plane. Returns whether anything was emitted.
    fn push_world_quad(
        &mut self,
        corners: [Vec2; 4],
        height: f32,
        view_proj: Mat4,
        screen: Vec2,
        color: [f32; 4],
    ) -> bool {
        let clip = corners.map(|corner| view_proj * to_world(corner, height).extend(1.0));
        let visible = clip_near(&clip);
        if visible.len() < 3 {
            return false;
        }
        let pixels: Vec<Vec2> = visible
            .into_iter()
            .map(|point| clip_to_screen(point, screen))
            .collect();
        self.push_polygon(&pixels, color);
        true
    }

    /// Foam band and barrel for every wave with a visible breaking phase
    pub fn add_breaking_waves(
        &mut self,
        registry: &WaveRegistry,
        time_s: f32,
        params: &WaveParams,
        view_proj: Mat4,
        screen: Vec2,
    ) {
        for wave in registry.iter() {
            self.add_breaking_wave(wave, time_s, params, view_proj, screen);
        }
    }

    fn add_breaking_wave(
        &mut self,
        wave: &Wave,
        time_s: f32,
        params: &WaveParams,
        view_proj: Mat4,
        screen: Vec2,
    ) {
        let Some(breaker) = &wave.breaker else {
            return;
        };
        if breaker.phase == Phase::Done || breaker.length_m <= 0.0 {
            return;
        }

        let center = wave.front.front_center(time_s, params);
        let axis = wave.front.crest_axis();
        let dir = wave.front.direction();
        let half_len = breaker.length_m * 0.5;
        let half_depth = params.breaker_height_m * 0.5;

        let band = |from: f32, to: f32| {
            [
                center + axis * from - dir * half_depth,
                center + axis * to - dir * half_depth,
                center + axis * to + dir * half_depth,
                center + axis * from + dir * half_depth,
            ]
        };

        let foam = hex_color(FOAM_COLOR, FOAM_ALPHA);
        self.push_world_quad(band(-half_len, half_len), OVERLAY_LIFT_M, view_proj, screen, foam);

        // Barrel travels along the crest from one end toward the other
        let barrel_center = -half_len + breaker.barrel_pos * breaker.length_m;
        let half_barrel = params.barrel_width_m * 0.5;
        let from = (barrel_center - half_barrel).max(-half_len);
        let to = (barrel_center + half_barrel).min(half_len);
        if to > from {
            let barrel = hex_color(BARREL_COLOR, BARREL_ALPHA);
            self.push_world_quad(band(from, to), OVERLAY_LIFT_M * 2.0, view_proj, screen, barrel);
        }
    }

    /// Fading, growing squares for each wake particle
    pub fn add_wake(
        &mut self,
        wake: &Wake,
        surface_height: f32,
        tuning: &BoatTuning,
        view_proj: Mat4,
        screen: Vec2,
    ) {
        for particle in wake.iter() {
            let half = WAKE_SIZE_M * particle.scale(tuning.wake_growth) * 0.5;
            let p = particle.position;
            let corners = [
                p + Vec2::new(-half, -half),
                p + Vec2::new(half, -half),
                p + Vec2::new(half, half),
                p + Vec2::new(-half, half),
            ];
            let color = hex_color(WAKE_COLOR, WAKE_ALPHA * particle.opacity());
            self.push_world_quad(
                corners,
                surface_height + OVERLAY_LIFT_M,
                view_proj,
                screen,
                color,
            );
        }
    }

    /// Control buttons, highlighted while held
    pub fn add_buttons(&mut self, held: Option<Button>, screen: Vec2) {
        for button in Button::ALL {
            let alpha = if held == Some(button) { 0.7 } else { 0.35 };
            self.push_polygon(&button.rect(screen).corners(), hex_color(0x1d3557, alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSystem;
    use crate::params::{CameraPreset, RenderConfig};
    use crate::waves::{BreakingWave, Wavefront};
    use glam::Vec3;

    const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

    fn top_down() -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 400.0, 0.01), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(75f32.to_radians(), SCREEN.x / SCREEN.y, 0.1, 1000.0);
        proj * view
    }

    /// Default chase camera settled behind a boat at the origin facing -Z
    fn chase_view() -> Mat4 {
        let mut camera = CameraSystem::new(CameraPreset::default());
        camera.update(1.0 / 60.0, Vec3::new(0.0, 0.27, 0.0), 0.0);
        camera.create_view_proj_matrix(&RenderConfig::default()).0
    }

    fn all_finite(overlay: &Overlay) -> bool {
        overlay
            .vertices
            .iter()
            .all(|v| v.position[0].is_finite() && v.position[1].is_finite())
    }

    #[test]
    fn test_clip_near_keeps_front_part_only() {
        let vp = top_down();
        // Horizontal square straddling the camera height: two corners behind
        let quad = [
            Vec3::new(-10.0, 300.0, -10.0),
            Vec3::new(10.0, 300.0, -10.0),
            Vec3::new(10.0, 500.0, 10.0),
            Vec3::new(-10.0, 500.0, 10.0),
        ]
        .map(|p| vp * p.extend(1.0));

        let clipped = clip_near(&quad);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| p.z >= -1e-4 && p.w > 0.0));

        let behind = [quad[2], quad[3], quad[2]];
        assert!(clip_near(&behind).is_empty());
    }

    #[test]
    fn test_center_projects_to_screen_middle() {
        let clip = top_down() * Vec3::ZERO.extend(1.0);
        let center = clip_to_screen(clip, SCREEN);
        assert!((center - SCREEN * 0.5).length() < 1.0);
    }

    #[test]
    fn test_breaking_wave_adds_foam_and_barrel() {
        let params = WaveParams::default();
        let mut registry = WaveRegistry::new();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, params.front_lifetime_s).unwrap();
        registry.insert(front, BreakingWave::new(0.0, 30.0, 200.0, 0.6));

        // Mid-steady phase: full length
        registry.advance(15.0, &params);
        let mut overlay = Overlay::new();
        overlay.add_breaking_waves(&registry, 15.0, &params, top_down(), SCREEN);
        assert_eq!(overlay.triangle_count(), 4);
        assert!(all_finite(&overlay));
    }

    #[test]
    fn test_crest_passing_the_chase_camera_is_drawn() {
        let params = WaveParams::default();
        let mut registry = WaveRegistry::new();
        let front =
            Wavefront::new(Vec2::new(-250.0, 0.0), Vec2::X, 0.0, params.front_lifetime_s).unwrap();
        registry.insert(
            front,
            BreakingWave::new(0.0, 40.0, params.breaker_max_length_m, 0.6),
        );
        registry.advance(15.0, &params);

        // Crest centerline runs along Z, 6 m ahead of the boat; one end is behind the camera
        let center = registry.iter().next().unwrap().front.front_center(15.0, &params);
        assert!((center - Vec2::new(6.0, 0.0)).length() < 1e-3);

        let mut overlay = Overlay::new();
        overlay.add_breaking_waves(&registry, 15.0, &params, chase_view(), SCREEN);
        assert!(overlay.triangle_count() >= 4);
        assert!(all_finite(&overlay));
        assert!(overlay.vertices.iter().any(|v| {
            let p = Vec2::from_array(v.position);
            p.x >= 0.0 && p.x <= SCREEN.x && p.y >= 0.0 && p.y <= SCREEN.y
        }));
    }

    #[test]
    fn test_no_overlay_for_zero_length_breaker() {
        let params = WaveParams::default();
        let mut registry = WaveRegistry::new();
        let front = Wavefront::new(Vec2::ZERO, Vec2::X, 0.0, params.front_lifetime_s).unwrap();
        registry.insert(front, BreakingWave::new(0.0, 30.0, 200.0, 0.6));
        registry.advance(0.0, &params);

        let mut overlay = Overlay::new();
        overlay.add_breaking_waves(&registry, 0.0, &params, top_down(), SCREEN);
        assert_eq!(overlay.triangle_count(), 0);
    }

    #[test]
    fn test_button_layout_hit_testing() {
        for button in Button::ALL {
            let rect = button.rect(SCREEN);
            let middle = rect.min + rect.size * 0.5;
            assert_eq!(Button::at(middle, SCREEN), Some(button));
        }
        assert_eq!(Button::at(SCREEN * 0.5, SCREEN), None);
    }

    #[test]
    fn test_buttons_emit_two_triangles_each() {
        let mut overlay = Overlay::new();
        overlay.add_buttons(Some(Button::Left), SCREEN);
        assert_eq!(overlay.triangle_count(), 8);
        overlay.clear();
        assert_eq!(overlay.triangle_count(), 0);
    }

    #[test]
    fn test_hex_color_extremes() {
        assert_eq!(hex_color(0xffffff, 0.5), [1.0, 1.0, 1.0, 0.5]);
        assert_eq!(hex_color(0x000000, 1.0), [0.0, 0.0, 0.0, 1.0]);
    }
}
