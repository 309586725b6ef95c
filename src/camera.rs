//! Camera presets: smoothed chase behind the boat, or a fixed overview.

use glam::{Mat4, Quat, Vec3};

use crate::params::{CameraPreset, ChaseCamera, OverviewCamera, RenderConfig, REFERENCE_FRAME_S};

/// Camera system following the selected preset
pub struct CameraSystem {
    preset: CameraPreset,
    eye: Option<Vec3>,
    target: Vec3,
}

impl CameraSystem {
    /// Create new camera system with specified preset
    pub fn new(preset: CameraPreset) -> Self {
        Self {
            preset,
            eye: None,
            target: Vec3::ZERO,
        }
    }

    /// Move the camera for this frame
    ///
    /// # Arguments
    /// * `dt_s` - Frame step in seconds
    /// * `boat_position` - Rendered boat position (world space)
    /// * `boat_heading` - Boat yaw in radians
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn update(&mut self, dt_s: f32, boat_position: Vec3, boat_heading: f32) -> (Vec3, Vec3) {
        let (eye, target) = match &self.preset {
            CameraPreset::Chase(params) => {
                let desired = Self::chase_position(params, boat_position, boat_heading);
                let eye = match self.eye {
                    Some(eye) => {
                        let blend = 1.0 - (1.0 - params.follow_rate).powf(dt_s / REFERENCE_FRAME_S);
                        eye.lerp(desired, blend)
                    }
                    None => desired,
                };
                (eye, boat_position)
            }
            CameraPreset::Overview(params) => Self::overview_path(params),
        };
        self.eye = Some(eye);
        self.target = target;
        (eye, target)
    }

    /// Where the chase camera wants to be: the offset rotated by boat yaw
    fn chase_position(p: &ChaseCamera, boat_position: Vec3, boat_heading: f32) -> Vec3 {
        boat_position + Quat::from_rotation_y(boat_heading) * Vec3::from_array(p.offset)
    }

    fn overview_path(p: &OverviewCamera) -> (Vec3, Vec3) {
        (Vec3::from_array(p.position), Vec3::from_array(p.target))
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye.unwrap_or(Vec3::new(0.0, 5.0, 10.0));

        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, eye)
    }
}
