//! Camera configuration and presets.

use serde::{Deserialize, Serialize};

/// Chase camera trailing the boat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseCamera {
    /// Offset from the boat in boat-local space (meters), rotated by boat yaw
    pub offset: [f32; 3],

    /// Fraction of the remaining distance closed per reference frame
    pub follow_rate: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            offset: [0.0, 5.0, 10.0], // Above and behind (boat faces -Z at yaw 0)
            follow_rate: 0.07,
        }
    }
}

/// Fixed high view over the whole field (for watching wave sets)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for OverviewCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 260.0, 320.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Camera preset selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CameraPreset {
    /// Follows the boat from behind, smoothed
    Chase(ChaseCamera),

    /// Stationary overview of the field
    Overview(OverviewCamera),
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::Chase(ChaseCamera::default())
    }
}

impl CameraPreset {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Chase(chase) => {
                if !(0.0..=1.0).contains(&chase.follow_rate) {
                    return Err(format!(
                        "follow_rate must be in [0, 1], got {}",
                        chase.follow_rate
                    ));
                }
                Ok(())
            }
            Self::Overview(_) => Ok(()),
        }
    }
}
