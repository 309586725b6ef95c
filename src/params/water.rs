//! Water surface mesh and ambient swell parameters.

use serde::{Deserialize, Serialize};

/// Water surface parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    /// Side length of the square surface (meters)
    pub size_m: f32,

    /// Grid cells per side (e.g., 100 = 10,201 vertices)
    pub resolution: usize,

    /// Enable the slow two-term ambient swell
    pub swell_enabled: bool,

    /// Swell height of each term (meters)
    pub swell_amplitude_m: f32,

    /// Swell spatial frequency (radians per meter)
    pub swell_frequency: f32,

    /// Swell phase speed (radians per second)
    pub swell_speed: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            size_m: 500.0,
            resolution: 100,
            swell_enabled: true,
            swell_amplitude_m: 0.1,
            swell_frequency: 0.1,
            swell_speed: 0.5,
        }
    }
}

impl WaterParams {
    /// Spacing between grid vertices (meters)
    pub fn grid_spacing_m(&self) -> f32 {
        self.size_m / self.resolution as f32
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.resolution == 0 {
            return Err("Water resolution must be > 0".to_string());
        }
        if self.size_m <= 0.0 {
            return Err("Water size must be > 0".to_string());
        }
        Ok(())
    }
}
