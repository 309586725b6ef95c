//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - Defaults that can be partially overridden from a RON file

mod boat;
mod camera;
mod render;
mod water;
mod waves;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Re-export all types
pub use boat::{BoatTuning, REFERENCE_FRAME_S};
pub use camera::{CameraPreset, ChaseCamera, OverviewCamera};
pub use render::{HudParams, RenderConfig};
pub use water::WaterParams;
pub use waves::{ExpiryPolicy, SetLayout, SpawnerParams, WaveParams};

/// Every tunable of a session in one place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub waves: WaveParams,
    pub spawner: SpawnerParams,
    pub water: WaterParams,
    pub boat: BoatTuning,
    pub camera: CameraPreset,
    pub render: RenderConfig,
    pub hud: HudParams,

    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Parse a (possibly partial) RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a (possibly partial) RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Pretty RON rendition, suitable as a starting config file
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.waves.validate().map_err(ConfigError::Invalid)?;
        self.spawner.validate().map_err(ConfigError::Invalid)?;
        self.water.validate().map_err(ConfigError::Invalid)?;
        self.boat.validate().map_err(ConfigError::Invalid)?;
        self.camera.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
