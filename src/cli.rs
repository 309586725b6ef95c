//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::error::ConfigError;
use crate::params::{CameraPreset, ChaseCamera, ExpiryPolicy, OverviewCamera, SimConfig};

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "boatwake")]
#[command(about = "Steer a boat through spawning and breaking wave sets", long_about = None)]
pub struct Args {
    /// RON config file; fields left out keep their defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// RNG seed for reproducible wave sets
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Camera preset: chase (default), overview
    #[arg(long, value_name = "PRESET")]
    pub camera: Option<String>,

    /// Breaking-wave expiry: independent (default), clamp
    #[arg(long, value_name = "POLICY")]
    pub expiry: Option<String>,

    /// Disable the ambient swell
    #[arg(long)]
    pub no_swell: bool,

    /// Seconds between automatic wave sets
    #[arg(long, value_name = "SECONDS")]
    pub spawn_interval: Option<f32>,

    /// Print the effective config as RON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Parse camera preset name
    pub fn parse_camera_preset(name: &str) -> CameraPreset {
        match name.to_lowercase().as_str() {
            "chase" => {
                info!("Camera: Chase (follows the boat)");
                CameraPreset::Chase(ChaseCamera::default())
            }
            "overview" => {
                info!("Camera: Overview (fixed high view)");
                CameraPreset::Overview(OverviewCamera::default())
            }
            other => {
                warn!("Unknown camera preset '{}', using chase", other);
                CameraPreset::Chase(ChaseCamera::default())
            }
        }
    }

    /// Parse expiry policy name
    pub fn parse_expiry_policy(name: &str) -> ExpiryPolicy {
        match name.to_lowercase().as_str() {
            "independent" => ExpiryPolicy::Independent,
            "clamp" => ExpiryPolicy::ClampBreakerToFront,
            other => {
                warn!("Unknown expiry policy '{}', using independent", other);
                ExpiryPolicy::Independent
            }
        }
    }

    /// Load the config file (if any) and apply command-line overrides on top
    pub fn build_config(&self) -> Result<SimConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                SimConfig::load(path)?
            }
            None => SimConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(name) = &self.camera {
            config.camera = Self::parse_camera_preset(name);
        }
        if let Some(name) = &self.expiry {
            config.waves.expiry = Self::parse_expiry_policy(name);
        }
        if self.no_swell {
            config.water.swell_enabled = false;
        }
        if let Some(interval) = self.spawn_interval {
            config.spawner.interval_s = interval;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "boatwake",
            "--seed",
            "7",
            "--camera",
            "overview",
            "--expiry",
            "clamp",
            "--no-swell",
            "--spawn-interval",
            "5",
        ]);
        let config = args.build_config().unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(matches!(config.camera, CameraPreset::Overview(_)));
        assert_eq!(config.waves.expiry, ExpiryPolicy::ClampBreakerToFront);
        assert!(!config.water.swell_enabled);
        assert_eq!(config.spawner.interval_s, 5.0);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert!(matches!(
            Args::parse_camera_preset("drone"),
            CameraPreset::Chase(_)
        ));
        assert_eq!(Args::parse_expiry_policy("never"), ExpiryPolicy::Independent);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args {
            spawn_interval: Some(-1.0),
            ..Args::default()
        };
        assert!(matches!(args.build_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/boatwake.ron")),
            ..Args::default()
        };
        assert!(matches!(args.build_config(), Err(ConfigError::Io { .. })));
    }
}
