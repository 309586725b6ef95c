//! Boatwake library - a boat on open water, steered through spawning and
//! breaking wave sets

pub mod boat;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod error;
pub mod hud;
pub mod input;
pub mod mesh;
pub mod overlay;
pub mod params;
pub mod rendering;
pub mod sim;
pub mod water;
pub mod waves;
