//! Simulation state and the strictly ordered per-frame update.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boat::{BoatState, ControlIntent};
use crate::clock::FrameTime;
use crate::hud::{Compass, HudReport};
use crate::params::SimConfig;
use crate::water::{HeightField, WaterGrid};
use crate::waves::{WaveRegistry, WaveSpawner};

/// What happened during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub pruned: usize,
    pub hits: usize,
}

/// Everything that changes from frame to frame, owned in one place
pub struct Simulation {
    pub config: SimConfig,
    pub registry: WaveRegistry,
    pub spawner: WaveSpawner,
    pub boat: BoatState,
    pub grid: WaterGrid,
    /// Surface height under the boat after the last update
    pub boat_surface_height: f32,
    time_s: f32,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = WaterGrid::new(&config.water);
        info!(
            "Water grid: {} vertices, {} m across",
            grid.vertices.len(),
            config.water.size_m
        );

        Self {
            config,
            registry: WaveRegistry::new(),
            spawner: WaveSpawner::new(),
            boat: BoatState::new(),
            grid,
            boat_surface_height: 0.0,
            time_s: 0.0,
            rng,
        }
    }

    /// Simulation time of the last update (seconds)
    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    /// Spawn a wavefront set on the next update
    pub fn trigger_spawn(&mut self) {
        self.spawner.trigger();
    }

    /// Advance one frame: spawn → advance/prune → collide and integrate the
    /// boat → height field. Collision reads breaking waves already advanced to
    /// this frame and the height field sees the pruned set.
    pub fn update(&mut self, frame: FrameTime, intent: ControlIntent) -> FrameReport {
        let time_s = frame.time_s;
        self.time_s = time_s;
        let config = &self.config;

        let spawned = self
            .spawner
            .update(
                time_s,
                &mut self.registry,
                &mut self.rng,
                &config.waves,
                &config.spawner,
            )
            .len();

        self.registry.advance(time_s, &config.waves);
        let pruned = self.registry.prune_expired(time_s);

        let hits = self.boat.update(
            time_s,
            frame.dt_s,
            intent,
            self.registry.active_volumes(),
            &config.boat,
            &config.waves,
            &mut self.rng,
        );

        let field = HeightField::new(time_s, self.registry.fronts(), &config.waves, &config.water);
        field.apply(&mut self.grid);
        let boat = self.boat.position;
        self.boat_surface_height = field.height_at(boat.x, boat.y);

        FrameReport {
            spawned,
            pruned,
            hits,
        }
    }

    /// HUD values for the current state
    pub fn hud_report(&self) -> HudReport {
        HudReport {
            speed: self.boat.speed() * self.config.hud.speed_display_scale,
            speed_unit: self.config.hud.speed_unit.clone(),
            compass: Compass::from_heading(self.boat.heading),
            live_wavefronts: self.registry.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SpawnerParams;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn seeded(config: SimConfig) -> Simulation {
        Simulation::new(SimConfig {
            seed: Some(42),
            ..config
        })
    }

    fn frame(n: u32) -> FrameTime {
        FrameTime {
            time_s: n as f32 * DT,
            dt_s: if n == 0 { 0.0 } else { DT },
        }
    }

    #[test]
    fn test_first_frame_spawns_and_displaces_surface() {
        let mut sim = seeded(SimConfig::default());
        let report = sim.update(frame(0), ControlIntent::default());
        assert!(report.spawned >= 1);
        assert_eq!(sim.registry.len(), report.spawned);
        assert!(sim.grid.vertices.iter().any(|v| v.position[1].abs() > 0.5));
    }

    #[test]
    fn test_wavefront_lifecycle_scenario() {
        let config = SimConfig {
            spawner: SpawnerParams {
                set_size_range: (1, 1),
                interval_s: 1000.0,
                ..SpawnerParams::default()
            },
            ..SimConfig::default()
        };
        let mut sim = seeded(config);
        let lifetime = sim.config.waves.front_lifetime_s;

        sim.update(FrameTime { time_s: 0.0, dt_s: 0.0 }, ControlIntent::default());
        assert_eq!(sim.registry.len(), 1);

        sim.update(FrameTime { time_s: lifetime - 0.001, dt_s: DT }, ControlIntent::default());
        assert_eq!(sim.registry.len(), 1);

        let report = sim.update(FrameTime { time_s: lifetime, dt_s: DT }, ControlIntent::default());
        assert_eq!(report.pruned, 1);
        assert!(sim.registry.is_empty());
        assert_eq!(sim.hud_report().live_wavefronts, 0);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let intent = ControlIntent {
            forward: true,
            left: true,
            ..ControlIntent::default()
        };
        let mut a = seeded(SimConfig::default());
        let mut b = seeded(SimConfig::default());
        for n in 0..240 {
            a.update(frame(n), intent);
            b.update(frame(n), intent);
        }
        assert_eq!(a.boat.position, b.boat.position);
        assert_eq!(a.boat.wake.len(), b.boat.wake.len());
        assert_eq!(a.registry.len(), b.registry.len());
    }

    #[test]
    fn test_manual_trigger_spawns_between_intervals() {
        let mut sim = seeded(SimConfig::default());
        sim.update(frame(0), ControlIntent::default());
        let before = sim.registry.len();

        sim.trigger_spawn();
        let report = sim.update(frame(1), ControlIntent::default());
        assert!(report.spawned >= 1);
        assert_eq!(sim.registry.len(), before + report.spawned);
    }

    #[test]
    fn test_hud_reports_heading_sector_and_speed() {
        let mut sim = seeded(SimConfig::default());
        sim.boat.heading = std::f32::consts::PI;
        sim.boat.velocity = Vec2::new(0.0, 2.0);
        let hud = sim.hud_report();
        assert_eq!(hud.compass, Compass::S);
        assert!((hud.speed - 2.0 * sim.config.hud.speed_display_scale).abs() < 1e-5);
    }
}
