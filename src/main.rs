//! Boatwake - steer a small boat across open water while wave sets roll in,
//! break, and shove you around.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use boatwake::camera::CameraSystem;
use boatwake::cli::Args;
use boatwake::clock::FrameClock;
use boatwake::hud::{HudReport, HudSink};
use boatwake::input::InputState;
use boatwake::overlay::Overlay;
use boatwake::params::SimConfig;
use boatwake::rendering::{RenderSystem, SceneUniforms};
use boatwake::sim::Simulation;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation and presentation
    sim: Simulation,
    camera: CameraSystem,
    input: InputState,
    overlay: Overlay,
    hud_sink: Option<Box<dyn HudSink>>,

    // Time tracking
    clock: FrameClock,
    start_time: Instant,
}

impl App {
    fn new(config: SimConfig) -> Self {
        let window_size = Vec2::new(
            config.render.window_width as f32,
            config.render.window_height as f32,
        );
        let camera = CameraSystem::new(config.camera.clone());

        Self {
            window: None,
            render_system: None,
            sim: Simulation::new(config),
            camera,
            input: InputState::new(window_size),
            overlay: Overlay::new(),
            hud_sink: None,
            clock: FrameClock::default(),
            start_time: Instant::now(),
        }
    }
}

/// HUD sink that writes the report into the window title when it changes
fn title_sink(window: Arc<Window>) -> Box<dyn HudSink> {
    let mut last_title = String::new();
    Box::new(move |report: &HudReport| {
        let title = format!("Boatwake | {}", report);
        if title != last_title {
            window.set_title(&title);
            last_title = title;
        }
    })
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let render_config = &self.sim.config.render;
        let window_attributes = Window::default_attributes()
            .with_title("Boatwake")
            .with_inner_size(winit::dpi::LogicalSize::new(
                render_config.window_width,
                render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system =
            match pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.sim.grid)) {
                Ok(render_system) => render_system,
                Err(e) => {
                    error!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

        let (width, height) = render_system.size();
        self.resize(width, height);

        info!("Boatwake is running");
        info!("W/A/S/D or arrows steer, Space spawns a wave set, ESC quits");

        self.hud_sink = Some(title_sink(Arc::clone(&window)));
        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Keep the projection aspect in step with the surface
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.sim.config.render.window_width = width;
        self.sim.config.render.window_height = height;
        self.input.window_size = Vec2::new(width as f32, height as f32);
    }

    /// Update the simulation and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let frame = self.clock.tick(self.start_time.elapsed().as_secs_f64());

        if self.input.take_spawn_request() {
            self.sim.trigger_spawn();
        }
        self.sim.update(frame, self.input.snapshot());

        // Boat rides the surface; the camera follows the rendered hull
        let boat_model = self
            .sim
            .boat
            .model_matrix(self.sim.boat_surface_height, &self.sim.config.boat);
        self.camera.update(
            frame.dt_s,
            boat_model.w_axis.truncate(),
            self.sim.boat.heading,
        );
        let (view_proj, camera_pos) = self.camera.create_view_proj_matrix(&self.sim.config.render);

        render_system.update_water(&self.sim.grid.vertices);
        render_system.update_scene(&SceneUniforms::new(view_proj, camera_pos));
        render_system.update_boat(boat_model);

        let (width, height) = render_system.size();
        let screen = Vec2::new(width as f32, height as f32);
        self.overlay.clear();
        self.overlay.add_breaking_waves(
            &self.sim.registry,
            self.sim.time_s(),
            &self.sim.config.waves,
            view_proj,
            screen,
        );
        self.overlay.add_wake(
            &self.sim.boat.wake,
            self.sim.boat_surface_height,
            &self.sim.config.boat,
            view_proj,
            screen,
        );
        self.overlay.add_buttons(self.input.held_button, screen);
        render_system.update_overlay(&self.overlay.vertices);

        if let Some(sink) = &mut self.hud_sink {
            sink.report(&self.sim.hud_report());
        }

        match render_system.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => render_system.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = match args.build_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.print_config {
        match config.to_ron_string() {
            Ok(ron) => println!("{}", ron),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match config.seed {
        Some(seed) => info!("Seed: {}", seed),
        None => info!("Seed: random"),
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop error: {}", e);
    }
}
